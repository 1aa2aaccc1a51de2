use factgraph_core::BackendConfig;

/// Document store config baked in at build time (see `build.rs`).
pub fn backend_config() -> BackendConfig {
    BackendConfig::from_lookup(|key| baked(key).map(ToString::to_string))
}

/// Prefix for `/api` calls; empty means same origin.
pub fn api_base() -> &'static str {
    option_env!("FACTGRAPH_API_BASE")
        .unwrap_or_default()
        .trim_end_matches('/')
}

fn baked(key: &str) -> Option<&'static str> {
    match key {
        "FIREBASE_API_KEY" => option_env!("FIREBASE_API_KEY"),
        "FIREBASE_AUTH_DOMAIN" => option_env!("FIREBASE_AUTH_DOMAIN"),
        "FIREBASE_PROJECT_ID" => option_env!("FIREBASE_PROJECT_ID"),
        "FIREBASE_STORAGE_BUCKET" => option_env!("FIREBASE_STORAGE_BUCKET"),
        "FIREBASE_MESSAGING_SENDER_ID" => option_env!("FIREBASE_MESSAGING_SENDER_ID"),
        "FIREBASE_APP_ID" => option_env!("FIREBASE_APP_ID"),
        "FIREBASE_MEASUREMENT_ID" => option_env!("FIREBASE_MEASUREMENT_ID"),
        _ => None,
    }
}
