use std::env;
use std::fs;
use std::path::Path;

// Values baked into the bundle at compile time.
const BAKED_PREFIXES: [&str; 2] = ["FIREBASE_", "FACTGRAPH_"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    let env_file = Path::new(".env");
    let Ok(contents) = fs::read_to_string(env_file) else {
        println!("cargo:warning=No .env file found; document store config comes from the build environment. See .env.example.");
        return;
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().trim_start_matches("export ").trim();
        if !BAKED_PREFIXES.iter().any(|p| key.starts_with(p)) {
            continue;
        }
        let value = value.trim().trim_matches('"').trim_matches('\'');

        // Real environment wins over .env.
        if env::var(key).is_err() {
            println!("cargo:rustc-env={key}={value}");
        }
        println!("cargo:rerun-if-env-changed={key}");
    }
}
