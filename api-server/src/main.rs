use api_server::tasks::TaskTable;
use api_server::{pipeline, AppState, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env();
    let verifier = pipeline::from_settings(&settings);
    if !verifier.is_ready() {
        tracing::warn!("FACTGRAPH_VERIFIER_CMD not set; verification tasks will end in error");
    }

    let state = AppState::new(verifier)
        .with_tasks(TaskTable::with_max_finished(settings.max_finished_tasks));
    let app = api_server::app(state, &settings);
    let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
    tracing::info!(addr = %settings.bind, origins = ?settings.allowed_origins, "api-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
