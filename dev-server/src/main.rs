use dev_server::{DevSettings, DevState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = DevSettings::from_env()?;
    if !settings.dist_dir.join("index.html").exists() {
        tracing::warn!(
            dist = %settings.dist_dir.display(),
            "no index.html found; build the front end first"
        );
    }

    let app = dev_server::app(DevState::new(settings.rule.clone(), &settings.dist_dir)?);
    let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
    tracing::info!(
        addr = %settings.bind,
        dist = %settings.dist_dir.display(),
        prefix = %settings.rule.prefix,
        target = %settings.rule.target,
        "dev-server listening"
    );

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
    tracing::info!("dev-server shutting down");
}
