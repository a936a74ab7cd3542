use classmaster::middleware::{WebConfig, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("classmaster=info")),
        )
        .init();

    let config = WebConfig::from_env()?;
    let addr = config.bind();
    let app = router(config.into_state()?);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "ClassMaster listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await?;
    Ok(())
}
