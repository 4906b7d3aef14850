use anyhow::Context;
use coffeeshop::router::init_router;
use coffeeshop::state::init_app_state;
use coffeeshop_config::ServerConfig;
use coffeeshop_observability::{init_metrics, init_tracing, metrics_app};
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();

    if let Some(handle) = init_metrics()? {
        let metrics_address = config.metrics_address();
        let listener = tokio::net::TcpListener::bind(&metrics_address)
            .await
            .with_context(|| format!("Failed to bind metrics server to {}", metrics_address))?;
        info!("📊 Metrics available at http://{}/metrics", metrics_address);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("🚀 Server running on http://{}", address);
    info!("📚 Swagger UI available at http://{}/swagger-ui", address);
    info!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
