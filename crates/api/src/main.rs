use std::sync::Arc;

use bizledger_api::app;
use bizledger_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    bizledger_observability::init(config.log_format);

    let services = Arc::new(app::services::build_services(&config)?);
    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
