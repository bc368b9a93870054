use std::sync::Arc;

use anyhow::Context;

use insights_api::app::{self, services::AppServices};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    insights_observability::init();

    let services = Arc::new(AppServices::from_env());
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .context("failed to bind 0.0.0.0:8080")?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
