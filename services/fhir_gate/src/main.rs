use care_context::upstream::{UpstreamCareContextService, UpstreamConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let upstream = UpstreamCareContextService::new(&UpstreamConfig {
        base_url: fhir_config::UPSTREAM_URL.clone(),
        token: fhir_config::UPSTREAM_TOKEN.clone(),
        timeout_ms: *fhir_config::UPSTREAM_TIMEOUT_MS,
    })?;
    info!("forwarding care-context calls to {}", upstream.base_url());

    let app = fhir_gate::app(Arc::new(upstream));
    let listener = TcpListener::bind(fhir_config::BIND_ADDR.as_str()).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
