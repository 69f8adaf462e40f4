use hls_relay::{ProxyConfig, server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hls_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ProxyConfig::from_env()?;
    let addr = config.bind_addr();

    tracing::info!("Starting hls-relay on {}", addr);
    if !config.route_prefix.is_empty() {
        tracing::info!("Proxy routes mounted under {}", config.route_prefix);
    }

    let app = server::router::create_router(config)?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
