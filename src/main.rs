mod config;
mod guard;
mod routes;
mod services;
mod session;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is normal outside local development.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::GatewayConfig::from_env().expect("invalid gateway configuration");
    let upstream = services::upstream::HttpUpstream::new(&config).expect("upstream client init failed");
    tracing::info!(
        upstream = %config.upstream_base_url,
        cookie_secure = config.cookie_secure,
        public_dir = %config.public_dir.display(),
        "upstream client initialized"
    );

    let port = config.port;
    let state = state::AppState::new(config, Arc::new(upstream));
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "roamly gateway listening");
    axum::serve(listener, app).await.expect("server failed");
}
