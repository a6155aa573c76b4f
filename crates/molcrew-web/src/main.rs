//! molcrew Web Server
//!
//! Run with: cargo run -p molcrew-web

use std::net::SocketAddr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use molcrew_web::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting molcrew Web Server...");

    let config = Config::load()?;

    // Create app state
    let state = molcrew_web::state::AppState::new(&config);

    // Build router
    let app = molcrew_web::router::build_router(state);

    // Bind to the configured address
    let ip = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server.host {}: {}", config.server.host, e))?;
    let addr = SocketAddr::new(ip, config.server.port);
    info!("🚀 Server listening on http://{}", addr);
    info!("📱 Open your browser and navigate to http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
