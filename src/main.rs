use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bloxshop::config::CONFIG;
use bloxshop::endpoints::create_app;
use bloxshop::services::notify::ClaimNotifier;
use bloxshop::services::{ensure_admin, purge_expired_sessions};
use bloxshop::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloxshop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Bloxshop backend v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection and run migrations
    let db = bloxshop::db::connect().await?;
    tracing::info!("Database connection established");

    // First-start admin account and session housekeeping
    ensure_admin(&db).await?;
    let purged = purge_expired_sessions(&db).await?;
    if purged > 0 {
        tracing::info!("Purged {} expired sessions", purged);
    }

    // Create app state
    let state = AppState::new(db, ClaimNotifier::from_config());

    // Build the application
    let app = create_app(state);

    // Determine bind address
    let addr: SocketAddr = format!("{}:{}", CONFIG.server.host, CONFIG.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
