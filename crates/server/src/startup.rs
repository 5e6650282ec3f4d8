use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// Any origin, method and header: the browser client is served from elsewhere.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) first, then environment variables.
///
/// A missing or invalid file is not fatal; `SERVER_HOST`, `SERVER_PORT` and
/// `DATABASE_URL` are consulted instead.
pub fn load_config() -> anyhow::Result<configs::AppConfig> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unusable, falling back to environment");
            configs::AppConfig::from_env()
        }
    }
}

/// Resolve `host:port` into a socket address, reporting bad values as config errors.
fn bind_addr(server: &configs::ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", server.host, server.port)))
}

/// Open the pool, bring the schema up to date and wrap it as handler state.
pub async fn prepare_state(database: &configs::DatabaseConfig) -> anyhow::Result<ServerState> {
    // sqlite creates the file but not its parent directory
    common::env::ensure_sqlite_dir(&database.url).await?;

    // Pool, then a round trip so a bad URL fails here rather than on the first request
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(database)).await?;
    models::db::test_connection(&db).await?;

    // Apply pending migrations (idempotent)
    migration::Migrator::up(&db, None).await?;
    info!(event = "migrated", "schema up to date");
    Ok(ServerState { db })
}

/// Resolves on Ctrl+C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run() -> anyhow::Result<()> {
    // .env first so logging and config both see its values
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;

    // Database state shared by every handler
    let state = prepare_state(&cfg.database).await?;

    // Build router
    let app: Router = routes::build_router(state, build_cors());

    // Bind and serve until Ctrl+C; in-flight requests are allowed to finish
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting customer records server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
