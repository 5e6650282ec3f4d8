use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use tracing::{debug, info};

/// Pool settings for the sqlite store.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from(&configs::DatabaseConfig {
            url: configs::DEFAULT_DATABASE_URL.to_string(),
            ..configs::DatabaseConfig::default()
        })
    }
}

impl From<&configs::DatabaseConfig> for DatabaseConfig {
    fn from(c: &configs::DatabaseConfig) -> Self {
        Self {
            url: c.url.clone(),
            max_connections: c.max_connections,
            min_connections: c.min_connections,
            connect_timeout: Duration::from_secs(c.connect_timeout_secs),
            acquire_timeout: Duration::from_secs(c.acquire_timeout_secs),
            idle_timeout: Duration::from_secs(c.idle_timeout_secs),
            max_lifetime: Duration::from_secs(c.max_lifetime_secs),
            sqlx_logging: c.sqlx_logging,
        }
    }
}

/// Open a pooled connection. Foreign keys are enforced on every pooled
/// sqlite connection by the driver's defaults.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(cfg.connect_timeout)
        .acquire_timeout(cfg.acquire_timeout)
        .idle_timeout(cfg.idle_timeout)
        .max_lifetime(cfg.max_lifetime)
        .sqlx_logging(cfg.sqlx_logging);
    debug!(max = cfg.max_connections, min = cfg.min_connections, "opening sqlite pool");
    let db = Database::connect(opt).await?;
    info!(event = "db_connected", "database pool ready");
    Ok(db)
}

/// Round-trip a trivial statement to prove the pool is usable.
pub async fn test_connection(db: &DatabaseConnection) -> anyhow::Result<()> {
    let stmt = Statement::from_string(DatabaseBackend::Sqlite, "SELECT 1 AS ok".to_string());
    db.query_one(stmt)
        .await?
        .ok_or_else(|| anyhow::anyhow!("SELECT 1 returned no row"))?;
    Ok(())
}
