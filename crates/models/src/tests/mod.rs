use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use crate::db::{connect_with_config, DatabaseConfig};



/// A migrated sqlite file living in its own temp directory.
pub struct TestDb {
    pub db: DatabaseConnection,
    _dir: TempDir,
}

pub async fn setup_test_db() -> Result<TestDb> {
    let dir = tempfile::tempdir()?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("models.db").display()),
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(TestDb { db, _dir: dir })
}
