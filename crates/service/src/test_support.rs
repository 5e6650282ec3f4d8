#![cfg(test)]
use migration::MigratorTrait;
use models::address::AddressFields;
use models::customer::CustomerFields;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// A migrated sqlite file scoped to one test; dropped with the temp dir.
pub struct TestDb {
    pub db: DatabaseConnection,
    _dir: TempDir,
}

pub async fn get_db() -> Result<TestDb, anyhow::Error> {
    let dir = tempfile::tempdir()?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("service.db").display()),
        acquire_timeout: std::time::Duration::from_secs(10),
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(TestDb { db, _dir: dir })
}

pub fn sample_customer(first: &str, last: &str, phone: &str) -> CustomerFields {
    CustomerFields {
        first_name: first.into(),
        last_name: last.into(),
        phone_number: phone.into(),
    }
}

pub fn sample_address(city: &str) -> AddressFields {
    AddressFields {
        address_details: "221B Main Street".into(),
        city: city.into(),
        state: "Maharashtra".into(),
        pin_code: "411001".into(),
    }
}
