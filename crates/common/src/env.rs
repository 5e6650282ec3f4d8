//! Environment/runtime helpers
//!
//! Sanity checks to ensure the sqlite data directory exists at startup.

use std::path::{Path, PathBuf};

use tracing::info;

/// Filesystem path behind a `sqlite:` url, or `None` for in-memory databases.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Create the directory that will hold the sqlite file, if any.
pub async fn ensure_sqlite_dir(url: &str) -> anyhow::Result<()> {
    let Some(file) = sqlite_file_path(url) else { return Ok(()) };
    let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) else { return Ok(()) };
    if tokio::fs::metadata(dir).await.is_err() {
        info!(dir = %dir.display(), "creating sqlite data directory");
    }
    create_dir(dir).await
}

async fn create_dir(dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))
}
