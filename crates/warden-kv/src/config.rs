//! Backend configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;

use crate::error::{StorageError, StorageResult};
use crate::memory::MemoryKvStore;
use crate::traits::KvStore;

/// Which storage engine to open
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct KvConfig {
    #[serde(default)]
    pub backend: BackendKind,
    /// Database file, required by the `sqlite` backend
    pub path: Option<PathBuf>,
}

impl KvConfig {
    /// Load from an optional TOML file, overridden by `WARDEN_KV_*` env vars
    pub fn load(file: impl AsRef<Path>) -> StorageResult<Self> {
        let config: KvConfig = Figment::new()
            .merge(Toml::file(file.as_ref()))
            .merge(Env::prefixed("WARDEN_KV_"))
            .extract()?;
        Ok(config)
    }

    /// Open the configured backend
    pub fn open(&self) -> StorageResult<Arc<dyn KvStore>> {
        match self.backend {
            BackendKind::Memory => {
                tracing::debug!("Opening in-memory key-value store");
                Ok(Arc::new(MemoryKvStore::new()))
            }
            BackendKind::Sqlite => self.open_sqlite(),
        }
    }

    #[cfg(feature = "sqlite")]
    fn open_sqlite(&self) -> StorageResult<Arc<dyn KvStore>> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| StorageError::Config("sqlite backend requires a path".into()))?;
        tracing::debug!(path = %path.display(), "Opening SQLite key-value store");
        Ok(Arc::new(crate::sqlite::SqliteKvStore::open(path)?))
    }

    #[cfg(not(feature = "sqlite"))]
    fn open_sqlite(&self) -> StorageResult<Arc<dyn KvStore>> {
        Err(StorageError::Config(
            "sqlite backend requires the `sqlite` feature".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_memory() {
        let config = KvConfig::default();
        assert_eq!(config.backend, BackendKind::Memory);
        assert!(config.open().is_ok());
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("warden.toml");
        std::fs::write(&file, "backend = \"sqlite\"\npath = \"/tmp/access.db\"\n").unwrap();

        let config = KvConfig::load(&file).unwrap();
        assert_eq!(config.backend, BackendKind::Sqlite);
        assert_eq!(config.path, Some(PathBuf::from("/tmp/access.db")));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = KvConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.backend, BackendKind::Memory);
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_sqlite_requires_path() {
        let config = KvConfig {
            backend: BackendKind::Sqlite,
            path: None,
        };
        assert!(matches!(config.open(), Err(StorageError::Config(_))));
    }
}
