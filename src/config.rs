//! Where the store keeps its data and how long notifications live.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

use crate::notifications::DEFAULT_NOTIFICATION_TTL;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".course-admin";
/// SQLite file holding the slot table, inside the data directory.
const DB_FILE_NAME: &str = "store.sqlite";

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "COURSE_ADMIN_DATA_DIR";
/// Overrides the notification lifetime, in milliseconds.
pub const NOTIFICATION_TTL_ENV: &str = "COURSE_ADMIN_NOTIFICATION_TTL_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub notification_ttl: Duration,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }

    /// `~/.course-admin` with the default notification lifetime.
    pub fn default_location() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::new(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Start from [`StoreConfig::default_location`] and apply the
    /// `COURSE_ADMIN_*` environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default_location()?,
        };

        if let Ok(raw) = env::var(NOTIFICATION_TTL_ENV) {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{NOTIFICATION_TTL_ENV} must be whole milliseconds"))?;
            config.notification_ttl = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_lives_inside_the_data_dir() {
        let config = StoreConfig::new("/tmp/course-admin");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/course-admin/store.sqlite"));
        assert_eq!(config.notification_ttl, Duration::from_secs(3));
    }

    #[test]
    fn ttl_can_be_overridden() {
        let config = StoreConfig::new("/tmp/x").with_notification_ttl(Duration::from_millis(250));
        assert_eq!(config.notification_ttl, Duration::from_millis(250));
    }
}
