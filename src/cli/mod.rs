//! CLI command implementations

pub mod assess;
pub mod badges;
pub mod complete;
pub mod init;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};

use forgefit::config::Config;
use forgefit::progression::parse_day;
use forgefit::service::ProgressionService;
use forgefit::store::SqliteStore;

/// Paths given on the command line
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>, db_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            db_path,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(Config::global_config_path)
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config_path.as_deref())
    }

    /// Open the store and wire it to the configured badge catalogue
    pub fn service(&self) -> Result<ProgressionService<SqliteStore>> {
        let config = self.load_config()?;
        let db_path = self
            .db_path
            .clone()
            .unwrap_or_else(|| config.database_path());
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open progression db: {}", db_path.display()))?;
        Ok(ProgressionService::new(store, config.badges()))
    }
}

/// Parse a `YYYY-MM-DD` argument, defaulting to today's local date
pub fn day_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => Ok(parse_day(s)?),
        None => Ok(Local::now().date_naive()),
    }
}
