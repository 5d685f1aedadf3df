//! Fixed connection and logging settings for both demos.
//!
//! # Invariants
//! - Values are compiled in; nothing is read from the environment or argv.
//! - `LogConfig::log_dir` is always absolute.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DEFAULT_DB_FILE_NAME: &str = "taskcat.sqlite3";
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/";
pub const DEFAULT_MONGO_DATABASE: &str = "cat_database";
pub const DEFAULT_MONGO_COLLECTION: &str = "cats";
const LOG_DIR_NAME: &str = "taskcat-logs";

/// Location of the relational task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationalConfig {
    pub db_path: PathBuf,
}

impl Default for RelationalConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
        }
    }
}

/// Document-store endpoint and namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_MONGO_URI.to_string(),
            database: DEFAULT_MONGO_DATABASE.to_string(),
            collection: DEFAULT_MONGO_COLLECTION.to_string(),
        }
    }
}

/// Arguments for `init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: &'static str,
    pub log_dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: std::env::temp_dir().join(LOG_DIR_NAME),
        }
    }
}
