use std::{env, path::PathBuf};

use crate::errors::DbError;

pub const START_DIR_VAR: &str = "SQLITE_VIEWER_START_DIR";
pub const EXPORT_DIR_VAR: &str = "SQLITE_VIEWER_EXPORT_DIR";
pub const LOG_FILE_VAR: &str = "SQLITE_VIEWER_LOG_FILE";

/// Runtime settings. Every field has a default, so an empty environment
/// starts the viewer in the current directory with logging off.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub start_dir: PathBuf,
    pub export_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl ViewerConfig {
    /// Reads the settings from the process environment (and `.env`).
    pub fn from_env() -> Result<Self, DbError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cwd = env::current_dir()
            .map_err(|e| DbError::Config(format!("cannot read current directory: {}", e)))?;

        let start_dir = dir_setting(&lookup, START_DIR_VAR)?.unwrap_or_else(|| cwd.clone());
        let export_dir = dir_setting(&lookup, EXPORT_DIR_VAR)?.unwrap_or(cwd);
        let log_file = lookup(LOG_FILE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            start_dir,
            export_dir,
            log_file,
        })
    }
}

fn dir_setting<F>(lookup: &F, key: &str) -> Result<Option<PathBuf>, DbError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key).filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };

    let dir = PathBuf::from(value);
    if !dir.is_dir() {
        return Err(DbError::Config(format!(
            "{} is not a directory: {}",
            key,
            dir.display()
        )));
    }
    Ok(Some(dir))
}
