//! Runtime configuration resolved from environment variables.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - Without `TEAM_PLANNER_LOG_DIR` logging stays disabled.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TEAM_PLANNER_DB_PATH";
pub const LOG_DIR_ENV: &str = "TEAM_PLANNER_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TEAM_PLANNER_LOG_LEVEL";
pub const DEFAULT_DB_FILE_NAME: &str = "team_planner.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub db_path: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub log_level: &'static str,
}

impl PlannerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
            log_level,
        })
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, LoggingError> {
        self.log_level = normalize_level(level)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlannerConfig, DB_PATH_ENV, DEFAULT_DB_FILE_NAME, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::{default_log_level, LoggingError};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = PlannerConfig::from_lookup(lookup(&[(DB_PATH_ENV, "  ")])).unwrap();
        assert_eq!(config.db_path, std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn variables_override_defaults() {
        let config = PlannerConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/data/planner.sqlite3"),
            (LOG_DIR_ENV, "/var/log/planner"),
            (LOG_LEVEL_ENV, "WARNING"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/planner.sqlite3"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/planner")));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = PlannerConfig::from_lookup(lookup(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert_eq!(err, LoggingError::UnsupportedLevel("loud".to_string()));
    }
}
