use crate::ai::{ModelConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "testme_debug.log";

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub base_url: String,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                model: DEFAULT_MODEL.to_string(),
                temperature: None,
                max_tokens: None,
            },
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup so tests don't touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            model: ModelConfig {
                model: non_empty("TESTME_MODEL").unwrap_or(defaults.model.model),
                temperature: non_empty("TESTME_TEMPERATURE").and_then(|v| v.trim().parse().ok()),
                max_tokens: non_empty("TESTME_MAX_TOKENS").and_then(|v| v.trim().parse().ok()),
            },
            base_url: non_empty("TESTME_BASE_URL").unwrap_or(defaults.base_url),
            data_dir: non_empty("TESTME_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            log_file: non_empty("TESTME_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("testme.db")
    }
}

fn default_data_dir() -> PathBuf {
    if cfg!(target_os = "windows") {
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\testme")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/testme")
    }
}
