use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::BoardOptions;
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

const APP_DIR_NAME: &str = "deskline";
const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_DIR_ENV: &str = "DESKLINE_CONFIG_DIR";
const API_BASE_ENV: &str = "DESKLINE_API_BASE";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub board: BoardOptions,
}

impl AppConfig {
    /// Defaults, then the stored file, then `DESKLINE_API_BASE`, then the flag.
    pub fn load(api_base_override: Option<String>) -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        let env_api_base = env::var(API_BASE_ENV).ok();
        Ok(Self::resolve(stored, env_api_base, api_base_override))
    }

    pub fn resolve(
        stored: StoredConfig,
        env_api_base: Option<String>,
        api_base_override: Option<String>,
    ) -> Self {
        let api_base = non_empty(api_base_override)
            .or_else(|| non_empty(env_api_base))
            .or_else(|| non_empty(stored.api_base))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let defaults = BoardOptions::rich();
        let board = BoardOptions {
            show_stats: stored.show_stats.unwrap_or(defaults.show_stats),
            styled: stored.styled.unwrap_or(defaults.styled),
            alert_on_submit: stored.alert_on_submit.unwrap_or(defaults.alert_on_submit),
        };

        Self { api_base, board }
    }
}

/// Settings persisted by `deskline config init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_stats: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_on_submit: Option<bool>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loaded stored configuration");
                serde_json::from_str(&contents)
                    .map_err(|err| AppError::Configuration(format!("invalid config file: {err}")))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn config_directory() -> AppResult<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration("could not determine a configuration directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
