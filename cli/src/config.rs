use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub static HOME_ENV_KEY: &str = "CREPO_HOME";
pub static DEFAULT_REPO_SERVER: &str = "http://localhost:8080/";
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error(transparent)]
    TomlParse(#[from] toml::de::Error),
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the repository, such as `http://localhost:8080/`
    pub repo_server: String,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            repo_server: DEFAULT_REPO_SERVER.to_owned(),
        }
    }
}
impl Config {
    /// A missing file is the default configuration.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(?path, "No configuration file, using defaults");
            return Ok(Self::default());
        }
        let config_content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
pub fn load_config() -> Result<(Config, PathBuf), ConfigError> {
    let home_dir = home_dir()?;
    let config = Config::load_from(&home_dir.join("config.toml"))?;
    Ok((config, home_dir))
}

fn home_dir() -> Result<PathBuf, ConfigError> {
    let home_dir = if let Some(dir) = std::env::var_os(HOME_ENV_KEY) {
        PathBuf::from(dir)
    } else {
        std::env::home_dir().ok_or(ConfigError::HomeDirNotFound)?
    };
    let crepo_dir = home_dir.join(".crepo");
    if !crepo_dir.exists() {
        std::fs::create_dir_all(&crepo_dir)?;
    }
    Ok(crepo_dir)
}
