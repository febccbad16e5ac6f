use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crepo_types::bucket::DefaultBucketTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable naming the configuration file
pub static CONFIG_PATH_ENV_KEY: &str = "CREPO_CONFIG_PATH";
/// Configuration file looked up in the working directory when [CONFIG_PATH_ENV_KEY] is not set
pub static DEFAULT_CONFIG_FILE: &str = "crepo.toml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    TomlParse(#[from] toml::de::Error),
    #[error(transparent)]
    URLParseError(#[from] url::ParseError),
    #[error("URL `{0}` has no host")]
    MissingHost(Url),
}
/// Where the repository lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub transport: String,
    pub host: String,
    pub port: Option<u16>,
    /// Prefix for every API path, such as `/v1`
    pub path: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Log every response body at `info`
    pub print_debug: bool,
    pub default_bucket: DefaultBucketTable,
}
impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            transport: "http".to_owned(),
            host: "localhost".to_owned(),
            port: Some(8080),
            path: String::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
            print_debug: false,
            default_bucket: DefaultBucketTable::default(),
        }
    }
}
impl RepoConfig {
    /// Loads from [CONFIG_PATH_ENV_KEY], then [DEFAULT_CONFIG_FILE], then falls back to [RepoConfig::default]
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV_KEY) {
            return Self::from_path(PathBuf::from(path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_path(local);
        }
        Ok(Self::default())
    }
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(content)?;
        Ok(config)
    }
    /// Splits a base URL such as `http://localhost:8080/v1` into its parts.
    pub fn from_base_url(url: &Url) -> Result<Self, ConfigError> {
        let host = url
            .host_str()
            .ok_or_else(|| ConfigError::MissingHost(url.clone()))?;
        Ok(Self {
            transport: url.scheme().to_owned(),
            host: host.to_owned(),
            port: url.port(),
            path: url.path().trim_end_matches('/').to_owned(),
            ..Default::default()
        })
    }
    /// `host` or `host:port`, exactly as configured.
    pub fn authority(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
    pub fn api_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}://{}{}",
            self.transport,
            self.authority(),
            self.path
        ))
    }
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
    /// The bucket that holds the corpus on this stack.
    pub fn default_bucket_name(&self) -> &str {
        self.default_bucket.resolve(&self.authority())
    }
}
