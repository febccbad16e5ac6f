use std::sync::Arc;

use http::HeaderValue;
use reqwest::{Client, ClientBuilder, redirect::Policy};
use tracing::{debug, error};

use crate::client::{
    CrepoClient, CrepoClientInner,
    http_client::HttpClient,
    settings::{ConfigError, RepoConfig},
};
/// Runtime User Agent Value
static USER_AGENT_ENV_KEY: &str = "CREPO_USER_AGENT";
/// Compile Time USER_AGENT_OVERRIDE
static USER_AGENT_DEFAULT: Option<&str> = option_env!("CREPO_DEFAULT_USER_AGENT");
/// Fall Back to `crepo/{VERSION}`
const BUILT_IN_DEFAULT_USER_AGENT: HeaderValue =
    HeaderValue::from_static(concat!("crepo/", env!("CARGO_PKG_VERSION")));
/// Redirects are always followed, up to this many hops.
pub const MAX_REDIRECTS: usize = 10;
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error(transparent)]
    HttpReqwestClientBuilderError(#[from] reqwest::Error),
}
/// First Pulls [USER_AGENT_ENV_KEY] then falls back to [USER_AGENT_DEFAULT] and finally [BUILT_IN_DEFAULT_USER_AGENT]
fn default_user_agent() -> HeaderValue {
    if let Ok(user_agent) = std::env::var(USER_AGENT_ENV_KEY) {
        match HeaderValue::from_str(&user_agent) {
            Ok(header) => return header,
            Err(err) => {
                error!(
                    ?err,
                    ?user_agent,
                    "Invalid user agent from environment variable, using default"
                );
            }
        }
    }
    if let Some(user_agent) = USER_AGENT_DEFAULT {
        match HeaderValue::from_str(user_agent) {
            Ok(header) => return header,
            Err(err) => {
                error!(?err, user_agent, "Invalid compile time user agent, using default");
            }
        }
    }
    BUILT_IN_DEFAULT_USER_AGENT
}
/// Builds a [CrepoClient] over [reqwest].
///
/// Certificate verification is off so self-signed test stacks work.
#[derive(Debug)]
pub struct CrepoClientBuilder {
    config: Option<RepoConfig>,
    client_builder: ClientBuilder,
}
impl Default for CrepoClientBuilder {
    fn default() -> Self {
        Self {
            config: None,
            client_builder: Client::builder()
                .user_agent(default_user_agent())
                .danger_accept_invalid_certs(true)
                .redirect(Policy::limited(MAX_REDIRECTS)),
        }
    }
}
impl CrepoClientBuilder {
    pub fn http_client_builder<F>(mut self, builder: F) -> Self
    where
        F: FnOnce(ClientBuilder) -> ClientBuilder,
    {
        self.client_builder = builder(self.client_builder);
        self
    }
    pub fn with_config(mut self, config: RepoConfig) -> Self {
        self.config = Some(config);
        self
    }
    /// Uses [RepoConfig::load] when no configuration was given.
    pub fn build(self) -> Result<CrepoClient, BuilderError> {
        let config = match self.config {
            Some(config) => config,
            None => {
                let config = RepoConfig::load()?;
                debug!(?config, "Loaded repository configuration");
                config
            }
        };
        let http_client = self.client_builder.timeout(config.timeout()).build()?;
        CrepoClient::with_http_client(config, http_client)
    }
}
impl<Client: HttpClient> CrepoClient<Client> {
    /// Wraps an existing transport. No certificate or redirect settings are applied to it.
    pub fn with_http_client(config: RepoConfig, http_client: Client) -> Result<Self, BuilderError> {
        let base_url = config.api_base_url()?;
        let inner = CrepoClientInner {
            http_client,
            config,
            base_url,
        };
        Ok(CrepoClient {
            client: Arc::new(inner),
        })
    }
}
