use std::sync::Arc;

mod article;
mod buckets;
mod builder;
mod objects;
pub(crate) mod response;
mod settings;
pub use article::ArticleClient;
pub use buckets::{BucketList, BucketResponse, BucketsClient};
pub use builder::{BuilderError, CrepoClientBuilder, MAX_REDIRECTS};
use http::HeaderMap;
pub use objects::ObjectsClient;
pub use response::ResponseSnapshot;
use tracing::debug;
pub mod http_client;
use url::Url;
pub(crate) mod inner;
use crate::{
    CrepoError,
    client::{http_client::HttpClient, inner::CrepoClientInner},
    command::{CommandType, RequestData},
    utils::url::RepoUrlExt,
};
mod errors;
pub use errors::*;
pub use settings::*;
/// Entry point to a content repository.
///
/// Cheap to clone. Every resource client opened from it shares the same transport and configuration.
#[derive(Debug, Clone)]
pub struct CrepoClient<Client: HttpClient = reqwest::Client> {
    pub(crate) client: Arc<CrepoClientInner<Client>>,
}
impl<Client: HttpClient> CrepoClient<Client> {
    pub fn config(&self) -> &RepoConfig {
        &self.client.config
    }
    pub fn base_url(&self) -> &Url {
        &self.client.base_url
    }
    pub fn default_bucket_name(&self) -> &str {
        self.client.config.default_bucket_name()
    }
    /// The API base URL with `segments` appended.
    pub fn endpoint<'segment>(
        &self,
        segments: impl IntoIterator<Item = &'segment str>,
    ) -> Result<Url, CrepoError> {
        let mut url = self.client.base_url.clone();
        url.append_segments(segments)?;
        Ok(url)
    }
    pub fn buckets(&self) -> BucketsClient<Client> {
        BucketsClient {
            client: self.clone(),
        }
    }
    pub fn objects(&self) -> ObjectsClient<Client> {
        ObjectsClient {
            client: self.clone(),
        }
    }
    pub fn articles(&self) -> ArticleClient<Client> {
        ArticleClient {
            client: self.clone(),
        }
    }
    /// Runs any [CommandType] against the API base URL.
    pub async fn execute_command<T>(&self, command: T) -> Result<ResponseSnapshot, CrepoError>
    where
        T: CommandType,
    {
        let name = command.name();
        let method = command.http_method();
        let mut url = self.client.base_url.clone();
        command.update_url(&mut url)?;
        let mut headers = HeaderMap::new();
        command.headers(&mut headers)?;
        let body = command.into_body()?;
        debug!(command = name, %url, "Executing CREPO command");

        self.client
            .do_request(method, url, body, Some(headers), None)
            .await
    }
    pub async fn do_get(
        &self,
        url: Url,
        params: Option<&[(&str, &str)]>,
        headers: Option<HeaderMap>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.client
            .do_request(http::Method::GET, url, RequestData::Empty, headers, params)
            .await
    }
    pub async fn do_post(
        &self,
        url: Url,
        data: RequestData,
        headers: Option<HeaderMap>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.client
            .do_request(http::Method::POST, url, data, headers, None)
            .await
    }
    pub async fn do_put(
        &self,
        url: Url,
        data: RequestData,
        headers: Option<HeaderMap>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.client
            .do_request(http::Method::PUT, url, data, headers, None)
            .await
    }
    /// Same as [CrepoClient::do_put]
    pub async fn do_update(
        &self,
        url: Url,
        data: RequestData,
        headers: Option<HeaderMap>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.do_put(url, data, headers).await
    }
    /// The data is always sent JSON encoded.
    pub async fn do_patch(
        &self,
        url: Url,
        data: serde_json::Value,
        headers: Option<HeaderMap>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.client
            .do_request(http::Method::PATCH, url, RequestData::Json(data), headers, None)
            .await
    }
    pub async fn do_delete(
        &self,
        url: Url,
        data: RequestData,
        headers: Option<HeaderMap>,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.client
            .do_request(http::Method::DELETE, url, data, headers, params)
            .await
    }
}
