use std::fmt::Debug;

use reqwest::{Error, Request, RequestBuilder, Response};
use url::Url;

/// The transport under the action layer.
///
/// Requests are built with [HttpClient::request] and sent with [HttpClient::execute],
/// so an implementation can answer without touching the network.
pub trait HttpClient: Send + Sync + Debug + Clone {
    fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder;

    fn execute(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send;
}

impl HttpClient for reqwest::Client {
    fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        self.request(method, url)
    }

    fn execute(&self, request: Request) -> impl Future<Output = Result<Response, Error>> + Send {
        self.execute(request)
    }
}
