use std::time::Instant;

use http::{HeaderMap, Method};
use tracing::{Instrument, debug, field::Empty, info};
use url::Url;

use crate::{
    CrepoError,
    client::{ResponseSnapshot, http_client::HttpClient, settings::RepoConfig},
    command::RequestData,
    utils::default_headers,
};
#[derive(Debug)]
pub(crate) struct CrepoClientInner<Client: HttpClient = reqwest::Client> {
    pub(crate) http_client: Client,
    pub(crate) config: RepoConfig,
    pub(crate) base_url: Url,
}
impl<Client: HttpClient> CrepoClientInner<Client> {
    /// Sends exactly one request and captures the whole response.
    ///
    /// Any status code is a successful call. Only transport failures are errors.
    pub(crate) async fn do_request(
        &self,
        method: Method,
        url: Url,
        data: RequestData,
        headers: Option<HeaderMap>,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        let span = tracing::debug_span!(
            "CREPO Request",
            method = method.as_str(),
            %url,
            status_code = Empty,
            elapsed_ms = Empty
        );
        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .timeout(self.config.timeout())
            .headers(default_headers());
        if let Some(headers) = headers {
            request = request.headers(headers);
        }
        if let Some(params) = params {
            request = request.query(params);
        }
        let request = data.apply(request).build()?;

        let started = Instant::now();
        let response = self
            .http_client
            .execute(request)
            .instrument(span.clone())
            .await?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response.bytes().instrument(span.clone()).await?;
        let elapsed = started.elapsed();

        span.record("status_code", status.as_u16());
        span.record("elapsed_ms", elapsed.as_millis() as u64);
        span.in_scope(|| debug!(body_len = body.len(), "CREPO Request Responded"));
        if self.config.print_debug {
            info!(parent: &span, body = %String::from_utf8_lossy(&body), "API Response");
        }
        Ok(ResponseSnapshot {
            method,
            url,
            status,
            headers: response_headers,
            body,
            elapsed,
        })
    }
}
