use std::{borrow::Cow, time::Duration};

use bytes::Bytes;
use crepo_types::{ContentParseError, response::JsonView};
use http::{HeaderMap, Method, StatusCode};
use url::Url;

use crate::{InvalidResponseBody, client::HttpResponseError, verify::VerifyError};

/// Everything the client kept from one HTTP exchange.
///
/// Every call on the action layer returns a fresh snapshot, whatever the status code.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) elapsed: Duration,
}
impl ResponseSnapshot {
    pub fn method(&self) -> &Method {
        &self.method
    }
    /// The URL that was requested, before redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }
    pub fn status(&self) -> StatusCode {
        self.status
    }
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
    pub fn body(&self) -> &Bytes {
        &self.body
    }
    /// Time between sending the request and receiving the last byte of the body.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
    pub fn utf8_text(&self) -> Result<&str, InvalidResponseBody> {
        std::str::from_utf8(&self.body).map_err(|source| InvalidResponseBody {
            url: self.url.clone(),
            source,
        })
    }
    /// Parses the body as a repository JSON response.
    pub fn json(&self) -> Result<JsonView, ContentParseError> {
        JsonView::parse(&self.body)
    }
    pub fn verify_http_code_is(&self, code: StatusCode) -> Result<(), VerifyError> {
        if self.status != code {
            return Err(VerifyError::StatusMismatch {
                expected: code,
                actual: self.status,
            });
        }
        Ok(())
    }
    /// Turns a non-2xx snapshot into an error.
    pub fn error_for_status(self) -> Result<Self, HttpResponseError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(HttpResponseError::Response(self))
        }
    }
}
#[cfg(test)]
pub(crate) fn snapshot(status: u16, body: &'static str) -> ResponseSnapshot {
    ResponseSnapshot {
        method: Method::GET,
        url: Url::parse("http://localhost:8080/buckets").unwrap(),
        status: StatusCode::from_u16(status).unwrap(),
        headers: HeaderMap::new(),
        body: Bytes::from_static(body.as_bytes()),
        elapsed: Duration::from_millis(1),
    }
}
