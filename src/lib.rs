use std::fmt::Display;

pub use crepo_types as types;
pub use http;
use http::header::InvalidHeaderValue;
use thiserror::Error;
use crepo_types::ContentParseError;

use crate::client::HttpResponseError;
pub mod client;
pub mod command;
#[cfg(test)]
pub mod test;
pub mod utils;
pub mod verify;
pub type CrepoResult<T> = Result<T, CrepoError>;
#[derive(Debug, Error)]
pub enum CrepoError {
    #[error(transparent)]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),
    #[error(transparent)]
    URLParseError(#[from] url::ParseError),
    #[error("URL `{0}` can not be used as a base for repository paths")]
    CannotBeABase(url::Url),
    #[error(transparent)]
    ContentError(#[from] ContentParseError),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    InvalidBody(#[from] InvalidResponseBody),
    #[error(transparent)]
    HttpError(Box<HttpResponseError>),
}
impl From<HttpResponseError> for CrepoError {
    fn from(error: HttpResponseError) -> Self {
        CrepoError::HttpError(Box::new(error))
    }
}
impl From<reqwest::Error> for CrepoError {
    fn from(error: reqwest::Error) -> Self {
        let response = HttpResponseError::from(error);
        Self::from(response)
    }
}
/// A response body that was expected to be text but was not UTF-8.
#[derive(Debug, Error)]
pub struct InvalidResponseBody {
    pub url: url::Url,
    #[source]
    pub source: std::str::Utf8Error,
}
impl Display for InvalidResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Response body from `{}` is not valid UTF-8", self.url)
    }
}
