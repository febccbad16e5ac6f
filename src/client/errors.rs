use std::{error::Error, fmt::Display};

use crate::client::ResponseSnapshot;
#[derive(Debug)]
pub enum HttpResponseError {
    /// The repository answered, but not with a status the operation accepts.
    Response(ResponseSnapshot),
    ReqwestError(reqwest::Error),
}
impl From<ResponseSnapshot> for HttpResponseError {
    fn from(response: ResponseSnapshot) -> Self {
        HttpResponseError::Response(response)
    }
}
impl From<reqwest::Error> for HttpResponseError {
    fn from(error: reqwest::Error) -> Self {
        HttpResponseError::ReqwestError(error)
    }
}
impl Display for HttpResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpResponseError::Response(response) => {
                write!(
                    f,
                    "HTTP Response Error: {} {} Status Code: {}",
                    response.method(),
                    response.url(),
                    response.status()
                )?;
            }
            HttpResponseError::ReqwestError(error) => write!(f, "Reqwest Error: {}", error)?,
        }
        Ok(())
    }
}
impl Error for HttpResponseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HttpResponseError::Response(_) => None,
            HttpResponseError::ReqwestError(error) => Some(error),
        }
    }
}
