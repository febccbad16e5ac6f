//! Assertion style checks over repository responses.
//!
//! Every check returns `Err` on mismatch so a test can `?` it or `unwrap` it.
use crepo_types::{
    ContentParseError,
    response::{FieldError, MissingField},
};
use http::StatusCode;
use thiserror::Error;

use crate::client::ResponseSnapshot;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Expected HTTP status {expected} but got {actual}")]
    StatusMismatch {
        expected: StatusCode,
        actual: StatusCode,
    },
    #[error(transparent)]
    MissingField(#[from] MissingField),
    #[error("Field `{field}` should be {expected} but is `{found}`")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
    #[error("Response body is not a repository JSON document: {0}")]
    NotJson(#[from] ContentParseError),
    #[error("{name:?} not found in {buckets:?}")]
    BucketNotListed { name: String, buckets: Vec<String> },
    #[error("{name:?} found in {buckets:?}")]
    BucketListed { name: String, buckets: Vec<String> },
    #[error("{expected:?} is not in {actual:?}")]
    BucketNameMismatch { expected: String, actual: String },
    #[error("Bucket {name:?} has no active objects")]
    NoActiveObjects { name: String },
}
impl From<FieldError> for VerifyError {
    fn from(error: FieldError) -> Self {
        match error {
            FieldError::Missing(missing) => VerifyError::MissingField(missing),
            FieldError::WrongType {
                field,
                expected,
                found,
            } => VerifyError::WrongType {
                field,
                expected,
                found,
            },
        }
    }
}
/// Checks the status code, then the fields a response with that status must carry.
///
/// A 2xx response must name a bucket with its creation date and timestamp. Any other
/// response must carry `repoErrorCode` and `message`. Neither branch looks at the other's fields.
pub fn verify_http_status(response: &ResponseSnapshot, code: StatusCode) -> Result<(), VerifyError> {
    response.verify_http_code_is(code)?;
    let view = response.json()?;
    if code.is_success() {
        view.bucket_name()?;
        view.creation_date()?;
        view.timestamp()?;
    } else {
        view.repo_error_code()?;
        view.message()?;
    }
    Ok(())
}
