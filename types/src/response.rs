use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{ContentParseError, error::RepoErrorCode};

/// Returned when a response body does not carry the requested field.
///
/// `null` values count as missing. An empty string is present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Field `{field}` is absent from the response body")]
pub struct MissingField {
    pub field: &'static str,
}
impl MissingField {
    pub const fn new(field: &'static str) -> Self {
        Self { field }
    }
}
/// Why a field could not be read from an otherwise readable body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error(transparent)]
    Missing(#[from] MissingField),
    #[error("Field `{field}` should be {expected} but is `{found}`")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
}
impl FieldError {
    fn wrong_type(field: &'static str, expected: &'static str, found: &Value) -> Self {
        FieldError::WrongType {
            field,
            expected,
            found: found.to_string(),
        }
    }
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldError::Missing(_))
    }
}
/// Turns a missing field into `None`. A field of the wrong type stays an error.
pub fn optional<T>(result: Result<T, FieldError>) -> Result<Option<T>, FieldError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(FieldError::Missing(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
const BUCKET_NAME: (&str, &[&str]) = ("bucketName", &["bucketName"]);
const BUCKET_ID: (&str, &[&str]) = ("bucketID", &["bucketID", "bucketId", "id"]);
const CREATION_DATE: (&str, &[&str]) = ("creationDate", &["creationDate"]);
const TIMESTAMP: (&str, &[&str]) = ("timestamp", &["timestamp"]);
const ACTIVE_OBJECTS: (&str, &[&str]) = ("activeObjects", &["activeObjects", "activeObjectCount"]);
const TOTAL_OBJECTS: (&str, &[&str]) = ("totalObjects", &["totalObjects", "totalObjectCount"]);
const REPO_ERROR_CODE: (&str, &[&str]) = ("repoErrorCode", &["repoErrorCode", "errorCode"]);
const MESSAGE: (&str, &[&str]) = ("message", &["message"]);

/// One JSON object of a repository response.
///
/// Fields are only typed when read, so one odd value does not hide the others.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RepoFields(Map<String, Value>);
impl From<Map<String, Value>> for RepoFields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
impl RepoFields {
    /// The raw value under `key`, `null` included.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
    fn value(&self, (field, keys): (&'static str, &[&str])) -> Result<&Value, MissingField> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
            .ok_or(MissingField::new(field))
    }
    fn string(&self, field: (&'static str, &[&str])) -> Result<&str, FieldError> {
        let value = self.value(field)?;
        value
            .as_str()
            .ok_or_else(|| FieldError::wrong_type(field.0, "a string", value))
    }
    fn unsigned(&self, field: (&'static str, &[&str])) -> Result<u64, FieldError> {
        let value = self.value(field)?;
        value
            .as_u64()
            .ok_or_else(|| FieldError::wrong_type(field.0, "an unsigned integer", value))
    }
    pub fn bucket_name(&self) -> Result<&str, FieldError> {
        self.string(BUCKET_NAME)
    }
    pub fn bucket_id(&self) -> Result<i64, FieldError> {
        let value = self.value(BUCKET_ID)?;
        value
            .as_i64()
            .ok_or_else(|| FieldError::wrong_type(BUCKET_ID.0, "an integer", value))
    }
    pub fn creation_date(&self) -> Result<&str, FieldError> {
        self.string(CREATION_DATE)
    }
    pub fn timestamp(&self) -> Result<&str, FieldError> {
        self.string(TIMESTAMP)
    }
    pub fn active_objects(&self) -> Result<u64, FieldError> {
        self.unsigned(ACTIVE_OBJECTS)
    }
    pub fn total_objects(&self) -> Result<u64, FieldError> {
        self.unsigned(TOTAL_OBJECTS)
    }
    pub fn repo_error_code(&self) -> Result<RepoErrorCode, FieldError> {
        let value = self.value(REPO_ERROR_CODE)?;
        value
            .as_u64()
            .and_then(|code| u32::try_from(code).ok())
            .map(RepoErrorCode::from_code)
            .ok_or_else(|| FieldError::wrong_type(REPO_ERROR_CODE.0, "an error code", value))
    }
    pub fn message(&self) -> Result<&str, FieldError> {
        self.string(MESSAGE)
    }
    /// Fields every successful bucket response carries.
    pub fn require_bucket_fields(&self) -> Result<(), FieldError> {
        self.bucket_name()?;
        self.creation_date()?;
        self.timestamp()?;
        Ok(())
    }
    /// Fields every failed response carries.
    pub fn require_error_fields(&self) -> Result<(), FieldError> {
        self.repo_error_code()?;
        self.message()?;
        Ok(())
    }
}
/// Parsed view over a JSON response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonView {
    Collection(Vec<RepoFields>),
    Single(RepoFields),
}
impl JsonView {
    /// Fails only when the body is not JSON, or is JSON but neither an object nor an array of objects.
    pub fn parse(body: &[u8]) -> Result<Self, ContentParseError> {
        match serde_json::from_slice(body)? {
            Value::Object(fields) => Ok(JsonView::Single(fields.into())),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(fields) => Ok(RepoFields::from(fields)),
                    other => Err(ContentParseError::UnexpectedJson(json_kind(&other))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(JsonView::Collection),
            other => Err(ContentParseError::UnexpectedJson(json_kind(&other))),
        }
    }
    /// The entries of a collection, or the single object as a one element slice.
    pub fn entries(&self) -> &[RepoFields] {
        match self {
            JsonView::Collection(entries) => entries,
            JsonView::Single(fields) => std::slice::from_ref(fields),
        }
    }
    /// The top level object.
    ///
    /// A collection has no top level fields so every accessor on it reports the field as missing.
    fn fields(&self, field: &'static str) -> Result<&RepoFields, FieldError> {
        match self {
            JsonView::Single(fields) => Ok(fields),
            JsonView::Collection(_) => Err(MissingField::new(field).into()),
        }
    }
    pub fn bucket_name(&self) -> Result<&str, FieldError> {
        self.fields(BUCKET_NAME.0)?.bucket_name()
    }
    pub fn bucket_id(&self) -> Result<i64, FieldError> {
        self.fields(BUCKET_ID.0)?.bucket_id()
    }
    pub fn creation_date(&self) -> Result<&str, FieldError> {
        self.fields(CREATION_DATE.0)?.creation_date()
    }
    pub fn timestamp(&self) -> Result<&str, FieldError> {
        self.fields(TIMESTAMP.0)?.timestamp()
    }
    pub fn active_objects(&self) -> Result<u64, FieldError> {
        self.fields(ACTIVE_OBJECTS.0)?.active_objects()
    }
    pub fn total_objects(&self) -> Result<u64, FieldError> {
        self.fields(TOTAL_OBJECTS.0)?.total_objects()
    }
    pub fn repo_error_code(&self) -> Result<RepoErrorCode, FieldError> {
        self.fields(REPO_ERROR_CODE.0)?.repo_error_code()
    }
    pub fn message(&self) -> Result<&str, FieldError> {
        self.fields(MESSAGE.0)?.message()
    }
}
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
#[cfg(test)]
mod tests {
    use super::*;

    fn missing(field: &'static str) -> FieldError {
        MissingField::new(field).into()
    }
    #[test]
    fn single_bucket() {
        let body = br#"{
            "bucketName": "corpus",
            "bucketID": 4,
            "creationDate": "2014-09-10 11:24:09.0",
            "timestamp": "2014-09-10 11:24:09.0",
            "activeObjects": 12,
            "totalObjects": 14
        }"#;
        let view = JsonView::parse(body).unwrap();
        assert_eq!(view.bucket_name(), Ok("corpus"));
        assert_eq!(view.bucket_id(), Ok(4));
        assert_eq!(view.active_objects(), Ok(12));
        assert_eq!(view.total_objects(), Ok(14));
        assert_eq!(view.repo_error_code(), Err(missing("repoErrorCode")));
    }
    #[test]
    fn error_body() {
        let body = br#"{"repoErrorCode": 2, "message": "Bucket not found"}"#;
        let view = JsonView::parse(body).unwrap();
        assert_eq!(view.repo_error_code(), Ok(RepoErrorCode::BucketNotFound));
        assert_eq!(view.message(), Ok("Bucket not found"));
        assert_eq!(view.bucket_name(), Err(missing("bucketName")));
        assert!(view.entries()[0].require_error_fields().is_ok());
        assert!(view.entries()[0].require_bucket_fields().is_err());
    }
    #[test]
    fn empty_is_present_null_is_missing() {
        let view = JsonView::parse(br#"{"bucketName": "", "message": null}"#).unwrap();
        assert_eq!(view.bucket_name(), Ok(""));
        assert_eq!(view.message(), Err(missing("message")));
    }
    #[test]
    fn aliases() {
        let view = JsonView::parse(
            br#"{"bucketId": 7, "activeObjectCount": 1, "totalObjectCount": 2, "errorCode": 53}"#,
        )
        .unwrap();
        assert_eq!(view.bucket_id(), Ok(7));
        assert_eq!(view.active_objects(), Ok(1));
        assert_eq!(view.total_objects(), Ok(2));
        assert_eq!(view.repo_error_code(), Ok(RepoErrorCode::BucketAlreadyExists));
    }
    #[test]
    fn wrong_type_does_not_hide_other_fields() {
        let view = JsonView::parse(
            br#"{"bucketName": "corpus", "bucketID": "7", "timestamp": 1410348249000, "repoErrorCode": "2"}"#,
        )
        .unwrap();
        assert_eq!(view.bucket_name(), Ok("corpus"));
        assert!(matches!(
            view.bucket_id(),
            Err(FieldError::WrongType { field: "bucketID", .. })
        ));
        assert!(matches!(
            view.timestamp(),
            Err(FieldError::WrongType { field: "timestamp", .. })
        ));
        assert!(matches!(
            view.repo_error_code(),
            Err(FieldError::WrongType { field: "repoErrorCode", .. })
        ));
        assert!(!view.timestamp().unwrap_err().is_missing());
        assert_eq!(optional(view.creation_date()), Ok(None));
        assert!(optional(view.bucket_id()).is_err());
    }
    #[test]
    fn collection() {
        let view = JsonView::parse(
            br#"[{"bucketName": "corpus"}, {"bucketName": "plos-bucket"}]"#,
        )
        .unwrap();
        let names: Vec<_> = view
            .entries()
            .iter()
            .map(|entry| entry.bucket_name().unwrap())
            .collect();
        assert_eq!(names, vec!["corpus", "plos-bucket"]);
        assert_eq!(view.bucket_name(), Err(missing("bucketName")));
    }
    #[test]
    fn not_json() {
        assert!(matches!(
            JsonView::parse(b"Created bucket corpus"),
            Err(ContentParseError::Json(_))
        ));
        assert!(matches!(
            JsonView::parse(b"[1, 2]"),
            Err(ContentParseError::UnexpectedJson("a number"))
        ));
        assert!(matches!(
            JsonView::parse(b"\"corpus\""),
            Err(ContentParseError::UnexpectedJson("a string"))
        ));
    }
}
