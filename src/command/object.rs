use std::{fmt::Display, str::FromStr};

use bytes::Bytes;
use chrono::NaiveDateTime;
use http::Method;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use url::Url;

use crate::{
    CrepoError,
    command::{CommandType, RequestData},
    utils::{TIMESTAMP_FORMAT, url::RepoUrlExt},
};
pub static OBJECTS_PATH: &str = "objects";

/// How the repository should treat an upload whose key may already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationMethod {
    /// Fails if the key exists
    #[default]
    New,
    /// Fails if the key does not exist
    Version,
    /// Creates or versions as needed
    Auto,
}
impl CreationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreationMethod::New => "new",
            CreationMethod::Version => "version",
            CreationMethod::Auto => "auto",
        }
    }
}
impl Display for CreationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
#[derive(Debug, Error)]
#[error("Unknown creation method `{0}`, expected new, version or auto")]
pub struct UnknownCreationMethod(pub String);
impl FromStr for CreationMethod {
    type Err = UnknownCreationMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(CreationMethod::New),
            "version" => Ok(CreationMethod::Version),
            "auto" => Ok(CreationMethod::Auto),
            other => Err(UnknownCreationMethod(other.to_owned())),
        }
    }
}
/// `POST /objects` as `multipart/form-data`
#[derive(Debug, Clone)]
pub struct UploadObject<'request> {
    pub bucket: &'request str,
    pub key: &'request str,
    pub data: Bytes,
    pub content_type: Option<&'request str>,
    pub download_name: Option<&'request str>,
    pub create: CreationMethod,
    pub timestamp: Option<NaiveDateTime>,
    pub creation_date_time: Option<NaiveDateTime>,
}
impl<'request> UploadObject<'request> {
    pub fn new(bucket: &'request str, key: &'request str, data: impl Into<Bytes>) -> Self {
        Self {
            bucket,
            key,
            data: data.into(),
            content_type: None,
            download_name: None,
            create: CreationMethod::default(),
            timestamp: None,
            creation_date_time: None,
        }
    }
}
impl CommandType for UploadObject<'_> {
    fn name(&self) -> &'static str {
        "UploadObject"
    }
    fn http_method(&self) -> Method {
        Method::POST
    }
    fn update_url(&self, url: &mut Url) -> Result<(), CrepoError> {
        url.append_segments([OBJECTS_PATH, ""])
    }
    fn into_body(self) -> Result<RequestData, CrepoError> {
        let mut form = Form::new()
            .text("key", self.key.to_owned())
            .text("bucketName", self.bucket.to_owned())
            .text("create", self.create.as_str());
        if let Some(content_type) = self.content_type {
            form = form.text("contentType", content_type.to_owned());
        }
        if let Some(download_name) = self.download_name {
            form = form.text("downloadName", download_name.to_owned());
        }
        if let Some(timestamp) = self.timestamp {
            form = form.text("timestamp", timestamp.format(TIMESTAMP_FORMAT).to_string());
        }
        if let Some(created) = self.creation_date_time {
            form = form.text(
                "creationDateTime",
                created.format(TIMESTAMP_FORMAT).to_string(),
            );
        }
        let mut file = Part::bytes(self.data.to_vec())
            .file_name(self.download_name.unwrap_or(self.key).to_owned());
        if let Some(content_type) = self.content_type {
            file = file.mime_str(content_type)?;
        }
        Ok(RequestData::Multipart(form.part("file", file)))
    }
}
/// `GET /objects/{bucket}?key={key}`
#[derive(Debug, Clone, Copy, Default)]
pub struct GetObject<'request> {
    pub bucket: &'request str,
    pub key: &'request str,
    pub version: Option<u32>,
    /// Ask for the object's metadata instead of its content
    pub fetch_metadata: bool,
}
impl CommandType for GetObject<'_> {
    fn name(&self) -> &'static str {
        if self.fetch_metadata {
            "GetObjectMetadata"
        } else {
            "GetObject"
        }
    }
    fn http_method(&self) -> Method {
        Method::GET
    }
    fn update_url(&self, url: &mut Url) -> Result<(), CrepoError> {
        object_url(url, self.bucket, self.key, self.version)?;
        if self.fetch_metadata {
            url.query_pairs_mut().append_pair("fetchMetadata", "true");
        }
        Ok(())
    }
}
/// `DELETE /objects/{bucket}?key={key}`
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteObject<'request> {
    pub bucket: &'request str,
    pub key: &'request str,
    pub version: Option<u32>,
}
impl CommandType for DeleteObject<'_> {
    fn name(&self) -> &'static str {
        "DeleteObject"
    }
    fn http_method(&self) -> Method {
        Method::DELETE
    }
    fn update_url(&self, url: &mut Url) -> Result<(), CrepoError> {
        object_url(url, self.bucket, self.key, self.version)
    }
}
fn object_url(url: &mut Url, bucket: &str, key: &str, version: Option<u32>) -> Result<(), CrepoError> {
    url.append_segments([OBJECTS_PATH, bucket])?;
    url.query_pairs_mut().append_pair("key", key);
    if let Some(version) = version {
        url.query_pairs_mut()
            .append_pair("version", &version.to_string());
    }
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_urls() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let mut url = base.clone();
        GetObject {
            bucket: "corpus",
            key: "10.1371/journal.pone.0000001.XML",
            ..Default::default()
        }
        .update_url(&mut url)
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/objects/corpus?key=10.1371%2Fjournal.pone.0000001.XML"
        );

        let mut url = base.clone();
        GetObject {
            bucket: "corpus",
            key: "a",
            version: Some(2),
            fetch_metadata: true,
        }
        .update_url(&mut url)
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/objects/corpus?key=a&version=2&fetchMetadata=true"
        );

        let mut url = base.clone();
        UploadObject::new("corpus", "a", "data")
            .update_url(&mut url)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/objects/");
    }
    #[test]
    fn upload_is_multipart() {
        let mut upload = UploadObject::new("corpus", "a", "data");
        upload.content_type = Some("text/plain");
        upload.create = CreationMethod::Auto;
        let body = upload.into_body().unwrap();
        assert!(matches!(body, RequestData::Multipart(_)));
    }
    #[test]
    fn creation_method_names() {
        for method in [CreationMethod::New, CreationMethod::Version, CreationMethod::Auto] {
            assert_eq!(method.as_str().parse::<CreationMethod>().unwrap(), method);
        }
        assert!("replace".parse::<CreationMethod>().is_err());
    }
    #[test]
    fn invalid_content_type() {
        let mut upload = UploadObject::new("corpus", "a", "data");
        upload.content_type = Some("not a mime type");
        assert!(upload.into_body().is_err());
    }
}
