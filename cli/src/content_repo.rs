//! Thin client over the repository endpoints the command line needs.
//!
//! Results are raw: status checks come back as `bool` and everything else as the
//! [reqwest::Response] itself.
use std::path::Path;

use crepo::{CrepoError, command::object::CreationMethod, utils::url::RepoUrlExt};
use reqwest::{
    Client, Response, StatusCode,
    multipart::{Form, Part},
};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Error)]
pub enum ContentRepoError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Invalid repository server: {0}")]
    InvalidServer(#[from] url::ParseError),
    #[error(transparent)]
    Path(#[from] CrepoError),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}
/// `POST /objects/` arguments. Unset optional fields are left out of the form.
#[derive(Debug, Clone)]
pub struct ObjectUpload<'a> {
    pub bucket: &'a str,
    pub file: &'a Path,
    pub key: &'a str,
    pub content_type: Option<&'a str>,
    pub download_name: Option<&'a str>,
    pub create: CreationMethod,
    /// Sent as given, expected as `yyyy-mm-dd hh:mm:ss`
    pub timestamp: Option<&'a str>,
}
#[derive(Debug, Clone)]
pub struct ContentRepo {
    server: Url,
    client: Client,
}
impl ContentRepo {
    /// Pings `GET /info`. Fails only when the server cannot be reached.
    #[instrument]
    pub async fn connect(server: &str) -> Result<Self, ContentRepoError> {
        let repo = Self {
            server: Url::parse(server)?,
            client: Client::new(),
        };
        let info = repo.client.get(repo.endpoint(["info"])?).send().await?;
        debug!(status = %info.status(), "Repository answered");
        Ok(repo)
    }
    pub fn server(&self) -> &Url {
        &self.server
    }
    fn endpoint<'segment>(
        &self,
        segments: impl IntoIterator<Item = &'segment str>,
    ) -> Result<Url, ContentRepoError> {
        let mut url = self.server.clone();
        url.append_segments(segments)?;
        Ok(url)
    }
    /// The body of `GET /buckets/`
    pub async fn list_buckets(&self) -> Result<String, ContentRepoError> {
        let response = self
            .client
            .get(self.endpoint(["buckets", ""])?)
            .send()
            .await?;
        Ok(response.text().await?)
    }
    /// `true` when the bucket was created
    pub async fn create_bucket(&self, name: &str, id: Option<&str>) -> Result<bool, ContentRepoError> {
        let mut form = vec![("name", name)];
        if let Some(id) = id {
            form.push(("id", id));
        }
        let response = self
            .client
            .post(self.endpoint(["buckets", ""])?)
            .form(&form)
            .send()
            .await?;
        Ok(response.status() == StatusCode::CREATED)
    }
    /// `true` when the bucket was deleted
    pub async fn delete_bucket(&self, name: &str) -> Result<bool, ContentRepoError> {
        let response = self
            .client
            .delete(self.endpoint(["buckets", name])?)
            .send()
            .await?;
        Ok(response.status() == StatusCode::OK)
    }
    pub async fn upload_object(&self, upload: ObjectUpload<'_>) -> Result<Response, ContentRepoError> {
        let data = tokio::fs::read(upload.file).await?;
        let file_name = upload
            .file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| upload.key.to_owned());
        let mut form = Form::new()
            .text("key", upload.key.to_owned())
            .text("bucketName", upload.bucket.to_owned())
            .text("create", upload.create.as_str())
            .part("file", Part::bytes(data).file_name(file_name));
        if let Some(content_type) = upload.content_type {
            form = form.text("contentType", content_type.to_owned());
        }
        if let Some(download_name) = upload.download_name {
            form = form.text("downloadName", download_name.to_owned());
        }
        if let Some(timestamp) = upload.timestamp {
            form = form.text("timestamp", timestamp.to_owned());
        }
        let response = self
            .client
            .post(self.endpoint(["objects", ""])?)
            .multipart(form)
            .send()
            .await?;
        Ok(response)
    }
    pub async fn object_metadata(
        &self,
        bucket: &str,
        key: &str,
        version: Option<u32>,
    ) -> Result<Response, ContentRepoError> {
        let response = self
            .client
            .get(metadata_url(self.endpoint(["objects", bucket])?, key, version))
            .send()
            .await?;
        Ok(response)
    }
    /// `true` when the metadata call answers `200 OK`
    pub async fn object_exists(
        &self,
        bucket: &str,
        key: &str,
        version: Option<u32>,
    ) -> Result<bool, ContentRepoError> {
        let response = self.object_metadata(bucket, key, version).await?;
        Ok(response.status() == StatusCode::OK)
    }
}
fn metadata_url(mut url: Url, key: &str, version: Option<u32>) -> Url {
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("key", key);
        if let Some(version) = version {
            query.append_pair("version", &version.to_string());
        }
        query.append_pair("fetchMetadata", "true");
    }
    url
}
#[cfg(test)]
mod tests {
    use super::*;

    fn repo(server: &str) -> ContentRepo {
        ContentRepo {
            server: Url::parse(server).unwrap(),
            client: Client::new(),
        }
    }
    #[test]
    fn endpoints() {
        let repo = repo("http://localhost:8080/");
        assert_eq!(
            repo.endpoint(["buckets", ""]).unwrap().as_str(),
            "http://localhost:8080/buckets/"
        );
        assert_eq!(
            repo.endpoint(["buckets", "corpus"]).unwrap().as_str(),
            "http://localhost:8080/buckets/corpus"
        );
        let url = metadata_url(repo.endpoint(["objects", "corpus"]).unwrap(), "a b", Some(3));
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/objects/corpus?key=a+b&version=3&fetchMetadata=true"
        );
    }
    #[tokio::test]
    async fn connect_fails_when_unreachable() {
        let result = ContentRepo::connect("http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(ContentRepoError::Http(_))));
        assert!(matches!(
            ContentRepo::connect("not a url").await,
            Err(ContentRepoError::InvalidServer(_))
        ));
    }
}
