use std::path::Path;

use http::StatusCode;
use tracing::{debug, instrument};

use crate::{
    CrepoError,
    client::{CrepoClient, ResponseSnapshot, http_client::HttpClient},
    command::object::{CreationMethod, DeleteObject, GetObject, UploadObject},
};
/// Object operations of the repository API.
#[derive(Debug, Clone)]
pub struct ObjectsClient<Client: HttpClient = reqwest::Client> {
    pub(crate) client: CrepoClient<Client>,
}
impl<Client: HttpClient> ObjectsClient<Client> {
    pub async fn upload_object(
        &self,
        upload: UploadObject<'_>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.client.execute_command(upload).await
    }
    /// Reads `path` and uploads it under `key`. The file name becomes the download name.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: impl AsRef<Path>,
        create: CreationMethod,
    ) -> Result<ResponseSnapshot, CrepoError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        debug!(bytes = data.len(), "Read upload from disk");
        let download_name = path.file_name().and_then(|name| name.to_str());
        let mut upload = UploadObject::new(bucket, key, data);
        upload.download_name = download_name;
        upload.create = create;
        self.upload_object(upload).await
    }
    pub async fn get_object(
        &self,
        bucket: &str,
        key: &str,
        version: Option<u32>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.client
            .execute_command(GetObject {
                bucket,
                key,
                version,
                fetch_metadata: false,
            })
            .await
    }
    pub async fn object_metadata(
        &self,
        bucket: &str,
        key: &str,
        version: Option<u32>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.client
            .execute_command(GetObject {
                bucket,
                key,
                version,
                fetch_metadata: true,
            })
            .await
    }
    /// The metadata call answered `200 OK`
    pub async fn object_exists(
        &self,
        bucket: &str,
        key: &str,
        version: Option<u32>,
    ) -> Result<bool, CrepoError> {
        let response = self.object_metadata(bucket, key, version).await?;
        Ok(response.status() == StatusCode::OK)
    }
    pub async fn delete_object(
        &self,
        bucket: &str,
        key: &str,
        version: Option<u32>,
    ) -> Result<ResponseSnapshot, CrepoError> {
        self.client
            .execute_command(DeleteObject {
                bucket,
                key,
                version,
            })
            .await
    }
}
