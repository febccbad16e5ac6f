use crepo_types::{ContentParseError, bucket::Bucket, response::JsonView};
use http::StatusCode;
use tracing::debug;

use crate::{
    CrepoError,
    client::{CrepoClient, ResponseSnapshot, http_client::HttpClient},
    command::bucket::{CreateBucket, DeleteBucket, GetBucket, ListBuckets},
    verify::{self, VerifyError},
};
/// Bucket operations of the repository API.
#[derive(Debug, Clone)]
pub struct BucketsClient<Client: HttpClient = reqwest::Client> {
    pub(crate) client: CrepoClient<Client>,
}
impl<Client: HttpClient> BucketsClient<Client> {
    /// `GET /buckets`
    ///
    /// Fails if the body is not JSON. Entries without a `bucketName` are left out of
    /// [BucketList::names] but still checked by [BucketList::verify_get_buckets].
    pub async fn get_buckets(&self) -> Result<BucketList, CrepoError> {
        let response = self.client.execute_command(ListBuckets).await?;
        let view = response.json()?;
        let names: Vec<String> = view
            .entries()
            .iter()
            .filter_map(|entry| entry.bucket_name().ok().map(str::to_owned))
            .collect();
        debug!(buckets = names.len(), "Listed buckets");
        Ok(BucketList { response, names })
    }
    /// `POST /buckets`, with `name={name}` when a name is given
    pub async fn post_bucket(&self, name: Option<&str>) -> Result<BucketResponse, CrepoError> {
        self.post_bucket_with_id(name, None).await
    }
    /// Same as [BucketsClient::post_bucket] but also asks for a specific bucket id.
    pub async fn post_bucket_with_id(
        &self,
        name: Option<&str>,
        id: Option<&str>,
    ) -> Result<BucketResponse, CrepoError> {
        let response = self
            .client
            .execute_command(CreateBucket { name, id })
            .await?;
        Ok(BucketResponse { response })
    }
    /// `GET /buckets/{name}`
    pub async fn get_bucket(&self, name: &str) -> Result<BucketResponse, CrepoError> {
        let response = self.client.execute_command(GetBucket { name }).await?;
        Ok(BucketResponse { response })
    }
    /// `DELETE /buckets/{name}`
    pub async fn delete_bucket(&self, name: &str) -> Result<BucketResponse, CrepoError> {
        let response = self.client.execute_command(DeleteBucket { name }).await?;
        Ok(BucketResponse { response })
    }
    /// The bucket holding the corpus on the configured stack
    pub fn default_bucket_name(&self) -> &str {
        self.client.default_bucket_name()
    }
}
/// Response to a single bucket call. The body is parsed on demand.
#[derive(Debug, Clone)]
pub struct BucketResponse {
    response: ResponseSnapshot,
}
impl BucketResponse {
    pub fn snapshot(&self) -> &ResponseSnapshot {
        &self.response
    }
    pub fn into_snapshot(self) -> ResponseSnapshot {
        self.response
    }
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }
    pub fn json(&self) -> Result<JsonView, ContentParseError> {
        self.response.json()
    }
    pub fn verify_http_code_is(&self, code: StatusCode) -> Result<(), VerifyError> {
        self.response.verify_http_code_is(code)
    }
    /// See [verify::verify_http_status]
    pub fn verify_http_status(&self, code: StatusCode) -> Result<(), VerifyError> {
        verify::verify_http_status(&self.response, code)
    }
    /// The returned `bucketName` contains `name`.
    pub fn verify_get_bucket(&self, name: &str) -> Result<(), VerifyError> {
        let view = self.json()?;
        let actual = view.bucket_name()?;
        if !actual.contains(name) {
            return Err(VerifyError::BucketNameMismatch {
                expected: name.to_owned(),
                actual: actual.to_owned(),
            });
        }
        Ok(())
    }
    /// `201 Created` with the bucket fields, naming `name`.
    pub fn verify_post_bucket(&self, name: &str) -> Result<(), VerifyError> {
        self.verify_http_status(StatusCode::CREATED)?;
        self.verify_get_bucket(name)
    }
    /// The bucket has at least one active object.
    pub fn verify_default_bucket(&self) -> Result<(), VerifyError> {
        let view = self.json()?;
        if view.active_objects()? == 0 {
            return Err(VerifyError::NoActiveObjects {
                name: view.bucket_name().unwrap_or_default().to_owned(),
            });
        }
        Ok(())
    }
}
/// Response to `GET /buckets` with the bucket names it listed.
#[derive(Debug, Clone)]
pub struct BucketList {
    response: ResponseSnapshot,
    names: Vec<String>,
}
impl BucketList {
    pub fn snapshot(&self) -> &ResponseSnapshot {
        &self.response
    }
    pub fn names(&self) -> &[String] {
        &self.names
    }
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|bucket| bucket == name)
    }
    /// Every listed bucket as a typed [Bucket]. Fails on the first incomplete entry.
    pub fn buckets(&self) -> Result<Vec<Bucket>, VerifyError> {
        let view = self.response.json()?;
        let buckets = view
            .entries()
            .iter()
            .map(Bucket::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(buckets)
    }
    /// `200 OK` and every entry carries the bucket fields.
    pub fn verify_get_buckets(&self) -> Result<(), VerifyError> {
        self.response.verify_http_code_is(StatusCode::OK)?;
        for entry in self.response.json()?.entries() {
            entry.require_bucket_fields()?;
        }
        Ok(())
    }
    pub fn verify_has_bucket(&self, name: &str) -> Result<(), VerifyError> {
        if !self.contains(name) {
            return Err(VerifyError::BucketNotListed {
                name: name.to_owned(),
                buckets: self.names.clone(),
            });
        }
        Ok(())
    }
    pub fn verify_no_bucket(&self, name: &str) -> Result<(), VerifyError> {
        if self.contains(name) {
            return Err(VerifyError::BucketListed {
                name: name.to_owned(),
                buckets: self.names.clone(),
            });
        }
        Ok(())
    }
}
