use http::Method;
use url::Url;

use crate::{
    CrepoError,
    command::{CommandType, RequestData},
    utils::url::RepoUrlExt,
};
pub static BUCKETS_PATH: &str = "buckets";

/// `GET /buckets`
#[derive(Debug, Clone, Copy, Default)]
pub struct ListBuckets;
impl CommandType for ListBuckets {
    fn name(&self) -> &'static str {
        "ListBuckets"
    }
    fn http_method(&self) -> Method {
        Method::GET
    }
    fn update_url(&self, url: &mut Url) -> Result<(), CrepoError> {
        url.append_segments([BUCKETS_PATH])
    }
}
/// `POST /buckets` with the form `name={name}`
///
/// Without a name the request is sent with an empty body and the repository decides how to answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateBucket<'request> {
    pub name: Option<&'request str>,
    pub id: Option<&'request str>,
}
impl CommandType for CreateBucket<'_> {
    fn name(&self) -> &'static str {
        "CreateBucket"
    }
    fn http_method(&self) -> Method {
        Method::POST
    }
    fn update_url(&self, url: &mut Url) -> Result<(), CrepoError> {
        url.append_segments([BUCKETS_PATH])
    }
    fn into_body(self) -> Result<RequestData, CrepoError> {
        let Some(name) = self.name else {
            return Ok(RequestData::Empty);
        };
        let mut form = vec![("name", name)];
        if let Some(id) = self.id {
            form.push(("id", id));
        }
        Ok(RequestData::form(form))
    }
}
/// `GET /buckets/{name}`
#[derive(Debug, Clone, Copy)]
pub struct GetBucket<'request> {
    pub name: &'request str,
}
impl CommandType for GetBucket<'_> {
    fn name(&self) -> &'static str {
        "GetBucket"
    }
    fn http_method(&self) -> Method {
        Method::GET
    }
    fn update_url(&self, url: &mut Url) -> Result<(), CrepoError> {
        url.append_segments([BUCKETS_PATH, self.name])
    }
}
/// `DELETE /buckets/{name}`
#[derive(Debug, Clone, Copy)]
pub struct DeleteBucket<'request> {
    pub name: &'request str,
}
impl CommandType for DeleteBucket<'_> {
    fn name(&self) -> &'static str {
        "DeleteBucket"
    }
    fn http_method(&self) -> Method {
        Method::DELETE
    }
    fn update_url(&self, url: &mut Url) -> Result<(), CrepoError> {
        url.append_segments([BUCKETS_PATH, self.name])
    }
}
#[cfg(test)]
mod tests {
    use super::*;

    fn url_for(command: impl CommandType) -> String {
        let mut url = Url::parse("http://localhost:8080/v1").unwrap();
        command.update_url(&mut url).unwrap();
        url.to_string()
    }
    #[test]
    fn urls() {
        assert_eq!(url_for(ListBuckets), "http://localhost:8080/v1/buckets");
        assert_eq!(
            url_for(GetBucket { name: "corpus" }),
            "http://localhost:8080/v1/buckets/corpus"
        );
        assert_eq!(
            url_for(DeleteBucket { name: "a b" }),
            "http://localhost:8080/v1/buckets/a%20b"
        );
    }
    #[test]
    fn create_body() {
        let body = CreateBucket {
            name: Some("plos-bucket"),
            id: None,
        }
        .into_body()
        .unwrap();
        match body {
            RequestData::Form(pairs) => {
                assert_eq!(pairs, vec![("name".to_owned(), "plos-bucket".to_owned())])
            }
            other => panic!("unexpected body {other:?}"),
        }
        let body = CreateBucket {
            name: Some("plos-bucket"),
            id: Some("7"),
        }
        .into_body()
        .unwrap();
        assert!(matches!(body, RequestData::Form(pairs) if pairs.len() == 2));
        assert!(CreateBucket::default().into_body().unwrap().is_empty());
    }
}
