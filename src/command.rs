use http::HeaderMap;
use url::Url;
pub mod body;
pub mod bucket;
pub mod object;
use crate::CrepoError;
pub use body::RequestData;

/// One repository operation: where it goes, how it is sent and what it carries.
pub trait CommandType: Sized {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
    fn http_method(&self) -> http::Method;

    /// Receives the API base URL and turns it into the operation's URL.
    fn update_url(&self, _url: &mut Url) -> Result<(), CrepoError> {
        Ok(())
    }
    fn headers(&self, _base: &mut HeaderMap) -> Result<(), CrepoError> {
        Ok(())
    }
    fn into_body(self) -> Result<RequestData, CrepoError> {
        Ok(RequestData::default())
    }
}
