use http::{HeaderMap, HeaderValue, header::ACCEPT};
pub mod url;

pub const JSON_HEADER_VALUE: HeaderValue = HeaderValue::from_static("application/json");
/// `yyyy-mm-dd hh:mm:ss`, the format the repository parses upload timestamps with
pub static TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Headers sent with every request unless the caller overrides them.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, JSON_HEADER_VALUE);
    headers
}
