use bytes::Bytes;
use reqwest::multipart::Form;

/// The payload of a request.
#[derive(Debug, Default)]
pub enum RequestData {
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
    Multipart(Form),
    Raw(Bytes),
}
impl RequestData {
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        RequestData::Form(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestData::Empty)
    }
    pub(crate) fn apply(self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            RequestData::Empty => builder,
            RequestData::Form(pairs) => builder.form(&pairs),
            RequestData::Json(value) => builder.json(&value),
            RequestData::Multipart(form) => builder.multipart(form),
            RequestData::Raw(bytes) => builder.body(bytes),
        }
    }
}
impl From<serde_json::Value> for RequestData {
    fn from(value: serde_json::Value) -> Self {
        RequestData::Json(value)
    }
}
impl From<Bytes> for RequestData {
    fn from(value: Bytes) -> Self {
        RequestData::Raw(value)
    }
}
