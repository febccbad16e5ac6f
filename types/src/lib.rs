pub mod article;
pub mod bucket;
pub mod error;
pub mod response;
use thiserror::Error;
pub mod xml;
#[derive(Debug, Error)]
pub enum ContentParseError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    QuickXML(#[from] quick_xml::Error),
    #[error(transparent)]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("Unexpected closing tag `{0}`")]
    UnexpectedEndTag(String),
    #[error("Expected a JSON object or an array of objects, found {0}")]
    UnexpectedJson(&'static str),
    #[error("Document has no root element")]
    NoRootElement,
    #[error("Element `{0}` was never closed")]
    UnclosedElement(String),
}
