//! A small owned element tree for read-only querying of XML documents.
//!
//! Built from [quick_xml] events. Only elements, attributes and text are kept,
//! everything else (comments, processing instructions, doctype) is dropped.
use std::borrow::Cow;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::ContentParseError;
mod path;
pub use path::{ElementPath, PathError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}
impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }
    /// Parses a whole document and returns its root element.
    pub fn parse(xml: &str) -> Result<Self, ContentParseError> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(start) => {
                    stack.push(Element::from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = Element::from_start(&start)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(end) => {
                    let element = stack.pop().ok_or_else(|| {
                        ContentParseError::UnexpectedEndTag(
                            String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                        )
                    })?;
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        let value = match text.unescape() {
                            Ok(value) => value.into_owned(),
                            // Entities declared by an external DTD are kept verbatim.
                            Err(_) => String::from_utf8_lossy(&text).into_owned(),
                        };
                        parent.children.push(Node::Text(value));
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .children
                            .push(Node::Text(String::from_utf8_lossy(&data).into_owned()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        if let Some(open) = stack.pop() {
            return Err(ContentParseError::UnclosedElement(open.name));
        }
        root.ok_or(ContentParseError::NoRootElement)
    }
    fn from_start(start: &BytesStart<'_>) -> Result<Self, ContentParseError> {
        let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
    /// Direct child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }
    /// All text below this element, concatenated in document order.
    pub fn text(&self) -> Cow<'_, str> {
        match self.children.as_slice() {
            [] => Cow::Borrowed(""),
            [Node::Text(text)] => Cow::Borrowed(text.as_str()),
            _ => {
                let mut text = String::new();
                self.collect_text(&mut text);
                Cow::Owned(text)
            }
        }
    }
    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }
    /// Every matching element, in document order.
    pub fn find_all(&self, path: &str) -> Result<Vec<&Element>, PathError> {
        let path = ElementPath::parse(path)?;
        Ok(path.select(self))
    }
    /// The first matching element.
    pub fn find(&self, path: &str) -> Result<Option<&Element>, PathError> {
        let path = ElementPath::parse(path)?;
        Ok(path.select(self).into_iter().next())
    }
}
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    }
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tree() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE article PUBLIC "-//NLM//DTD Journal Publishing DTD v3.0 20080202//EN" "journalpublishing3.dtd">
<article article-type="research-article" xml:lang="en">
  <!-- comment -->
  <front><title>Growth &amp; <italic>Decay</italic></title></front>
  <back><ack/></back>
</article>"#;
        let root = Element::parse(xml).unwrap();
        assert_eq!(root.name(), "article");
        assert_eq!(root.attribute("xml:lang"), Some("en"));
        assert_eq!(root.child_elements().count(), 2);
        let title = root.find("./front/title").unwrap().unwrap();
        assert_eq!(title.text(), "Growth & Decay");
        assert!(root.find("./back/ack").unwrap().is_some());
    }
    #[test]
    fn unknown_entities_are_kept() {
        let root = Element::parse("<p>a&nbsp;b</p>").unwrap();
        assert_eq!(root.text(), "a&nbsp;b");
    }
    #[test]
    fn malformed() {
        assert!(Element::parse("").is_err());
        assert!(Element::parse("not xml at all").is_err());
        assert!(Element::parse("<a><b></a>").is_err());
        assert!(Element::parse("<a>").is_err());
    }
}
