//! Facts extracted from JATS style journal article XML.
use thiserror::Error;

use crate::{
    ContentParseError,
    xml::{Element, PathError},
};

pub const AUTHOR_CONTRIBS: &str = ".//contrib[@contrib-type='author']";
pub const EQUAL_CONTRIBS: &str = ".//contrib[@equal-contrib='yes']";
pub const CORRESP_XREF: &str = "./xref[@ref-type='corresp']";
pub const FOOTNOTE_XREF: &str = "./xref[@ref-type='fn']";

pub const ABSTRACT_SECTION: &str = "Abstract";
pub const ACKNOWLEDGMENTS_SECTION: &str = "Acknowledgments";
pub const AUTHOR_CONTRIBUTIONS_SECTION: &str = "Author Contributions";
pub const PATIENT_SUMMARY_SECTION: &str = "Patient Summary";

/// Object key of an article's XML in the repository.
pub fn article_key(article: &str) -> String {
    format!("{article}.XML")
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Content(#[from] ContentParseError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Contributor has no given-names/surname pair and no collab name")]
    NoContributorName,
    #[error("`{0}` element has no title")]
    MissingTitle(&'static str),
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// Built from `name/given-names` and `name/surname`
    Personal,
    /// Taken from `collab`
    Collab,
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName {
    pub name: String,
    pub source: NameSource,
}
/// Which contributors an author query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorFilter {
    All,
    /// Authors with a `corresp` cross reference
    Corresponding,
    /// Contributors marked `equal-contrib="yes"`
    CoContributing,
    /// Authors with a footnote cross reference
    Footnoted,
}
impl AuthorFilter {
    fn contributors(&self) -> &'static str {
        match self {
            AuthorFilter::CoContributing => EQUAL_CONTRIBS,
            _ => AUTHOR_CONTRIBS,
        }
    }
    fn required_xref(&self) -> Option<&'static str> {
        match self {
            AuthorFilter::Corresponding => Some(CORRESP_XREF),
            AuthorFilter::Footnoted => Some(FOOTNOTE_XREF),
            _ => None,
        }
    }
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDocument {
    root: Element,
}
impl ArticleDocument {
    pub fn parse(xml: &str) -> Result<Self, ContentParseError> {
        Ok(Self {
            root: Element::parse(xml)?,
        })
    }
    pub fn root(&self) -> &Element {
        &self.root
    }
    /// Appends the names of the matching contributors to `out`.
    ///
    /// Stops at the first contributor without a usable name, leaving the names found so far in `out`.
    pub fn collect_authors(
        &self,
        filter: AuthorFilter,
        out: &mut Vec<AuthorName>,
    ) -> Result<(), ExtractError> {
        for contrib in self.root.find_all(filter.contributors())? {
            if let Some(xref) = filter.required_xref() {
                if contrib.find(xref)?.is_none() {
                    continue;
                }
            }
            out.push(contributor_name(contrib)?);
        }
        Ok(())
    }
    /// Appends the section titles of the article to `out`, in reading order.
    ///
    /// A patient summary abstract is reported last, after the reference lists.
    pub fn collect_sections(&self, out: &mut Vec<String>) -> Result<(), ExtractError> {
        let mut patient_summary = false;
        for abstract_element in self.root.find_all(".//front/article-meta/abstract")? {
            match abstract_element.attribute("abstract-type") {
                None => out.push(ABSTRACT_SECTION.to_owned()),
                Some("toc") => continue,
                Some("patient") => patient_summary = true,
                Some(_) => out.push(required_title(abstract_element, "abstract")?),
            }
        }
        for section in self.root.find_all(".//body/sec")? {
            if let Some(title) = section.find("./title")? {
                let title = title.text();
                let title = title.trim();
                if !title.is_empty() {
                    out.push(title.to_owned());
                }
            }
        }
        if !self.root.find_all(".//back/ack")?.is_empty() {
            out.push(ACKNOWLEDGMENTS_SECTION.to_owned());
        }
        if !self
            .root
            .find_all(".//front/article-meta/author-notes/fn[@fn-type='con']")?
            .is_empty()
        {
            out.push(AUTHOR_CONTRIBUTIONS_SECTION.to_owned());
        }
        for references in self.root.find_all(".//back/ref-list")? {
            out.push(required_title(references, "ref-list")?);
        }
        if patient_summary {
            out.push(PATIENT_SUMMARY_SECTION.to_owned());
        }
        Ok(())
    }
    pub fn authors(&self, filter: AuthorFilter) -> Result<Vec<AuthorName>, ExtractError> {
        let mut authors = Vec::new();
        self.collect_authors(filter, &mut authors)?;
        Ok(authors)
    }
    pub fn sections(&self) -> Result<Vec<String>, ExtractError> {
        let mut sections = Vec::new();
        self.collect_sections(&mut sections)?;
        Ok(sections)
    }
}
fn contributor_name(contrib: &Element) -> Result<AuthorName, ExtractError> {
    let given = contrib.find("./name/given-names")?;
    let surname = contrib.find("./name/surname")?;
    if let (Some(given), Some(surname)) = (given, surname) {
        let (given, surname) = (given.text(), surname.text());
        let name = [given.trim(), surname.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !name.is_empty() {
            return Ok(AuthorName {
                name,
                source: NameSource::Personal,
            });
        }
    }
    let collab = contrib
        .find("./collab")?
        .ok_or(ExtractError::NoContributorName)?;
    Ok(AuthorName {
        name: collab.text().trim().to_owned(),
        source: NameSource::Collab,
    })
}
fn required_title(element: &Element, kind: &'static str) -> Result<String, ExtractError> {
    let title = element
        .find("./title")?
        .ok_or(ExtractError::MissingTitle(kind))?;
    Ok(title.text().trim().to_owned())
}
