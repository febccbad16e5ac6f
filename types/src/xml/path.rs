use std::collections::HashSet;

use thiserror::Error;

use super::Element;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Path `{0}` is empty")]
    Empty(String),
    #[error("Path `{path}` has an invalid step `{step}`")]
    InvalidStep { path: String, step: String },
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributePredicate {
    name: String,
    value: Option<String>,
}
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    name: String,
    predicate: Option<AttributePredicate>,
}
impl Step {
    fn matches(&self, element: &Element) -> bool {
        if self.name != "*" && element.name() != self.name {
            return false;
        }
        match &self.predicate {
            None => true,
            Some(AttributePredicate { name, value: None }) => element.attribute(name).is_some(),
            Some(AttributePredicate {
                name,
                value: Some(value),
            }) => element.attribute(name) == Some(value.as_str()),
        }
    }
}
/// The subset of ElementTree style paths used for querying article XML.
///
/// Supported: `tag`, `*`, `./a/b`, `.//a`, `a//b` and one attribute predicate
/// per step, either `[@name]` or `[@name='value']`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath {
    steps: Vec<Step>,
}
impl ElementPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let invalid = |step: &str| PathError::InvalidStep {
            path: path.to_owned(),
            step: step.to_owned(),
        };
        let mut rest = path.trim();
        let mut axis = Axis::Child;
        if let Some(stripped) = rest.strip_prefix(".//") {
            rest = stripped;
            axis = Axis::Descendant;
        } else if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if rest.starts_with('/') {
            return Err(invalid(rest));
        }
        let mut steps = Vec::new();
        for segment in rest.split('/') {
            if segment.is_empty() {
                if axis == Axis::Descendant {
                    return Err(invalid(segment));
                }
                axis = Axis::Descendant;
                continue;
            }
            let (name, predicate) = match segment.split_once('[') {
                Some((name, predicate)) => {
                    let predicate = predicate
                        .strip_suffix(']')
                        .and_then(|predicate| predicate.strip_prefix('@'))
                        .ok_or_else(|| invalid(segment))?;
                    (name, Some(parse_predicate(predicate).ok_or_else(|| invalid(segment))?))
                }
                None => (segment, None),
            };
            if name.is_empty() {
                return Err(invalid(segment));
            }
            steps.push(Step {
                axis,
                name: name.to_owned(),
                predicate,
            });
            axis = Axis::Child;
        }
        if steps.is_empty() {
            return Err(PathError::Empty(path.to_owned()));
        }
        if axis == Axis::Descendant {
            return Err(invalid(""));
        }
        Ok(Self { steps })
    }
    /// Evaluates the path relative to `context`. The context element itself is never matched.
    pub fn select<'doc>(&self, context: &'doc Element) -> Vec<&'doc Element> {
        let mut current = vec![context];
        for step in &self.steps {
            let mut next: Vec<&Element> = Vec::new();
            for element in current {
                match step.axis {
                    Axis::Child => {
                        next.extend(element.child_elements().filter(|child| step.matches(child)))
                    }
                    Axis::Descendant => collect_descendants(element, step, &mut next),
                }
            }
            dedup_by_identity(&mut next);
            current = next;
        }
        current
    }
}
fn parse_predicate(predicate: &str) -> Option<AttributePredicate> {
    match predicate.split_once('=') {
        None => Some(AttributePredicate {
            name: predicate.trim().to_owned(),
            value: None,
        }),
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('\'')
                .and_then(|value| value.strip_suffix('\''))
                .or_else(|| {
                    value
                        .strip_prefix('"')
                        .and_then(|value| value.strip_suffix('"'))
                })?;
            Some(AttributePredicate {
                name: name.trim().to_owned(),
                value: Some(unquoted.to_owned()),
            })
        }
    }
}
fn collect_descendants<'doc>(element: &'doc Element, step: &Step, out: &mut Vec<&'doc Element>) {
    for child in element.child_elements() {
        if step.matches(child) {
            out.push(child);
        }
        collect_descendants(child, step, out);
    }
}
fn dedup_by_identity(elements: &mut Vec<&Element>) {
    let mut seen: HashSet<*const Element> = HashSet::with_capacity(elements.len());
    elements.retain(|element| seen.insert(*element as *const Element));
}
#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Element {
        Element::parse(
            r#"<article>
  <front>
    <contrib-group>
      <contrib contrib-type="author" equal-contrib="yes"><name><surname>Doe</surname></name></contrib>
      <contrib contrib-type="editor"><name><surname>Roe</surname></name></contrib>
    </contrib-group>
  </front>
  <body>
    <sec><title>Intro</title><sec><title>Nested</title></sec></sec>
  </body>
</article>"#,
        )
        .unwrap()
    }
    #[test]
    fn descendant_with_predicate() {
        let root = document();
        let authors = root.find_all(".//contrib[@contrib-type='author']").unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].text(), "Doe");
        let all = root.find_all(".//contrib").unwrap();
        assert_eq!(all.len(), 2);
        let equal = root.find_all(r#".//contrib[@equal-contrib="yes"]"#).unwrap();
        assert_eq!(equal.len(), 1);
        let with_attribute = root.find_all(".//contrib[@equal-contrib]").unwrap();
        assert_eq!(with_attribute.len(), 1);
    }
    #[test]
    fn overlapping_descendants_are_reported_once() {
        let root = document();
        let titles = root.find_all(".//sec//title").unwrap();
        let titles: Vec<_> = titles.iter().map(|title| title.text()).collect();
        assert_eq!(titles, ["Intro", "Nested"]);
    }
    #[test]
    fn child_steps_only_match_direct_children() {
        let root = document();
        let titles: Vec<_> = root
            .find_all(".//body/sec")
            .unwrap()
            .into_iter()
            .map(|sec| sec.find("./title").unwrap().unwrap().text().into_owned())
            .collect();
        assert_eq!(titles, vec!["Intro"]);
        let every_title = root.find_all("body//title").unwrap();
        assert_eq!(every_title.len(), 2);
        assert_eq!(root.find_all("./front/contrib-group/*").unwrap().len(), 2);
    }
    #[test]
    fn invalid_paths() {
        assert!(ElementPath::parse("").is_err());
        assert!(ElementPath::parse("/absolute").is_err());
        assert!(ElementPath::parse(".//a[@b").is_err());
        assert!(ElementPath::parse(".//a[b='c']").is_err());
        assert!(ElementPath::parse("a//").is_err());
        assert!(ElementPath::parse("a[@b=c]").is_err());
    }
}
