//! XML parser.
//!
//! Elements become mappings keyed by child tag name:
//!
//! - attributes are stored under `@name`
//! - text next to attributes or child elements is stored under `#text`
//! - an element with only text becomes a string, an empty one becomes null
//! - repeated child tags collect into a sequence in document order
//!
//! The document element itself is unwrapped, so `<cases><a/></cases>` gives
//! `{"a": null}`. XML is not registered for any extension by default; use
//! [`crate::load_xml`] or register [`XmlParser`] on a [`crate::Loader`].

use super::{Parser, read_text};
use crate::Result;
use crate::models::{Record, Value};
use roxmltree::{Document, Node};
use std::path::Path;

/// Parses an XML document into a [`Value`] with the root element removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlParser;

impl XmlParser {
    /// Parses XML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Xml`] for malformed documents.
    pub fn parse_str(&self, content: &str) -> Result<Value> {
        let document = Document::parse(content)?;

        let mut top = Record::new();
        for node in document.root().children().filter(Node::is_element) {
            insert_child(&mut top, tag_name(node), element_value(node));
        }

        if top.len() == 1 {
            return Ok(top.pop().map_or(Value::Null, |(_, value)| value));
        }
        Ok(Value::Mapping(top))
    }
}

impl Parser for XmlParser {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn parse(&self, path: &Path) -> Result<Value> {
        self.parse_str(&read_text(path)?)
    }
}

/// Converts one element and its subtree.
fn element_value(node: Node<'_, '_>) -> Value {
    let mut record = Record::new();
    for attribute in node.attributes() {
        let name = qualified_name(node, attribute.namespace(), attribute.name());
        record.insert(format!("@{name}"), Value::from(attribute.value()));
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            insert_child(&mut record, tag_name(child), element_value(child));
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }

    let text = text.trim();
    if record.is_empty() {
        return if text.is_empty() {
            Value::Null
        } else {
            Value::from(text)
        };
    }
    if !text.is_empty() {
        record.insert("#text".to_string(), Value::from(text));
    }
    Value::Mapping(record)
}

/// Adds a child under its tag, turning repeats into a sequence.
fn insert_child(record: &mut Record, name: String, value: Value) {
    match record.get_mut(&name) {
        Some(Value::Sequence(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::take(existing);
            *existing = Value::Sequence(vec![first, value]);
        },
        None => {
            record.insert(name, value);
        },
    }
}

fn tag_name(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    qualified_name(node, tag.namespace(), tag.name())
}

/// Renders a name with its declared prefix, if any.
fn qualified_name(scope: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| scope.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_single_root_is_unwrapped() {
        let value = XmlParser
            .parse_str(
                r#"
<cases>
  <golf doors="5">
    <make>vw</make>
    <price>9000</price>
  </golf>
  <polo><make>vw</make></polo>
</cases>
"#,
            )
            .unwrap();

        let golf = value.get("golf").unwrap();
        assert_eq!(golf.get("@doors"), Some(&Value::from("5")));
        assert_eq!(golf.get("make"), Some(&Value::from("vw")));
        assert_eq!(golf.get("price"), Some(&Value::from("9000")));
        assert_eq!(
            value.as_mapping().unwrap().keys().collect::<Vec<_>>(),
            vec!["golf", "polo"]
        );
    }

    #[test]
    fn test_repeated_children_become_a_sequence() {
        let value = XmlParser
            .parse_str("<cars><car>golf</car><car>polo</car><car>up</car><fleet/></cars>")
            .unwrap();
        assert_eq!(
            value.get("car"),
            Some(&Value::Sequence(vec![
                Value::from("golf"),
                Value::from("polo"),
                Value::from("up"),
            ]))
        );
        assert_eq!(value.get("fleet"), Some(&Value::Null));
    }

    #[test]
    fn test_mixed_text_and_attributes() {
        let value = XmlParser
            .parse_str(r#"<note lang="en">  hello <b>there</b></note>"#)
            .unwrap();
        assert_eq!(value.get("@lang"), Some(&Value::from("en")));
        assert_eq!(value.get("#text"), Some(&Value::from("hello")));
        assert_eq!(value.get("b"), Some(&Value::from("there")));
    }

    #[test]
    fn test_text_only_root() {
        let value = XmlParser.parse_str("<greeting>hi</greeting>").unwrap();
        assert_eq!(value, Value::from("hi"));
    }

    #[test]
    fn test_prefixed_names() {
        let value = XmlParser
            .parse_str(r#"<r xmlns:c="urn:cars"><c:make>vw</c:make></r>"#)
            .unwrap();
        assert_eq!(value.get("c:make"), Some(&Value::from("vw")));
    }

    #[test]
    fn test_multiple_roots_rejected() {
        let err = XmlParser.parse_str("<a>1</a><b>2</b>").unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }

    #[test]
    fn test_malformed_rejected() {
        let err = XmlParser.parse_str("<a><b></a>").unwrap_err();
        assert!(matches!(err, Error::Xml(_)));
    }
}
