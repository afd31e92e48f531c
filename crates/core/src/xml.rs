//! XML content documents
//!
//! An [`XmlDocument`] is an element tree whose attribute and text values may
//! carry annotations. Element paths are keyed without indices, so repeated
//! elements share one entry:
//!
//! | Node | Path |
//! |------|------|
//! | element | `$.root.item` |
//! | attribute | `$.root.item['@id']` |
//! | text | `$.root.item['#text']` |

use crate::annotated::AnnotatedValue;
use crate::content_type::Charset;
use crate::error::{PactError, Result};
use crate::index::AnnotationIndex;
use crate::matchers::{Category, MatchingRule};
use crate::path::DocPath;
use serde_json::Value;
use std::fmt::Write;

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Nested element
    Element(XmlElement),
    /// Text content
    Text(AnnotatedValue),
}

/// An XML element
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Tag name, possibly prefixed
    pub name: String,
    /// Attributes in declaration order
    pub attributes: Vec<(String, AnnotatedValue)>,
    /// Child nodes in order
    pub children: Vec<XmlNode>,
    /// Rule applied to the element itself, e.g. a minimum count
    pub rule: Option<MatchingRule>,
}

impl XmlElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            rule: None,
        }
    }

    /// Check this element's name, its attribute names and all descendants
    pub fn validate(&self) -> Result<()> {
        check_name(&self.name)?;
        for (name, _) in &self.attributes {
            check_name(name)?;
        }
        for child in &self.children {
            if let XmlNode::Element(element) = child {
                element.validate()?;
            }
        }
        Ok(())
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(&render(value.value()), true));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_to(out),
                XmlNode::Text(text) => out.push_str(&escape(&render(text.value()), false)),
            }
        }
        let _ = write!(out, "</{}>", self.name);
    }

    fn collect_annotations(
        &self,
        parent: &DocPath,
        category: Category,
        index: &mut AnnotationIndex,
    ) -> Result<()> {
        let path = parent.clone().field(self.name.clone());
        if let Some(rule) = &self.rule {
            index.merge_rule(category, path.to_string(), rule.clone());
        }
        for (name, value) in &self.attributes {
            record(value, &path.clone().field(format!("@{}", name)), category, index)?;
        }
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.collect_annotations(&path, category, index)?,
                XmlNode::Text(text) => {
                    record(text, &path.clone().field("#text"), category, index)?
                }
            }
        }
        Ok(())
    }
}

fn record(
    value: &AnnotatedValue,
    path: &DocPath,
    category: Category,
    index: &mut AnnotationIndex,
) -> Result<()> {
    if let AnnotatedValue::Annotated(matcher) = value {
        let key = path.to_string();
        if let Some(rule) = matcher.rule() {
            rule.validate_example(&key, matcher.value())?;
            index.merge_rule(category, key.clone(), rule.clone());
        }
        if let Some(generator) = matcher.generator() {
            index.merge_generator(category, key, generator.clone());
        }
    }
    Ok(())
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_alphanumeric() || c == '-' || c == '.'
}

fn check_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    match chars.next() {
        None => Err(PactError::invalid_xml_name(name, "name is empty")),
        Some(c) if !is_name_start(c) => Err(PactError::invalid_xml_name(
            name,
            format!("'{}' cannot start a name", c),
        )),
        Some(_) => match chars.find(|&c| !is_name_char(c)) {
            Some(c) => Err(PactError::invalid_xml_name(
                name,
                format!("'{}' is not allowed in a name", c),
            )),
            None => Ok(()),
        },
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// An XML document with a prolog and a root element
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// XML version written in the prolog
    pub version: String,
    /// Root element
    pub root: XmlElement,
}

impl XmlDocument {
    /// Create a version 1.0 document
    pub fn new(root: XmlElement) -> Self {
        XmlDocument {
            version: "1.0".to_string(),
            root,
        }
    }

    /// Check every element and attribute name in the document
    pub fn validate(&self) -> Result<()> {
        self.root.validate()
    }

    /// Serialize with a prolog naming `charset`
    ///
    /// Names are written as given; call [`XmlDocument::validate`] first to
    /// reject names that would produce malformed XML.
    pub fn to_xml_string(&self, charset: Charset) -> String {
        let mut out = format!(
            "<?xml version=\"{}\" encoding=\"{}\"?>",
            self.version,
            charset.name()
        );
        self.root.write_to(&mut out);
        out
    }

    /// Annotations of the whole document
    pub fn annotations(&self, category: Category) -> Result<AnnotationIndex> {
        let mut index = AnnotationIndex::new();
        self.root
            .collect_annotations(&DocPath::root(), category, &mut index)?;
        Ok(index)
    }
}
