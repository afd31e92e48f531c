//! XML body DSL
//!
//! ```
//! use pactum_consumer::PactXmlBuilder;
//! use pactum_core::Matcher;
//!
//! let xml = PactXmlBuilder::new("order")
//!     .with_namespace("urn:orders")
//!     .build(|order| {
//!         order.attribute("id", Matcher::integer(7));
//!         order.each_like("line", 2, |line| {
//!             line.text(Matcher::like("widget"));
//!         });
//!     });
//! let document = xml.into_document();
//! assert_eq!(document.root.name, "order");
//! ```

use pactum_core::annotated::AnnotatedValue;
use pactum_core::matchers::MatchingRule;
use pactum_core::xml::{XmlDocument, XmlElement, XmlNode};
use serde_json::Value;

/// Builds an [`XmlDocument`] from a root element name
#[derive(Debug, Clone, PartialEq)]
pub struct PactXmlBuilder {
    namespace: Option<String>,
    version: String,
    root: XmlElement,
}

impl PactXmlBuilder {
    /// Start a document with the given root element
    pub fn new(root_name: impl Into<String>) -> Self {
        PactXmlBuilder {
            namespace: None,
            version: "1.0".to_string(),
            root: XmlElement::new(root_name),
        }
    }

    /// Default namespace, written as `xmlns` on the root
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// XML version written in the prolog
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Populate the root element
    pub fn build(mut self, populate: impl FnOnce(&mut XmlElementBuilder)) -> Self {
        let mut builder = XmlElementBuilder {
            element: std::mem::replace(&mut self.root, XmlElement::new(String::new())),
        };
        populate(&mut builder);
        self.root = builder.element;
        self
    }

    /// Finish the document
    pub fn into_document(self) -> XmlDocument {
        let mut root = self.root;
        if let Some(namespace) = self.namespace {
            root.attributes.retain(|(name, _)| name != "xmlns");
            root.attributes
                .insert(0, ("xmlns".to_string(), AnnotatedValue::Plain(Value::String(namespace))));
        }
        XmlDocument {
            version: self.version,
            root,
        }
    }
}

impl From<PactXmlBuilder> for XmlDocument {
    fn from(builder: PactXmlBuilder) -> Self {
        builder.into_document()
    }
}

/// Populates one element
#[derive(Debug)]
pub struct XmlElementBuilder {
    element: XmlElement,
}

impl XmlElementBuilder {
    /// Set an attribute, replacing an earlier one of the same name
    pub fn attribute(&mut self, name: impl Into<String>, value: impl Into<AnnotatedValue>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.element.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.element.attributes.push((name, value)),
        }
        self
    }

    /// Append text content
    pub fn text(&mut self, value: impl Into<AnnotatedValue>) -> &mut Self {
        self.element.children.push(XmlNode::Text(value.into()));
        self
    }

    /// Append a child element
    pub fn append_element(
        &mut self,
        name: impl Into<String>,
        populate: impl FnOnce(&mut XmlElementBuilder),
    ) -> &mut Self {
        let child = populated(name.into(), populate);
        self.element.children.push(XmlNode::Element(child));
        self
    }

    /// Append `examples` copies of a child matched by type
    pub fn each_like(
        &mut self,
        name: impl Into<String>,
        examples: usize,
        populate: impl FnOnce(&mut XmlElementBuilder),
    ) -> &mut Self {
        let mut child = populated(name.into(), populate);
        child.rule = Some(MatchingRule::Type);
        for _ in 0..examples.max(1) {
            self.element.children.push(XmlNode::Element(child.clone()));
        }
        self
    }

    /// Apply a rule to this element itself
    pub fn with_rule(&mut self, rule: MatchingRule) -> &mut Self {
        self.element.rule = Some(rule);
        self
    }
}

fn populated(name: String, populate: impl FnOnce(&mut XmlElementBuilder)) -> XmlElement {
    let mut builder = XmlElementBuilder {
        element: XmlElement::new(name),
    };
    populate(&mut builder);
    builder.element
}
