//! Content codecs
//!
//! Turns message content into a body plus the annotations found inside it.
//! Content is one of three variants, each with its own [`ContentCodec`]:
//!
//! | Variant | Default type | Annotations |
//! |---------|--------------|-------------|
//! | [`MessageContent::Json`] | `application/json` | walked from the tree |
//! | [`MessageContent::Xml`] | `application/xml` | walked from the document |
//! | [`MessageContent::Text`] | `text/plain` | none |
//!
//! Codecs are pure: they depend only on the content and the content type
//! they are given.

use crate::body::OptionalBody;
use crate::content_type::{is_content_type_key, ContentType, CONTENT_TYPE_KEY};
use crate::error::Result;
use crate::index::AnnotationIndex;
use crate::matchers::Category;
use crate::message::Metadata;
use crate::tree::ContentNode;
use crate::xml::XmlDocument;
use serde_json::Value;
use tracing::trace;

/// A body with the annotations extracted while encoding it
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedContent {
    /// Encoded body
    pub body: OptionalBody,
    /// Rules and generators under the `body` category
    pub annotations: AnnotationIndex,
}

/// Encodes one kind of content
pub trait ContentCodec {
    /// Content type used when metadata does not declare one
    fn default_content_type(&self) -> ContentType;

    /// Encode with the resolved content type
    fn encode(&self, content_type: &ContentType) -> Result<EncodedContent>;
}

/// Plain text with an optional explicit content type
#[derive(Debug, Clone, PartialEq)]
pub struct PlainText {
    /// The text
    pub text: String,
    /// Explicit content type, overriding metadata when set
    pub content_type: Option<String>,
}

impl PlainText {
    /// Text whose type comes from metadata or defaults to `text/plain`
    pub fn new(text: impl Into<String>) -> Self {
        PlainText {
            text: text.into(),
            content_type: None,
        }
    }

    /// Text with an explicit content type
    pub fn with_content_type(text: impl Into<String>, content_type: impl Into<String>) -> Self {
        PlainText {
            text: text.into(),
            content_type: Some(content_type.into()),
        }
    }
}

/// Content of a message
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// Structured JSON tree
    Json(ContentNode),
    /// XML document
    Xml(XmlDocument),
    /// Raw text
    Text(PlainText),
}

impl MessageContent {
    /// Codec for this variant
    pub fn codec(&self) -> &dyn ContentCodec {
        match self {
            MessageContent::Json(tree) => tree,
            MessageContent::Xml(document) => document,
            MessageContent::Text(text) => text,
        }
    }

    /// Name of the variant, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            MessageContent::Json(_) => "json",
            MessageContent::Xml(_) => "xml",
            MessageContent::Text(_) => "text",
        }
    }
}

impl From<Value> for MessageContent {
    fn from(v: Value) -> Self {
        MessageContent::Json(ContentNode::from(v))
    }
}

impl From<ContentNode> for MessageContent {
    fn from(tree: ContentNode) -> Self {
        MessageContent::Json(tree)
    }
}

impl From<XmlDocument> for MessageContent {
    fn from(document: XmlDocument) -> Self {
        MessageContent::Xml(document)
    }
}

impl From<PlainText> for MessageContent {
    fn from(text: PlainText) -> Self {
        MessageContent::Text(text)
    }
}

/// Encode a structured tree, collecting its annotations
pub fn encode_structured(tree: &ContentNode, content_type: &ContentType) -> Result<EncodedContent> {
    let charset = content_type.charset()?;
    let annotations = tree.annotations(Category::Body)?;
    let text = tree.to_value().to_string();
    Ok(EncodedContent {
        body: OptionalBody::body(charset.encode(&text), content_type.clone()),
        annotations,
    })
}

/// Encode an XML document, collecting its annotations
pub fn encode_xml(document: &XmlDocument, content_type: &ContentType) -> Result<EncodedContent> {
    let charset = content_type.charset()?;
    document.validate()?;
    let annotations = document.annotations(Category::Body)?;
    let text = document.to_xml_string(charset);
    Ok(EncodedContent {
        body: OptionalBody::body(charset.encode(&text), content_type.clone()),
        annotations,
    })
}

/// Encode raw text; text has no addressable sub-paths
pub fn encode_text(text: &str, content_type: &ContentType) -> Result<EncodedContent> {
    let charset = content_type.charset()?;
    Ok(EncodedContent {
        body: OptionalBody::body(charset.encode(text), content_type.clone()),
        annotations: AnnotationIndex::new(),
    })
}

impl ContentCodec for ContentNode {
    fn default_content_type(&self) -> ContentType {
        ContentType::json()
    }

    fn encode(&self, content_type: &ContentType) -> Result<EncodedContent> {
        encode_structured(self, content_type)
    }
}

impl ContentCodec for XmlDocument {
    fn default_content_type(&self) -> ContentType {
        ContentType::xml()
    }

    fn encode(&self, content_type: &ContentType) -> Result<EncodedContent> {
        encode_xml(self, content_type)
    }
}

impl ContentCodec for PlainText {
    fn default_content_type(&self) -> ContentType {
        ContentType::text_plain()
    }

    fn encode(&self, content_type: &ContentType) -> Result<EncodedContent> {
        encode_text(&self.text, content_type)
    }
}

fn metadata_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolve the effective content type and normalize the metadata key
///
/// An explicit text content type wins and replaces any declared one.
/// Otherwise a declared `contentType`/`content-type` entry (any case) is
/// used and re-keyed to `contentType`; failing that the codec default is
/// used. Afterwards `metadata` holds exactly one content type entry.
pub fn resolve_content_type(metadata: &mut Metadata, content: &MessageContent) -> Result<ContentType> {
    let declared_keys: Vec<String> = metadata
        .keys()
        .filter(|k| is_content_type_key(k))
        .cloned()
        .collect();

    if let MessageContent::Text(PlainText {
        content_type: Some(explicit),
        ..
    }) = content
    {
        let content_type: ContentType = explicit.parse()?;
        for key in &declared_keys {
            metadata.remove(key);
        }
        metadata.insert(CONTENT_TYPE_KEY.to_string(), Value::String(explicit.clone()));
        return Ok(content_type);
    }

    let declared = declared_keys
        .iter()
        .find(|k| k.as_str() == CONTENT_TYPE_KEY)
        .or_else(|| declared_keys.first())
        .and_then(|k| metadata.get(k).cloned());

    match declared {
        Some(value) => {
            let content_type: ContentType = metadata_string(&value).parse()?;
            trace!(content_type = %content_type, "Using content type declared in metadata");
            for key in &declared_keys {
                metadata.remove(key);
            }
            metadata.insert(CONTENT_TYPE_KEY.to_string(), value);
            Ok(content_type)
        }
        None => {
            let content_type = content.codec().default_content_type();
            metadata.insert(
                CONTENT_TYPE_KEY.to_string(),
                Value::String(content_type.to_string()),
            );
            Ok(content_type)
        }
    }
}
