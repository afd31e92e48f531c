//! Message bodies
//!
//! A body is either missing or a byte sequence tagged with the content type
//! it was encoded with. Bodies are immutable; setting new content on a
//! message replaces the body wholesale.

use crate::content_type::{Charset, ContentType};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

/// The contents of a message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionalBody {
    /// No content was set
    #[default]
    Missing,
    /// Encoded content
    Present {
        /// Encoded bytes
        bytes: Vec<u8>,
        /// Content type the bytes were encoded with
        content_type: ContentType,
    },
}

impl OptionalBody {
    /// Create a present body
    pub fn body(bytes: Vec<u8>, content_type: ContentType) -> Self {
        OptionalBody::Present {
            bytes,
            content_type,
        }
    }

    /// Check whether content was set
    pub fn is_present(&self) -> bool {
        matches!(self, OptionalBody::Present { .. })
    }

    /// Raw bytes, empty when missing
    pub fn bytes(&self) -> &[u8] {
        match self {
            OptionalBody::Missing => &[],
            OptionalBody::Present { bytes, .. } => bytes,
        }
    }

    /// Content type the body was encoded with
    pub fn content_type(&self) -> Option<&ContentType> {
        match self {
            OptionalBody::Missing => None,
            OptionalBody::Present { content_type, .. } => Some(content_type),
        }
    }

    fn charset(&self) -> Charset {
        self.content_type()
            .and_then(|ct| ct.charset().ok())
            .unwrap_or_default()
    }

    /// Decode the body to text using its charset
    pub fn value_as_string(&self) -> Option<String> {
        match self {
            OptionalBody::Missing => None,
            OptionalBody::Present { bytes, .. } => Some(self.charset().decode(bytes)),
        }
    }

    fn is_text_safe(&self) -> bool {
        self.charset().is_valid(self.bytes())
    }

    /// Render for the `contents` field of a V3 message
    ///
    /// JSON bodies render as parsed JSON, everything else as a string.
    pub fn to_v3_json(&self) -> Value {
        match self {
            OptionalBody::Missing => Value::Null,
            OptionalBody::Present { content_type, .. } => {
                let text = self.value_as_string().unwrap_or_default();
                if content_type.is_json() {
                    serde_json::from_str(&text).unwrap_or(Value::String(text))
                } else {
                    Value::String(text)
                }
            }
        }
    }

    /// Render for the `contents` field of a V4 interaction
    ///
    /// Bytes that are not valid text in their charset are base64 encoded.
    pub fn to_v4_json(&self) -> Value {
        match self {
            OptionalBody::Missing => json!({}),
            OptionalBody::Present {
                bytes,
                content_type,
            } => {
                if !self.is_text_safe() {
                    return json!({
                        "content": STANDARD.encode(bytes),
                        "contentType": content_type.to_string(),
                        "encoded": "base64",
                    });
                }
                let text = self.value_as_string().unwrap_or_default();
                let content = if content_type.is_json() {
                    serde_json::from_str(&text).unwrap_or(Value::String(text))
                } else {
                    Value::String(text)
                };
                json!({
                    "content": content,
                    "contentType": content_type.to_string(),
                    "encoded": false,
                })
            }
        }
    }
}
