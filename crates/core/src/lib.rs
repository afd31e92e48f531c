//! Core types for Pactum
//!
//! This crate defines the model behind message pacts:
//! - ContentType, Charset: parsed MIME types and text encodings
//! - OptionalBody: encoded message body
//! - DocPath: path expressions keying body annotations
//! - MatchingRule, Generator: annotations and their per-category indexes
//! - Matcher, ContentNode, XmlDocument: annotated content
//! - ContentCodec: content to body plus extracted annotations
//! - AsynchronousMessage, Message: V4 and V3 message records
//! - MessagePact, V4Pact: the two contract document shapes and their projectors
//! - PactConfig: `pact.toml` configuration
//! - PactError: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod annotated;
pub mod body;
pub mod codec;
pub mod config;
pub mod content_type;
pub mod error;
pub mod generators;
pub mod index;
pub mod matchers;
pub mod message;
pub mod pact;
pub mod path;
pub mod projector;
pub mod tree;
pub mod xml;

// Re-export commonly used types
pub use annotated::{AnnotatedValue, Matcher};
pub use body::OptionalBody;
pub use codec::{
    encode_structured, encode_text, encode_xml, resolve_content_type, ContentCodec,
    EncodedContent, MessageContent, PlainText,
};
pub use config::{PactConfig, CONFIG_FILE_NAME};
pub use content_type::{is_content_type_key, Charset, ContentType, CONTENT_TYPE_KEY};
pub use error::{PactError, Result};
pub use generators::{Generator, Generators};
pub use index::AnnotationIndex;
pub use matchers::{Category, MatchingRule, MatchingRuleCategory, MatchingRules, RuleList, RuleLogic};
pub use message::{AsynchronousMessage, Message, MessageContents, Metadata, ProviderState};
pub use pact::{Consumer, MessagePact, Pact, PactKind, PactSpecVersion, Provider, V4Pact};
pub use path::{DocPath, PathToken};
pub use projector::{to_self_describing, to_versioned_list};
pub use tree::{ArrayNode, ContentNode};
pub use xml::{XmlDocument, XmlElement, XmlNode};
