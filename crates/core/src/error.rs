//! Error types for pact construction
//!
//! This module defines all error types raised while building a message pact.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Every error is raised synchronously by the call that detects it, and no
//! builder operation mutates state before failing.

use thiserror::Error;

/// Result type alias for pact operations
pub type Result<T> = std::result::Result<T, PactError>;

/// Error types for pact construction
#[derive(Debug, Error)]
pub enum PactError {
    /// A metadata or content call was made before any message was declared
    #[error("expectsToReceive is required before {operation}")]
    MissingExpectation {
        /// The operation that was attempted
        operation: &'static str,
    },

    /// The requested document shape cannot be produced from message expectations
    #[error("{0} is not a valid pact shape for message interactions")]
    UnsupportedShape(String),

    /// A content type string could not be parsed
    #[error("Invalid content type '{value}': {reason}")]
    InvalidContentType {
        /// The raw content type value
        value: String,
        /// Why parsing failed
        reason: String,
    },

    /// The charset named by a content type is not supported
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// A matcher annotation is internally inconsistent
    #[error("Invalid matcher at '{path}': {reason}")]
    InvalidMatcher {
        /// Path of the annotated value
        path: String,
        /// Why the matcher was rejected
        reason: String,
    },

    /// A path expression could not be parsed
    #[error("Invalid path expression '{path}': {reason}")]
    InvalidPath {
        /// The raw path expression
        path: String,
        /// Why parsing failed
        reason: String,
    },

    /// An XML element or attribute name is not a valid XML name
    #[error("Invalid XML name '{name}': {reason}")]
    InvalidXmlName {
        /// The rejected name
        name: String,
        /// Why the name was rejected
        reason: String,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PactError {
    pub(crate) fn invalid_content_type(value: impl Into<String>, reason: impl Into<String>) -> Self {
        PactError::InvalidContentType {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        PactError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_xml_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PactError::InvalidXmlName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check whether this error was caused by call ordering
    pub fn is_precondition(&self) -> bool {
        matches!(self, PactError::MissingExpectation { .. })
    }
}

impl From<serde_json::Error> for PactError {
    fn from(e: serde_json::Error) -> Self {
        PactError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for PactError {
    fn from(e: toml::de::Error) -> Self {
        PactError::Config(e.to_string())
    }
}
