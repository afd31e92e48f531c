//! Metadata DSL
//!
//! Collects metadata entries, each either a plain value or a value with a
//! matcher or generator attached. The builder applies the entries with the
//! same merge semantics as a plain map.

use pactum_core::annotated::{AnnotatedValue, Matcher};
use pactum_core::generators::Generator;
use serde_json::Value;

/// Metadata entries in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataBuilder {
    entries: Vec<(String, AnnotatedValue)>,
}

impl MetadataBuilder {
    /// Start with no entries
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain or annotated entry
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<AnnotatedValue>) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Add an entry matched by regular expression
    pub fn matching_regex(
        &mut self,
        key: impl Into<String>,
        regex: impl Into<String>,
        example: impl Into<String>,
    ) -> &mut Self {
        self.add(key, Matcher::regex(regex, example))
    }

    /// Add an entry matched by type
    pub fn matching_type(&mut self, key: impl Into<String>, example: impl Into<Value>) -> &mut Self {
        self.add(key, Matcher::like(example))
    }

    /// Add an entry whose value comes from provider state on replay
    pub fn from_provider_state(
        &mut self,
        key: impl Into<String>,
        expression: impl Into<String>,
        example: impl Into<Value>,
    ) -> &mut Self {
        self.add(key, Matcher::from_provider_state(expression, example))
    }

    /// Add an entry whose value is generated on replay
    pub fn generated(
        &mut self,
        key: impl Into<String>,
        generator: Generator,
        example: impl Into<Value>,
    ) -> &mut Self {
        self.add(key, Matcher::new(example).with_generator(generator))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no entry was added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take the entries
    pub fn into_entries(self) -> Vec<(String, AnnotatedValue)> {
        self.entries
    }
}
