//! Message expectations
//!
//! These types define one expected asynchronous message:
//! - ProviderState: precondition the provider must satisfy
//! - MessageContents: body, metadata and annotations
//! - AsynchronousMessage: a V4 interaction, the builder's working record
//! - Message: the flattened V3 record projected from an AsynchronousMessage

use crate::body::OptionalBody;
use crate::generators::Generators;
use crate::index::AnnotationIndex;
use crate::matchers::MatchingRules;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Message metadata, keyed by name
pub type Metadata = BTreeMap<String, Value>;

/// Interaction type tag of V4 asynchronous messages
pub const ASYNCHRONOUS_MESSAGE_TYPE: &str = "Asynchronous/Messages";

/// A provider state with parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderState {
    /// Description of the state
    pub name: String,
    /// Parameters describing the state
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl ProviderState {
    /// A state without parameters
    pub fn new(name: impl Into<String>) -> Self {
        ProviderState {
            name: name.into(),
            params: Map::new(),
        }
    }

    /// A state with parameters
    pub fn with_params(name: impl Into<String>, params: Map<String, Value>) -> Self {
        ProviderState {
            name: name.into(),
            params,
        }
    }

    /// Render as `{"name": ..., "params": {...}}`
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        if !self.params.is_empty() {
            map.insert("params".to_string(), Value::Object(self.params.clone()));
        }
        Value::Object(map)
    }
}

impl From<&str> for ProviderState {
    fn from(name: &str) -> Self {
        ProviderState::new(name)
    }
}

/// Contents of a message: body, metadata and annotations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageContents {
    /// Encoded body
    pub contents: OptionalBody,
    /// Metadata, with annotations resolved to plain values
    pub metadata: Metadata,
    /// Rules and generators for body and metadata
    pub annotations: AnnotationIndex,
}

impl MessageContents {
    /// Matching rules of the message
    pub fn matching_rules(&self) -> &MatchingRules {
        &self.annotations.matching_rules
    }

    /// Generators of the message
    pub fn generators(&self) -> &Generators {
        &self.annotations.generators
    }
}

fn metadata_json(metadata: &Metadata) -> Value {
    Value::Object(metadata.clone().into_iter().collect())
}

fn states_json(states: &[ProviderState]) -> Value {
    Value::Array(states.iter().map(ProviderState::to_json).collect())
}

/// A V4 asynchronous message interaction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AsynchronousMessage {
    /// Interaction key, empty unless set
    pub key: String,
    /// What the message is
    pub description: String,
    /// States the provider must be in
    pub provider_states: Vec<ProviderState>,
    /// Body, metadata and annotations
    pub contents: MessageContents,
    /// Pending interactions do not fail verification
    pub pending: bool,
}

impl AsynchronousMessage {
    /// Create a message with a description and provider states
    pub fn new(description: impl Into<String>, provider_states: Vec<ProviderState>) -> Self {
        AsynchronousMessage {
            key: String::new(),
            description: description.into(),
            provider_states,
            contents: MessageContents::default(),
            pending: false,
        }
    }

    /// Project onto the V3 message record
    pub fn as_v3_message(&self) -> Message {
        Message {
            description: self.description.clone(),
            provider_states: self.provider_states.clone(),
            contents: self.contents.contents.clone(),
            metadata: self.contents.metadata.clone(),
            matching_rules: self.contents.annotations.matching_rules.clone(),
            generators: self.contents.annotations.generators.clone(),
        }
    }

    /// Render as a V4 interaction
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), json!(ASYNCHRONOUS_MESSAGE_TYPE));
        if !self.key.is_empty() {
            map.insert("key".to_string(), json!(self.key));
        }
        map.insert("description".to_string(), json!(self.description));
        map.insert("pending".to_string(), json!(self.pending));
        if !self.provider_states.is_empty() {
            map.insert("providerStates".to_string(), states_json(&self.provider_states));
        }
        map.insert("contents".to_string(), self.contents.contents.to_v4_json());
        map.insert("metadata".to_string(), metadata_json(&self.contents.metadata));
        if !self.contents.matching_rules().is_empty() {
            map.insert("matchingRules".to_string(), self.contents.matching_rules().to_json());
        }
        if !self.contents.generators().is_empty() {
            map.insert("generators".to_string(), self.contents.generators().to_json());
        }
        Value::Object(map)
    }
}

/// A V3 message record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    /// What the message is
    pub description: String,
    /// States the provider must be in
    pub provider_states: Vec<ProviderState>,
    /// Encoded body
    pub contents: OptionalBody,
    /// Metadata
    pub metadata: Metadata,
    /// Matching rules
    pub matching_rules: MatchingRules,
    /// Generators
    pub generators: Generators,
}

impl Message {
    /// Render as a V3 message
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("description".to_string(), json!(self.description));
        if !self.provider_states.is_empty() {
            map.insert("providerStates".to_string(), states_json(&self.provider_states));
        }
        if self.contents.is_present() {
            map.insert("contents".to_string(), self.contents.to_v3_json());
        }
        map.insert("metadata".to_string(), metadata_json(&self.metadata));
        if !self.matching_rules.is_empty() {
            map.insert("matchingRules".to_string(), self.matching_rules.to_json());
        }
        if !self.generators.is_empty() {
            map.insert("generators".to_string(), self.generators.to_json());
        }
        Value::Object(map)
    }
}
