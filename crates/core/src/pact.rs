//! Contract documents
//!
//! Two immutable document shapes are produced from the same message list:
//!
//! - [`MessagePact`]: the V3 shape, a `messages` list of flattened records
//! - [`V4Pact`]: the V4 shape, an `interactions` list where every entry is
//!   tagged `Asynchronous/Messages`
//!
//! Both render to the pact file JSON schema via `to_json`.

use crate::error::{PactError, Result};
use crate::message::{AsynchronousMessage, Message};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// The consumer side of a pact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Consumer {
    /// Consumer name
    pub name: String,
}

impl Consumer {
    /// Named consumer
    pub fn new(name: impl Into<String>) -> Self {
        Consumer { name: name.into() }
    }
}

impl Default for Consumer {
    fn default() -> Self {
        Consumer::new("consumer")
    }
}

/// The provider side of a pact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provider {
    /// Provider name
    pub name: String,
}

impl Provider {
    /// Named provider
    pub fn new(name: impl Into<String>) -> Self {
        Provider { name: name.into() }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::new("provider")
    }
}

/// Pact specification version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum PactSpecVersion {
    /// Version 3: message pacts
    #[default]
    V3,
    /// Version 4: typed interactions
    V4,
}

impl PactSpecVersion {
    /// Version string written into pact metadata
    pub fn version_str(&self) -> &'static str {
        match self {
            PactSpecVersion::V3 => "3.0.0",
            PactSpecVersion::V4 => "4.0",
        }
    }
}

impl fmt::Display for PactSpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PactSpecVersion::V3 => f.write_str("V3"),
            PactSpecVersion::V4 => f.write_str("V4"),
        }
    }
}

impl FromStr for PactSpecVersion {
    type Err = PactError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "V3" | "3" | "3.0.0" => Ok(PactSpecVersion::V3),
            "V4" | "4" | "4.0" => Ok(PactSpecVersion::V4),
            other => Err(PactError::Config(format!(
                "unsupported pact specification version '{}'",
                other
            ))),
        }
    }
}

/// Kinds of pact document a caller can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PactKind {
    /// HTTP request/response pact; not producible from messages
    RequestResponse,
    /// V3 message pact
    Message,
    /// V4 pact
    V4,
}

impl PactKind {
    /// Name of the document shape
    pub fn name(&self) -> &'static str {
        match self {
            PactKind::RequestResponse => "RequestResponsePact",
            PactKind::Message => "MessagePact",
            PactKind::V4 => "V4Pact",
        }
    }
}

impl FromStr for PactKind {
    type Err = PactError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RequestResponsePact" => Ok(PactKind::RequestResponse),
            "MessagePact" => Ok(PactKind::Message),
            "V4Pact" => Ok(PactKind::V4),
            other => Err(PactError::UnsupportedShape(other.to_string())),
        }
    }
}

fn pact_metadata(version: PactSpecVersion) -> Value {
    json!({
        "pactSpecification": {"version": version.version_str()},
        "pactum": {"version": env!("CARGO_PKG_VERSION")},
    })
}

/// V3 message pact
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePact {
    /// Provider
    pub provider: Provider,
    /// Consumer
    pub consumer: Consumer,
    /// Messages in declaration order
    pub messages: Vec<Message>,
}

impl MessagePact {
    /// Render as a V3 pact file
    pub fn to_json(&self) -> Value {
        json!({
            "consumer": {"name": self.consumer.name},
            "provider": {"name": self.provider.name},
            "messages": self.messages.iter().map(Message::to_json).collect::<Vec<_>>(),
            "metadata": pact_metadata(PactSpecVersion::V3),
        })
    }
}

/// V4 pact
#[derive(Debug, Clone, PartialEq)]
pub struct V4Pact {
    /// Consumer
    pub consumer: Consumer,
    /// Provider
    pub provider: Provider,
    /// Interactions in declaration order
    pub interactions: Vec<AsynchronousMessage>,
}

impl V4Pact {
    /// Render as a V4 pact file
    pub fn to_json(&self) -> Value {
        json!({
            "consumer": {"name": self.consumer.name},
            "provider": {"name": self.provider.name},
            "interactions": self
                .interactions
                .iter()
                .map(AsynchronousMessage::to_json)
                .collect::<Vec<_>>(),
            "metadata": pact_metadata(PactSpecVersion::V4),
        })
    }
}

/// A contract document in either shape
#[derive(Debug, Clone, PartialEq)]
pub enum Pact {
    /// V3 message pact
    Message(MessagePact),
    /// V4 pact
    V4(V4Pact),
}

impl Pact {
    /// Consumer of the pact
    pub fn consumer(&self) -> &Consumer {
        match self {
            Pact::Message(p) => &p.consumer,
            Pact::V4(p) => &p.consumer,
        }
    }

    /// Provider of the pact
    pub fn provider(&self) -> &Provider {
        match self {
            Pact::Message(p) => &p.provider,
            Pact::V4(p) => &p.provider,
        }
    }

    /// Specification version of the shape
    pub fn spec_version(&self) -> PactSpecVersion {
        match self {
            Pact::Message(_) => PactSpecVersion::V3,
            Pact::V4(_) => PactSpecVersion::V4,
        }
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        match self {
            Pact::Message(p) => p.messages.len(),
            Pact::V4(p) => p.interactions.len(),
        }
    }

    /// Check whether the pact holds no messages
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The V3 document, if this is one
    pub fn as_message_pact(&self) -> Option<&MessagePact> {
        match self {
            Pact::Message(p) => Some(p),
            Pact::V4(_) => None,
        }
    }

    /// The V4 document, if this is one
    pub fn as_v4_pact(&self) -> Option<&V4Pact> {
        match self {
            Pact::V4(p) => Some(p),
            Pact::Message(_) => None,
        }
    }

    /// Render as a pact file
    pub fn to_json(&self) -> Value {
        match self {
            Pact::Message(p) => p.to_json(),
            Pact::V4(p) => p.to_json(),
        }
    }
}
