//! Message pact builder
//!
//! A [`MessagePactBuilder`] accumulates provider states and messages in
//! declaration order. Metadata and content calls always target the message
//! most recently declared with [`expects_to_receive`](MessagePactBuilder::expects_to_receive).
//!
//! ## Failure semantics
//!
//! Every fallible call computes its result on a copy of the current message
//! and commits only on success. A failed call leaves the builder exactly as
//! it was.
//!
//! ## Content replacement
//!
//! Each content call replaces the body, and replaces every body rule and
//! body generator with the ones extracted from the new content. Metadata
//! rules and generators are kept. Metadata calls merge into the existing
//! metadata.

use crate::dsl::{JsonBody, MetadataBuilder, PactXmlBuilder};
use pactum_core::annotated::AnnotatedValue;
use pactum_core::codec::{resolve_content_type, MessageContent, PlainText};
use pactum_core::config::PactConfig;
use pactum_core::error::{PactError, Result};
use pactum_core::index::AnnotationIndex;
use pactum_core::matchers::Category;
use pactum_core::message::{AsynchronousMessage, Metadata, ProviderState};
use pactum_core::pact::{Consumer, MessagePact, Pact, PactKind, PactSpecVersion, Provider, V4Pact};
use pactum_core::projector::{to_self_describing, to_versioned_list};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Accumulates message expectations and projects them into a pact
#[derive(Debug, Clone, Default)]
pub struct MessagePactBuilder {
    consumer: Consumer,
    provider: Provider,
    provider_states: Vec<ProviderState>,
    messages: Vec<AsynchronousMessage>,
    current: Option<usize>,
    spec_version: PactSpecVersion,
}

impl MessagePactBuilder {
    /// Create a builder producing V3 message pacts by default
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder whose [`to_pact`](Self::to_pact) produces `version`
    pub fn with_spec_version(version: PactSpecVersion) -> Self {
        MessagePactBuilder {
            spec_version: version,
            ..Self::default()
        }
    }

    /// Create a builder from `pact.toml` settings
    pub fn from_config(config: &PactConfig) -> Self {
        let mut builder = Self::with_spec_version(config.spec_version);
        if let Some(name) = &config.consumer {
            builder.consumer = Consumer::new(name.clone());
        }
        if let Some(name) = &config.provider {
            builder.provider = Provider::new(name.clone());
        }
        builder
    }

    /// Set the consumer name
    pub fn consumer(&mut self, name: impl Into<String>) -> &mut Self {
        self.consumer = Consumer::new(name);
        self
    }

    /// Set the provider name
    pub fn has_pact_with(&mut self, name: impl Into<String>) -> &mut Self {
        self.provider = Provider::new(name);
        self
    }

    /// Add a provider state without parameters
    ///
    /// States apply to every message declared afterwards; messages already
    /// declared are not affected.
    pub fn given(&mut self, state: impl Into<String>) -> &mut Self {
        self.given_state(ProviderState::new(state))
    }

    /// Add a provider state with parameters
    pub fn given_with_params(
        &mut self,
        state: impl Into<String>,
        params: Map<String, Value>,
    ) -> &mut Self {
        self.given_state(ProviderState::with_params(state, params))
    }

    /// Add a ready-made provider state
    pub fn given_state(&mut self, state: ProviderState) -> &mut Self {
        trace!(state = %state.name, "Adding provider state");
        self.provider_states.push(state);
        self
    }

    /// Declare a new message and make it current
    ///
    /// The message is seeded with a copy of the provider states added so far.
    pub fn expects_to_receive(&mut self, description: impl Into<String>) -> &mut Self {
        let message = AsynchronousMessage::new(description, self.provider_states.clone());
        debug!(
            description = %message.description,
            states = message.provider_states.len(),
            "Declaring message"
        );
        self.messages.push(message);
        self.current = Some(self.messages.len() - 1);
        self
    }

    /// Set the interaction key of the current message
    pub fn with_key(&mut self, key: impl Into<String>) -> Result<&mut Self> {
        let message = self.current_mut("withKey")?;
        message.key = key.into();
        Ok(self)
    }

    /// Merge metadata into the current message
    ///
    /// Annotated values land in the metadata as their example, and their
    /// rules and generators are recorded at the metadata key. Fails without
    /// any change if no message is current or a regex matcher rejects its
    /// own example.
    pub fn with_metadata<I, K, V>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AnnotatedValue>,
    {
        let index = self.current_index("withMetadata")?;
        let entries: Vec<(String, AnnotatedValue)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.apply_metadata(index, entries)?;
        Ok(self)
    }

    /// Merge metadata built with a [`MetadataBuilder`] into the current message
    pub fn with_metadata_builder(
        &mut self,
        build: impl FnOnce(&mut MetadataBuilder),
    ) -> Result<&mut Self> {
        let index = self.current_index("withMetadata")?;
        let mut builder = MetadataBuilder::new();
        build(&mut builder);
        self.apply_metadata(index, builder.into_entries())?;
        Ok(self)
    }

    /// Set the content of the current message
    ///
    /// Resolves the content type from the content and current metadata,
    /// encodes the body, normalizes the metadata content type entry and
    /// replaces the body annotations. Nothing changes on failure.
    pub fn with_content(&mut self, content: impl Into<MessageContent>) -> Result<&mut Self> {
        let index = self.current_index("withContent")?;
        let content = content.into();
        let message = &self.messages[index];

        let mut metadata = message.contents.metadata.clone();
        let content_type = resolve_content_type(&mut metadata, &content)?;
        let encoded = content.codec().encode(&content_type)?;

        let mut annotations = message.contents.annotations.clone();
        annotations.clear_category(Category::Body);
        annotations.merge_all(&encoded.annotations);

        debug!(
            description = %message.description,
            kind = content.kind(),
            content_type = %content_type,
            bytes = encoded.body.bytes().len(),
            "Setting message content"
        );

        let message = &mut self.messages[index];
        message.contents.contents = encoded.body;
        message.contents.metadata = metadata;
        message.contents.annotations = annotations;
        Ok(self)
    }

    /// Set a JSON body built with the [`JsonBody`] DSL
    pub fn with_json_body(&mut self, body: JsonBody) -> Result<&mut Self> {
        self.with_content(MessageContent::Json(body.into_node()))
    }

    /// Set a plain JSON body with no annotations
    pub fn with_json(&mut self, value: Value) -> Result<&mut Self> {
        self.with_content(value)
    }

    /// Set an XML body
    pub fn with_xml(&mut self, xml: PactXmlBuilder) -> Result<&mut Self> {
        self.with_content(MessageContent::Xml(xml.into_document()))
    }

    /// Set a text body, typed by metadata or as `text/plain`
    pub fn with_text(&mut self, text: impl Into<String>) -> Result<&mut Self> {
        self.with_content(PlainText::new(text))
    }

    /// Set a text body with an explicit content type
    ///
    /// The explicit type overrides any content type already in the metadata.
    pub fn with_text_as(
        &mut self,
        text: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<&mut Self> {
        self.with_content(PlainText::with_content_type(text, content_type))
    }

    /// The message metadata and content calls apply to
    pub fn current_message(&self) -> Option<&AsynchronousMessage> {
        self.current.and_then(|i| self.messages.get(i))
    }

    /// All declared messages in order
    pub fn messages(&self) -> &[AsynchronousMessage] {
        &self.messages
    }

    /// Provider states added so far
    pub fn provider_states(&self) -> &[ProviderState] {
        &self.provider_states
    }

    /// Version [`to_pact`](Self::to_pact) produces
    pub fn spec_version(&self) -> PactSpecVersion {
        self.spec_version
    }

    /// Project into the requested document shape
    ///
    /// The builder is left untouched and may keep accumulating.
    pub fn to_pact_of(&self, kind: PactKind) -> Result<Pact> {
        match kind {
            PactKind::Message => Ok(Pact::Message(self.to_message_pact())),
            PactKind::V4 => Ok(Pact::V4(self.to_v4_pact())),
            PactKind::RequestResponse => Err(PactError::UnsupportedShape(kind.name().to_string())),
        }
    }

    /// Project into the shape selected by the configured version
    pub fn to_pact(&self) -> Pact {
        match self.spec_version {
            PactSpecVersion::V3 => Pact::Message(self.to_message_pact()),
            PactSpecVersion::V4 => Pact::V4(self.to_v4_pact()),
        }
    }

    /// Project into the V3 message pact shape
    pub fn to_message_pact(&self) -> MessagePact {
        to_versioned_list(&self.consumer, &self.provider, &self.messages)
    }

    /// Project into the V4 shape
    pub fn to_v4_pact(&self) -> V4Pact {
        to_self_describing(&self.consumer, &self.provider, &self.messages)
    }

    fn current_index(&self, operation: &'static str) -> Result<usize> {
        self.current
            .filter(|i| *i < self.messages.len())
            .ok_or(PactError::MissingExpectation { operation })
    }

    fn current_mut(&mut self, operation: &'static str) -> Result<&mut AsynchronousMessage> {
        let index = self.current_index(operation)?;
        Ok(&mut self.messages[index])
    }

    fn apply_metadata(&mut self, index: usize, entries: Vec<(String, AnnotatedValue)>) -> Result<()> {
        let mut staged = Metadata::new();
        let mut annotations = AnnotationIndex::new();
        for (key, value) in entries {
            match value {
                AnnotatedValue::Plain(value) => {
                    staged.insert(key, value);
                }
                AnnotatedValue::Annotated(matcher) => {
                    let (example, rule, generator) = matcher.into_parts();
                    if let Some(rule) = rule {
                        rule.validate_example(&key, &example)?;
                        annotations.merge_rule(Category::Metadata, key.clone(), rule);
                    }
                    if let Some(generator) = generator {
                        annotations.merge_generator(Category::Metadata, key.clone(), generator);
                    }
                    staged.insert(key, example);
                }
            }
        }

        let message = &mut self.messages[index];
        debug!(
            description = %message.description,
            entries = staged.len(),
            "Merging message metadata"
        );
        message.contents.metadata.extend(staged);
        message.contents.annotations.merge_all(&annotations);
        Ok(())
    }
}
