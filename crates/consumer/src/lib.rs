//! Consumer-side builder for message pacts
//!
//! This crate provides the fluent API consumers use to describe the
//! messages they expect:
//! - MessagePactBuilder: accumulates states and messages, projects them into a pact
//! - JsonBody, JsonArray: annotated JSON bodies
//! - MetadataBuilder: annotated metadata entries
//! - PactXmlBuilder: annotated XML bodies

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod dsl;

pub use builder::MessagePactBuilder;
pub use dsl::{JsonArray, JsonBody, MetadataBuilder, PactXmlBuilder, XmlElementBuilder};
