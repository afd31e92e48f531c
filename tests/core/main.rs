//! Core Model Tests
//!
//! Tests the model below the builder:
//! - Codecs: encoding and annotation extraction per content kind
//! - Documents: pact file JSON for rules, generators and messages
//! - Index: merge semantics of rules and generators

#[path = "../common/mod.rs"]
mod common;

mod codec;
mod documents;
mod index;
