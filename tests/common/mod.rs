//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from any suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

pub use pactum::{
    is_content_type_key, AsynchronousMessage, Category, ContentType, JsonBody, Matcher,
    MatchingRule, MessagePactBuilder, Metadata, PactError, PactKind, PactSpecVersion,
    PactXmlBuilder, ProviderState,
};
pub use serde_json::{json, Value};
use std::sync::Once;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route builder logs to the test writer once per test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// ============================================================================
// Builders
// ============================================================================

/// Builder with consumer and provider set and no messages.
pub fn order_builder() -> MessagePactBuilder {
    init_tracing();
    let mut builder = MessagePactBuilder::new();
    builder.consumer("billing-service").has_pact_with("order-service");
    builder
}

/// Builder holding one declared message and nothing else.
pub fn builder_with_message(description: &str) -> MessagePactBuilder {
    let mut builder = order_builder();
    builder.expects_to_receive(description);
    builder
}

// ============================================================================
// Assertions
// ============================================================================

/// Number of metadata keys naming a content type, in any casing.
pub fn content_type_key_count(metadata: &Metadata) -> usize {
    metadata.keys().filter(|k| is_content_type_key(k)).count()
}

/// The message the builder currently targets.
pub fn current(builder: &MessagePactBuilder) -> &AsynchronousMessage {
    builder.current_message().expect("builder has a current message")
}

/// Body rules of a message, as sorted paths.
pub fn body_rule_paths(message: &AsynchronousMessage) -> Vec<String> {
    message
        .contents
        .matching_rules()
        .rules_for_category(Category::Body)
        .map(|c| c.iter().map(|(p, _)| p.clone()).collect())
        .unwrap_or_default()
}
