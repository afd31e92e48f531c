//! Builder Invariant Tests
//!
//! Cursor targeting, precondition failures and provider state snapshots.

use crate::common::*;

// ============================================================================
// Preconditions
// ============================================================================

#[test]
fn metadata_without_expectation_fails() {
    let mut builder = order_builder();
    let err = builder.with_metadata([("topic", "orders")]).unwrap_err();
    assert!(matches!(
        err,
        PactError::MissingExpectation {
            operation: "withMetadata"
        }
    ));
    assert!(builder.messages().is_empty());
}

#[test]
fn content_without_expectation_fails() {
    let mut builder = order_builder();
    let err = builder.with_json(json!({"id": 1})).unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(
        err.to_string(),
        "expectsToReceive is required before withContent"
    );
    assert!(builder.messages().is_empty());
    assert_eq!(builder.to_message_pact().messages.len(), 0);
}

#[test]
fn metadata_builder_callback_not_run_without_expectation() {
    let mut builder = order_builder();
    let mut called = false;
    let result = builder.with_metadata_builder(|_| called = true);
    assert!(result.is_err());
    assert!(!called);
}

// ============================================================================
// Cursor
// ============================================================================

#[test]
fn cursor_follows_latest_expectation() {
    let mut builder = order_builder();
    for i in 0..5i64 {
        builder.expects_to_receive(format!("message {}", i));
        builder.with_metadata([("n", i)]).unwrap();
        assert_eq!(current(&builder).description, format!("message {}", i));
    }
    for (i, message) in builder.messages().iter().enumerate() {
        assert_eq!(message.contents.metadata.get("n"), Some(&json!(i)));
        assert_eq!(message.contents.metadata.len(), 1);
    }
}

#[test]
fn later_content_does_not_touch_earlier_messages() {
    let mut builder = builder_with_message("first");
    builder.with_json(json!({"a": 1})).unwrap();
    let first = builder.messages()[0].clone();

    builder.expects_to_receive("second");
    builder
        .with_json_body(JsonBody::new().integer_type("b", 2))
        .unwrap();
    builder.with_metadata([("topic", "x")]).unwrap();

    assert_eq!(builder.messages()[0], first);
}

// ============================================================================
// Provider states
// ============================================================================

#[test]
fn provider_states_are_snapshotted_per_message() {
    let mut builder = order_builder();
    builder.given("an order exists").expects_to_receive("created");
    let mut params = serde_json::Map::new();
    params.insert("id".to_string(), json!(42));
    builder
        .given_with_params("order is paid", params)
        .expects_to_receive("paid");

    let messages = builder.messages();
    assert_eq!(messages[0].provider_states.len(), 1);
    assert_eq!(messages[1].provider_states.len(), 2);
    assert_eq!(messages[1].provider_states[1].params.get("id"), Some(&json!(42)));
    assert_eq!(builder.provider_states().len(), 2);
}

#[test]
fn message_without_states() {
    let builder = builder_with_message("bare");
    assert!(builder.messages()[0].provider_states.is_empty());
    let rendered = builder.to_message_pact().to_json();
    assert!(rendered["messages"][0].get("providerStates").is_none());
}

// ============================================================================
// All-or-nothing
// ============================================================================

#[test]
fn failed_content_keeps_previous_body_and_rules() {
    let mut builder = builder_with_message("m");
    builder
        .with_json_body(JsonBody::new().string_type("name", "x"))
        .unwrap();
    let before = builder.messages().to_vec();

    let bad = JsonBody::new().string_matcher("code", "[A-Z]{3}", "abc");
    let err = builder.with_json_body(bad).unwrap_err();
    assert!(matches!(err, PactError::InvalidMatcher { .. }));
    assert_eq!(builder.messages(), before.as_slice());
}

#[test]
fn malformed_declared_content_type_fails_at_content_call() {
    let mut builder = builder_with_message("m");
    builder
        .with_metadata([("contentType", "application")])
        .unwrap();
    let before = builder.messages().to_vec();
    let err = builder.with_text("x").unwrap_err();
    assert!(matches!(err, PactError::InvalidContentType { .. }));
    assert_eq!(builder.messages(), before.as_slice());
}
