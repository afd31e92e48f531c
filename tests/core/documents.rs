//! Pact Document Tests

use crate::common::*;
use pactum::{Generator, Generators, MatchingRules, V4Pact};

fn annotated_message() -> MessagePactBuilder {
    let mut builder = builder_with_message("order created");
    builder
        .with_metadata_builder(|m| {
            m.from_provider_state("tenant", "${tenant}", "acme");
        })
        .unwrap();
    builder
        .with_json_body(
            JsonBody::new()
                .uuid("id")
                .timestamp("at", "yyyy-MM-dd'T'HH:mm:ss", "2024-01-01T00:00:00")
                .min_array_like("lines", 2, |l| l.decimal_type("price", 9.5)),
        )
        .unwrap();
    builder
}

#[test]
fn rendered_rules_parse_back() {
    let builder = annotated_message();
    let pact = builder.to_message_pact();
    let message = &pact.messages[0];
    let rendered = message.to_json();

    let rules = MatchingRules::from_json(&rendered["matchingRules"]).unwrap();
    assert_eq!(rules, message.matching_rules);
    let generators = Generators::from_json(&rendered["generators"]).unwrap();
    assert_eq!(generators, message.generators);
}

#[test]
fn rendered_rule_and_generator_forms() {
    let rendered = annotated_message().to_message_pact().to_json();
    let message = &rendered["messages"][0];
    assert_eq!(
        message["matchingRules"]["body"]["$.lines"],
        json!({"matchers": [{"match": "type", "min": 2}], "combine": "AND"})
    );
    assert_eq!(
        message["matchingRules"]["body"]["$.at"]["matchers"][0],
        json!({"match": "timestamp", "format": "yyyy-MM-dd'T'HH:mm:ss"})
    );
    assert_eq!(
        message["generators"]["metadata"]["tenant"],
        json!({"type": "ProviderState", "expression": "${tenant}"})
    );
    assert_eq!(message["metadata"]["tenant"], json!("acme"));
    assert_eq!(message["contents"]["lines"].as_array().unwrap().len(), 2);
}

#[test]
fn unknown_generator_is_rejected() {
    let err = Generator::from_json(&json!({"type": "Sequence"})).unwrap_err();
    assert!(matches!(err, PactError::Serialization(_)));
}

#[test]
fn ascii_body_replaces_unmappable_characters() {
    let mut builder = builder_with_message("bytes");
    builder
        .with_metadata([("contentType", "text/plain; charset=US-ASCII")])
        .unwrap();
    builder.with_text("caf\u{e9}").unwrap();
    let pact: V4Pact = builder.to_v4_pact();
    let rendered = pact.to_json();
    let contents = &rendered["interactions"][0]["contents"];
    assert_eq!(contents["encoded"], json!(false));
    assert_eq!(contents["content"], json!("caf?"));
}

#[test]
fn message_without_content_omits_contents_in_v3() {
    let builder = builder_with_message("empty");
    let rendered = builder.to_message_pact().to_json();
    assert!(rendered["messages"][0].get("contents").is_none());
    let rendered = builder.to_v4_pact().to_json();
    assert_eq!(rendered["interactions"][0]["contents"], json!({}));
}
