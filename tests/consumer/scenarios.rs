//! Reference Scenarios
//!
//! Short call sequences with fully specified outcomes.

use crate::common::*;

#[test]
fn scenario_plain_json_content() {
    let mut builder = builder_with_message("an order event");
    builder.with_json(json!({"id": 1})).unwrap();

    let message = current(&builder);
    let mut expected = Metadata::new();
    expected.insert("contentType".to_string(), json!("application/json"));
    assert_eq!(message.contents.metadata, expected);

    let body: Value = serde_json::from_slice(message.contents.contents.bytes()).unwrap();
    assert_eq!(body, json!({"id": 1}));
    assert!(message.contents.matching_rules().is_empty());
    assert!(message.contents.generators().is_empty());
}

#[test]
fn scenario_declared_type_over_text_default() {
    let mut builder = builder_with_message("x");
    builder
        .with_metadata([("contentType", "application/avro")])
        .unwrap();
    builder.with_text("raw").unwrap();

    let message = current(&builder);
    assert_eq!(
        message.contents.contents.content_type().map(ContentType::base_type),
        Some("application/avro".to_string())
    );
    assert_eq!(content_type_key_count(&message.contents.metadata), 1);
    assert_eq!(message.contents.contents.bytes(), b"raw");
}

#[test]
fn scenario_second_content_replaces_first() {
    let mut builder = builder_with_message("m");
    builder
        .with_json_body(
            JsonBody::new()
                .string_type("name", "first")
                .each_like("items", |i| i.integer_type("n", 1)),
        )
        .unwrap();
    assert_eq!(
        body_rule_paths(current(&builder)),
        vec!["$.items", "$.items[*].n", "$.name"]
    );

    builder
        .with_json_body(JsonBody::new().boolean_type("done", true))
        .unwrap();
    let message = current(&builder);
    assert_eq!(body_rule_paths(message), vec!["$.done"]);
    assert!(message
        .contents
        .generators()
        .category(Category::Body)
        .map_or(true, |g| g.is_empty()));
    let body: Value = serde_json::from_slice(message.contents.contents.bytes()).unwrap();
    assert_eq!(body, json!({"done": true}));
}

#[test]
fn scenario_plain_content_clears_body_rules() {
    let mut builder = builder_with_message("m");
    builder
        .with_json_body(JsonBody::new().uuid("id"))
        .unwrap();
    builder.with_text("no rules here").unwrap();
    let message = current(&builder);
    assert!(body_rule_paths(message).is_empty());
    assert_eq!(
        message.contents.metadata.get("contentType"),
        Some(&json!("application/json"))
    );
}

#[test]
fn scenario_xml_message() {
    let mut builder = builder_with_message("order xml");
    builder
        .with_xml(PactXmlBuilder::new("order").build(|order| {
            order.attribute("id", Matcher::integer(7));
            order.each_like("line", 1, |line| {
                line.text(Matcher::like("widget"));
            });
        }))
        .unwrap();

    let message = current(&builder);
    assert_eq!(
        message.contents.contents.value_as_string().as_deref(),
        Some("<?xml version=\"1.0\" encoding=\"UTF-8\"?><order id=\"7\"><line>widget</line></order>")
    );
    assert_eq!(
        body_rule_paths(message),
        vec!["$.order.line", "$.order.line['#text']", "$.order['@id']"]
    );
}

#[test]
fn scenario_config_driven_builder() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(pactum::CONFIG_FILE_NAME);
    std::fs::write(&path, "spec_version = \"V4\"\nconsumer = \"c\"\nprovider = \"p\"\n").unwrap();
    let config = pactum::PactConfig::from_file(&path).unwrap();
    let mut builder = MessagePactBuilder::from_config(&config);
    builder.expects_to_receive("m");
    builder.with_key("m-1").unwrap();
    let rendered = builder.to_pact().to_json();
    assert_eq!(rendered["consumer"]["name"], json!("c"));
    assert_eq!(rendered["interactions"][0]["key"], json!("m-1"));
}
