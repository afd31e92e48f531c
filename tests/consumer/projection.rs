//! Projection Tests
//!
//! The same builder state projected into both document shapes must agree
//! on every field the two shapes share.

use crate::common::*;

fn populated_builder() -> MessagePactBuilder {
    let mut builder = order_builder();
    builder.given("an order exists").expects_to_receive("order created");
    builder
        .with_metadata_builder(|m| {
            m.add("topic", "orders").matching_regex("partition", "\\d+", "7");
        })
        .unwrap();
    builder
        .with_json_body(
            JsonBody::new()
                .uuid("orderId")
                .each_like("lines", |l| l.string_type("sku", "A-1").integer_type("qty", 2)),
        )
        .unwrap();

    builder.given("order shipped").expects_to_receive("shipping label");
    builder.with_text_as("LABEL-1", "text/plain").unwrap();

    builder.expects_to_receive("binary blob");
    builder
        .with_metadata([("contentType", "text/plain; charset=US-ASCII")])
        .unwrap();
    builder.with_text("plain ascii").unwrap();
    builder
}

#[test]
fn both_shapes_agree_on_shared_fields() {
    let builder = populated_builder();
    let v3 = builder.to_message_pact();
    let v4 = builder.to_v4_pact();
    assert_eq!(v3.messages.len(), v4.interactions.len());

    for (message, interaction) in v3.messages.iter().zip(&v4.interactions) {
        assert_eq!(message.description, interaction.description);
        assert_eq!(message.provider_states, interaction.provider_states);
        assert_eq!(message.metadata, interaction.contents.metadata);
        assert_eq!(message.contents.bytes(), interaction.contents.contents.bytes());
        assert_eq!(&message.matching_rules, interaction.contents.matching_rules());
        assert_eq!(&message.generators, interaction.contents.generators());
    }
}

#[test]
fn v3_document_schema() {
    let rendered = populated_builder().to_pact_of(PactKind::Message).unwrap().to_json();
    assert_eq!(rendered["consumer"]["name"], json!("billing-service"));
    assert_eq!(rendered["provider"]["name"], json!("order-service"));
    assert_eq!(rendered["metadata"]["pactSpecification"]["version"], json!("3.0.0"));

    let first = &rendered["messages"][0];
    assert_eq!(first["description"], json!("order created"));
    assert_eq!(first["providerStates"], json!([{"name": "an order exists"}]));
    assert_eq!(first["metadata"]["topic"], json!("orders"));
    assert_eq!(first["metadata"]["contentType"], json!("application/json"));
    assert_eq!(first["contents"]["lines"][0]["qty"], json!(2));
    assert_eq!(
        first["matchingRules"]["metadata"]["partition"]["matchers"][0],
        json!({"match": "regex", "regex": "\\d+"})
    );
    assert_eq!(
        first["matchingRules"]["body"]["$.lines"]["matchers"][0],
        json!({"match": "type"})
    );
    assert!(first["matchingRules"]["body"]["$.lines[*].sku"].is_object());
    assert_eq!(first["generators"]["body"]["$.orderId"]["type"], json!("Uuid"));
    assert!(first.get("type").is_none());

    assert_eq!(rendered["messages"][1]["contents"], json!("LABEL-1"));
}

#[test]
fn v4_document_schema() {
    let rendered = populated_builder().to_pact_of(PactKind::V4).unwrap().to_json();
    assert_eq!(rendered["metadata"]["pactSpecification"]["version"], json!("4.0"));
    let interactions = rendered["interactions"].as_array().unwrap();
    assert_eq!(interactions.len(), 3);
    for interaction in interactions {
        assert_eq!(interaction["type"], json!("Asynchronous/Messages"));
        assert_eq!(interaction["pending"], json!(false));
        assert!(interaction.get("key").is_none());
    }
    assert_eq!(
        interactions[0]["contents"]["contentType"],
        json!("application/json")
    );
    assert_eq!(interactions[0]["contents"]["encoded"], json!(false));
    assert_eq!(interactions[1]["contents"]["content"], json!("LABEL-1"));
    assert_eq!(
        interactions[2]["contents"]["contentType"],
        json!("text/plain; charset=US-ASCII")
    );
}

#[test]
fn projection_leaves_builder_usable() {
    let mut builder = populated_builder();
    let before = builder.to_v4_pact();
    builder.expects_to_receive("after");
    builder.with_text("more").unwrap();
    assert_eq!(before.interactions.len(), 3);
    assert_eq!(builder.to_v4_pact().interactions.len(), 4);
}

#[test]
fn request_response_shape_is_rejected() {
    let builder = populated_builder();
    let err = builder.to_pact_of(PactKind::RequestResponse).unwrap_err();
    assert!(matches!(err, PactError::UnsupportedShape(ref s) if s == "RequestResponsePact"));
}

#[test]
fn empty_builder_projects_empty_documents() {
    let builder = order_builder();
    assert!(builder.to_pact().is_empty());
    assert!(builder.to_pact_of(PactKind::V4).unwrap().is_empty());
}
