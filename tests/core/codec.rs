//! Codec Tests

use crate::common::*;
use pactum::{
    encode_structured, encode_text, encode_xml, resolve_content_type, Charset, ContentCodec,
    ContentNode, MessageContent, PlainText, XmlDocument, XmlElement, XmlNode,
};

// ============================================================================
// Structured content
// ============================================================================

#[test]
fn structured_tree_with_mixed_leaves() {
    let mut fields = std::collections::BTreeMap::new();
    fields.insert("id".to_string(), ContentNode::from(Matcher::integer(5)));
    fields.insert("name".to_string(), ContentNode::from(json!("plain")));
    let tree = ContentNode::Object(fields);

    let encoded = encode_structured(&tree, &ContentType::json()).unwrap();
    let body: Value = serde_json::from_slice(encoded.body.bytes()).unwrap();
    assert_eq!(body, json!({"id": 5, "name": "plain"}));

    let rules = encoded
        .annotations
        .matching_rules
        .rules_for_category(Category::Body)
        .unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules.get("$.id").unwrap().rules, vec![MatchingRule::Integer]);
}

#[test]
fn field_names_needing_brackets() {
    let tree = ContentNode::from(JsonBody::new().string_type("order id", "x"));
    let encoded = tree.encode(&ContentType::json()).unwrap();
    let rules = encoded
        .annotations
        .matching_rules
        .rules_for_category(Category::Body)
        .unwrap();
    assert!(rules.get("$['order id']").is_some());
}

#[test]
fn latin1_content_replaces_unmappable_characters() {
    let tree = ContentNode::from(json!({"s": "a€b"}));
    let content_type: ContentType = "application/json; charset=ISO-8859-1".parse().unwrap();
    let encoded = encode_structured(&tree, &content_type).unwrap();
    assert_eq!(encoded.body.bytes(), br#"{"s":"a?b"}"#);
}

// ============================================================================
// XML and text
// ============================================================================

#[test]
fn xml_escapes_text_and_attributes() {
    let mut root = XmlElement::new("note");
    root.attributes
        .push(("title".to_string(), json!("\"a\" & b").into()));
    root.children.push(XmlNode::Text(json!("1 < 2").into()));
    let encoded = encode_xml(&XmlDocument::new(root), &ContentType::xml()).unwrap();
    assert_eq!(
        encoded.body.value_as_string().unwrap(),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><note title=\"&quot;a&quot; &amp; b\">1 &lt; 2</note>"
    );
    assert!(encoded.annotations.is_empty());
}

#[test]
fn xml_with_invalid_names_is_rejected() {
    let result = encode_xml(&XmlDocument::new(XmlElement::new("bad name")), &ContentType::xml());
    assert!(matches!(result, Err(PactError::InvalidXmlName { .. })));

    let mut root = XmlElement::new("order");
    root.attributes.push(("a<b".to_string(), json!("1").into()));
    let result = encode_xml(&XmlDocument::new(root), &ContentType::xml());
    assert!(
        matches!(result, Err(PactError::InvalidXmlName { ref name, .. }) if name == "a<b")
    );
}

#[test]
fn xml_in_utf16_names_the_charset_in_the_prolog() {
    let content_type: ContentType = "application/xml; charset=UTF-16".parse().unwrap();
    let encoded = encode_xml(&XmlDocument::new(XmlElement::new("ping")), &content_type).unwrap();
    assert_eq!(&encoded.body.bytes()[..2], &[0xFE, 0xFF]);
    assert_eq!(
        encoded.body.value_as_string().unwrap(),
        "<?xml version=\"1.0\" encoding=\"UTF-16\"?><ping/>"
    );
}

#[test]
fn text_has_no_annotations() {
    let encoded = encode_text("hello", &ContentType::text_plain()).unwrap();
    assert_eq!(encoded.body.bytes(), b"hello");
    assert!(encoded.annotations.is_empty());
}

#[test]
fn unsupported_charset_is_rejected() {
    let content_type: ContentType = "text/plain; charset=KOI8-R".parse().unwrap();
    assert!(matches!(
        encode_text("x", &content_type),
        Err(PactError::UnsupportedCharset(_))
    ));
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn resolution_prefers_exact_key() {
    let mut metadata = Metadata::new();
    metadata.insert("Content-Type".to_string(), json!("text/csv"));
    metadata.insert("contentType".to_string(), json!("text/html"));
    let content = MessageContent::from(PlainText::new("x"));
    let resolved = resolve_content_type(&mut metadata, &content).unwrap();
    assert_eq!(resolved.to_string(), "text/html");
    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata.get("contentType"), Some(&json!("text/html")));
}

#[test]
fn resolution_rejects_malformed_explicit_type() {
    let mut metadata = Metadata::new();
    let content = MessageContent::from(PlainText::with_content_type("x", "plain"));
    assert!(matches!(
        resolve_content_type(&mut metadata, &content),
        Err(PactError::InvalidContentType { .. })
    ));
}

#[test]
fn codec_defaults() {
    assert_eq!(
        MessageContent::from(json!(1)).codec().default_content_type(),
        ContentType::json()
    );
    assert_eq!(
        MessageContent::from(XmlDocument::new(XmlElement::new("a")))
            .codec()
            .default_content_type(),
        ContentType::xml()
    );
    assert_eq!(Charset::default(), Charset::Utf8);
}
