//! JSON body DSL
//!
//! Builds a [`ContentNode`] tree field by field. Typed helpers place an
//! example value in the body and attach the matching annotation at the
//! field's path.

use pactum_core::annotated::Matcher;
use pactum_core::generators::Generator;
use pactum_core::matchers::MatchingRule;
use pactum_core::tree::{ArrayNode, ContentNode};
use serde_json::Value;
use std::collections::BTreeMap;

/// A JSON object body
///
/// # Examples
///
/// ```
/// use pactum_consumer::JsonBody;
///
/// let body = JsonBody::new()
///     .uuid("id")
///     .string_type("status", "CREATED")
///     .each_like("lines", |line| line.string_type("sku", "A-1").integer_type("qty", 2));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonBody {
    fields: BTreeMap<String, ContentNode>,
}

impl JsonBody {
    /// Start an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to any node
    pub fn field(mut self, name: impl Into<String>, node: impl Into<ContentNode>) -> Self {
        self.fields.insert(name.into(), node.into());
        self
    }

    /// Exact string value
    pub fn string_value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(name, Value::String(value.into()))
    }

    /// Any string, example given
    pub fn string_type(self, name: impl Into<String>, example: impl Into<String>) -> Self {
        self.field(name, Matcher::like(Value::String(example.into())))
    }

    /// String matching `regex`, example given
    pub fn string_matcher(
        self,
        name: impl Into<String>,
        regex: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        self.field(name, Matcher::regex(regex, example))
    }

    /// Exact number value
    pub fn number_value(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.field(name, value.into())
    }

    /// Any number, example given
    pub fn number_type(self, name: impl Into<String>, example: impl Into<Value>) -> Self {
        self.field(name, Matcher::number(example))
    }

    /// Any integer, example given; a random one is generated on replay
    pub fn integer_type(self, name: impl Into<String>, example: i64) -> Self {
        self.field(
            name,
            Matcher::integer(example).with_generator(Generator::RandomInt(0, i64::from(i32::MAX))),
        )
    }

    /// Any decimal, example given
    pub fn decimal_type(self, name: impl Into<String>, example: f64) -> Self {
        self.field(name, Matcher::decimal(example))
    }

    /// Exact boolean value
    pub fn boolean_value(self, name: impl Into<String>, value: bool) -> Self {
        self.field(name, Value::Bool(value))
    }

    /// Any boolean, example given
    pub fn boolean_type(self, name: impl Into<String>, example: bool) -> Self {
        self.field(name, Matcher::boolean(example))
    }

    /// Null value
    pub fn null_value(self, name: impl Into<String>) -> Self {
        self.field(name, Value::Null)
    }

    /// Any UUID; a fresh one is generated on replay
    pub fn uuid(self, name: impl Into<String>) -> Self {
        self.field(name, Matcher::uuid())
    }

    /// Timestamp in `format`, example given
    pub fn timestamp(
        self,
        name: impl Into<String>,
        format: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        self.field(name, Matcher::timestamp(format, example))
    }

    /// Date in `format`, example given
    pub fn date(
        self,
        name: impl Into<String>,
        format: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        self.field(name, Matcher::date(format, example))
    }

    /// Value taken from provider state on replay
    pub fn value_from_provider_state(
        self,
        name: impl Into<String>,
        expression: impl Into<String>,
        example: impl Into<Value>,
    ) -> Self {
        self.field(name, Matcher::from_provider_state(expression, example))
    }

    /// Nested object
    pub fn object(self, name: impl Into<String>, build: impl FnOnce(JsonBody) -> JsonBody) -> Self {
        let node = build(JsonBody::new()).into_node();
        self.field(name, node)
    }

    /// Nested array built element by element
    pub fn array(self, name: impl Into<String>, build: impl FnOnce(JsonArray) -> JsonArray) -> Self {
        let node = build(JsonArray::new()).into_node();
        self.field(name, node)
    }

    /// Array whose elements all look like the template
    pub fn each_like(self, name: impl Into<String>, template: impl FnOnce(JsonBody) -> JsonBody) -> Self {
        self.field(name, like_array(template, 1, MatchingRule::Type))
    }

    /// Array of at least `min` elements like the template
    pub fn min_array_like(
        self,
        name: impl Into<String>,
        min: usize,
        template: impl FnOnce(JsonBody) -> JsonBody,
    ) -> Self {
        self.field(name, like_array(template, min.max(1), MatchingRule::MinType(min)))
    }

    /// Array of at most `max` elements like the template
    pub fn max_array_like(
        self,
        name: impl Into<String>,
        max: usize,
        template: impl FnOnce(JsonBody) -> JsonBody,
    ) -> Self {
        self.field(name, like_array(template, 1, MatchingRule::MaxType(max)))
    }

    /// Finish the object
    pub fn into_node(self) -> ContentNode {
        ContentNode::Object(self.fields)
    }
}

fn like_array(
    template: impl FnOnce(JsonBody) -> JsonBody,
    examples: usize,
    rule: MatchingRule,
) -> ContentNode {
    let element = template(JsonBody::new()).into_node();
    ContentNode::Array(ArrayNode {
        items: vec![element; examples],
        rule: Some(rule),
        template: true,
    })
}

impl From<JsonBody> for ContentNode {
    fn from(body: JsonBody) -> Self {
        body.into_node()
    }
}

/// A JSON array body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonArray {
    items: Vec<ContentNode>,
}

impl JsonArray {
    /// Start an empty array
    pub fn new() -> Self {
        Self::default()
    }

    /// Append any node
    pub fn push(mut self, node: impl Into<ContentNode>) -> Self {
        self.items.push(node.into());
        self
    }

    /// Append an exact string
    pub fn string_value(self, value: impl Into<String>) -> Self {
        self.push(Value::String(value.into()))
    }

    /// Append any string, example given
    pub fn string_type(self, example: impl Into<String>) -> Self {
        self.push(Matcher::like(Value::String(example.into())))
    }

    /// Append any integer, example given
    pub fn integer_type(self, example: i64) -> Self {
        self.push(Matcher::integer(example))
    }

    /// Append an object
    pub fn object(self, build: impl FnOnce(JsonBody) -> JsonBody) -> Self {
        let node = build(JsonBody::new()).into_node();
        self.push(node)
    }

    /// Finish the array
    pub fn into_node(self) -> ContentNode {
        ContentNode::Array(ArrayNode {
            items: self.items,
            rule: None,
            template: false,
        })
    }
}

impl From<JsonArray> for ContentNode {
    fn from(array: JsonArray) -> Self {
        array.into_node()
    }
}
