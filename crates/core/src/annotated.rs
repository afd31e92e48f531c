//! Annotated values
//!
//! A [`Matcher`] wraps an example value together with an optional matching
//! rule and an optional generator. It can stand anywhere a plain value is
//! expected: inside a content tree or as a metadata value. When content or
//! metadata is applied to a message, the example is stored in place and the
//! rule and generator are moved into the message's annotation index.

use crate::generators::Generator;
use crate::matchers::MatchingRule;
use serde_json::{json, Value};

/// Example used for UUID matchers when none is given
pub const UUID_EXAMPLE: &str = "e2490de5-5bd3-43d5-b7c4-526e33f71304";

/// Regex accepted by UUID matchers
pub const UUID_REGEX: &str = "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";

/// An example value carrying an optional rule and generator
///
/// # Examples
///
/// ```
/// use pactum_core::annotated::Matcher;
/// use pactum_core::generators::Generator;
///
/// let id = Matcher::integer(100).with_generator(Generator::RandomInt(1, 1000));
/// assert_eq!(id.value(), &serde_json::json!(100));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matcher {
    value: Value,
    rule: Option<MatchingRule>,
    generator: Option<Generator>,
}

impl Matcher {
    /// Wrap an example without any annotation
    pub fn new(value: impl Into<Value>) -> Self {
        Matcher {
            value: value.into(),
            rule: None,
            generator: None,
        }
    }

    /// Attach a matching rule
    pub fn with_rule(mut self, rule: MatchingRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Attach a generator
    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Match by type
    pub fn like(value: impl Into<Value>) -> Self {
        Self::new(value).with_rule(MatchingRule::Type)
    }

    /// Match by regular expression
    pub fn regex(pattern: impl Into<String>, example: impl Into<String>) -> Self {
        Self::new(Value::String(example.into()))
            .with_rule(MatchingRule::Regex(pattern.into()))
    }

    /// Match strings containing `fragment`
    pub fn include(fragment: impl Into<String>, example: impl Into<String>) -> Self {
        Self::new(Value::String(example.into()))
            .with_rule(MatchingRule::Include(fragment.into()))
    }

    /// Match any integer
    pub fn integer(example: i64) -> Self {
        Self::new(example).with_rule(MatchingRule::Integer)
    }

    /// Match any decimal
    pub fn decimal(example: f64) -> Self {
        Self::new(json!(example)).with_rule(MatchingRule::Decimal)
    }

    /// Match any number
    pub fn number(example: impl Into<Value>) -> Self {
        Self::new(example).with_rule(MatchingRule::Number)
    }

    /// Match any boolean
    pub fn boolean(example: bool) -> Self {
        Self::new(example).with_rule(MatchingRule::Boolean)
    }

    /// Match a UUID; a fresh one is generated on replay
    pub fn uuid() -> Self {
        Self::new(UUID_EXAMPLE)
            .with_rule(MatchingRule::Regex(UUID_REGEX.to_string()))
            .with_generator(Generator::Uuid)
    }

    /// Match a timestamp in `format`
    pub fn timestamp(format: impl Into<String>, example: impl Into<String>) -> Self {
        Self::new(Value::String(example.into()))
            .with_rule(MatchingRule::Timestamp(format.into()))
    }

    /// Match a date in `format`
    pub fn date(format: impl Into<String>, example: impl Into<String>) -> Self {
        Self::new(Value::String(example.into()))
            .with_rule(MatchingRule::Date(format.into()))
    }

    /// Match by type; value comes from provider state on replay
    pub fn from_provider_state(expression: impl Into<String>, example: impl Into<Value>) -> Self {
        Self::new(example)
            .with_rule(MatchingRule::Type)
            .with_generator(Generator::ProviderState(expression.into()))
    }

    /// The example value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The matching rule, if any
    pub fn rule(&self) -> Option<&MatchingRule> {
        self.rule.as_ref()
    }

    /// The generator, if any
    pub fn generator(&self) -> Option<&Generator> {
        self.generator.as_ref()
    }

    /// Split into example, rule and generator
    pub fn into_parts(self) -> (Value, Option<MatchingRule>, Option<Generator>) {
        (self.value, self.rule, self.generator)
    }
}

/// A plain value or a value carrying annotations
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotatedValue {
    /// Stored as is
    Plain(Value),
    /// Stored as its example; rule and generator are indexed
    Annotated(Matcher),
}

impl AnnotatedValue {
    /// The value that ends up in the message
    pub fn value(&self) -> &Value {
        match self {
            AnnotatedValue::Plain(v) => v,
            AnnotatedValue::Annotated(m) => m.value(),
        }
    }

    /// Check whether the value carries any annotation
    pub fn is_annotated(&self) -> bool {
        matches!(self, AnnotatedValue::Annotated(_))
    }
}

impl From<Matcher> for AnnotatedValue {
    fn from(m: Matcher) -> Self {
        AnnotatedValue::Annotated(m)
    }
}

impl From<Value> for AnnotatedValue {
    fn from(v: Value) -> Self {
        AnnotatedValue::Plain(v)
    }
}

impl From<&str> for AnnotatedValue {
    fn from(v: &str) -> Self {
        AnnotatedValue::Plain(Value::String(v.to_string()))
    }
}

impl From<String> for AnnotatedValue {
    fn from(v: String) -> Self {
        AnnotatedValue::Plain(Value::String(v))
    }
}

impl From<i64> for AnnotatedValue {
    fn from(v: i64) -> Self {
        AnnotatedValue::Plain(Value::from(v))
    }
}

impl From<i32> for AnnotatedValue {
    fn from(v: i32) -> Self {
        AnnotatedValue::Plain(Value::from(v))
    }
}

impl From<bool> for AnnotatedValue {
    fn from(v: bool) -> Self {
        AnnotatedValue::Plain(Value::Bool(v))
    }
}
