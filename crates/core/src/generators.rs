//! Value generators
//!
//! A generator tells a verifier to produce a fresh value at a path (a UUID,
//! a random integer, a value taken from provider state) instead of reusing
//! the recorded example.

use crate::error::{PactError, Result};
use crate::matchers::Category;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// A value generator
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    /// Random integer in `[min, max]`
    RandomInt(i64, i64),
    /// Random decimal with the given number of digits
    RandomDecimal(usize),
    /// Random hexadecimal string with the given number of digits
    RandomHexadecimal(usize),
    /// Random alphanumeric string of the given size
    RandomString(usize),
    /// Random boolean
    RandomBoolean,
    /// String generated from a regular expression
    Regex(String),
    /// Random UUID
    Uuid,
    /// Current date, optional format and expression
    Date(Option<String>, Option<String>),
    /// Current time, optional format and expression
    Time(Option<String>, Option<String>),
    /// Current date-time, optional format and expression
    DateTime(Option<String>, Option<String>),
    /// Value looked up from provider state with an expression
    ProviderState(String),
}

fn with_format(kind: &str, format: &Option<String>, expression: &Option<String>) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), json!(kind));
    if let Some(format) = format {
        map.insert("format".to_string(), json!(format));
    }
    if let Some(expression) = expression {
        map.insert("expression".to_string(), json!(expression));
    }
    Value::Object(map)
}

impl Generator {
    /// Render in pact file form, e.g. `{"type": "Uuid"}`
    pub fn to_json(&self) -> Value {
        match self {
            Generator::RandomInt(min, max) => json!({"type": "RandomInt", "min": min, "max": max}),
            Generator::RandomDecimal(digits) => json!({"type": "RandomDecimal", "digits": digits}),
            Generator::RandomHexadecimal(digits) => {
                json!({"type": "RandomHexadecimal", "digits": digits})
            }
            Generator::RandomString(size) => json!({"type": "RandomString", "size": size}),
            Generator::RandomBoolean => json!({"type": "RandomBoolean"}),
            Generator::Regex(regex) => json!({"type": "Regex", "regex": regex}),
            Generator::Uuid => json!({"type": "Uuid"}),
            Generator::Date(format, expression) => with_format("Date", format, expression),
            Generator::Time(format, expression) => with_format("Time", format, expression),
            Generator::DateTime(format, expression) => with_format("DateTime", format, expression),
            Generator::ProviderState(expression) => {
                json!({"type": "ProviderState", "expression": expression})
            }
        }
    }

    /// Parse the pact file form
    pub fn from_json(value: &Value) -> Result<Self> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| PactError::Serialization(format!("generator has no type: {}", value)))?;
        let opt_str = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        let num = |name: &str, default: u64| value.get(name).and_then(Value::as_u64).unwrap_or(default);
        match kind {
            "RandomInt" => Ok(Generator::RandomInt(
                value.get("min").and_then(Value::as_i64).unwrap_or(0),
                value.get("max").and_then(Value::as_i64).unwrap_or(10),
            )),
            "RandomDecimal" => Ok(Generator::RandomDecimal(num("digits", 10) as usize)),
            "RandomHexadecimal" => Ok(Generator::RandomHexadecimal(num("digits", 10) as usize)),
            "RandomString" => Ok(Generator::RandomString(num("size", 10) as usize)),
            "RandomBoolean" => Ok(Generator::RandomBoolean),
            "Regex" => opt_str("regex")
                .map(Generator::Regex)
                .ok_or_else(|| PactError::Serialization("Regex generator has no regex".to_string())),
            "Uuid" => Ok(Generator::Uuid),
            "Date" => Ok(Generator::Date(opt_str("format"), opt_str("expression"))),
            "Time" => Ok(Generator::Time(opt_str("format"), opt_str("expression"))),
            "DateTime" => Ok(Generator::DateTime(opt_str("format"), opt_str("expression"))),
            "ProviderState" => opt_str("expression")
                .map(Generator::ProviderState)
                .ok_or_else(|| {
                    PactError::Serialization("ProviderState generator has no expression".to_string())
                }),
            other => Err(PactError::Serialization(format!(
                "unknown generator type '{}'",
                other
            ))),
        }
    }
}

/// All generators of a message, keyed by category then path
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Generators {
    categories: BTreeMap<Category, BTreeMap<String, Generator>>,
}

impl Generators {
    /// Create an empty generator set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the generator at `(category, path)`
    pub fn add_generator(&mut self, category: Category, path: impl Into<String>, generator: Generator) {
        self.categories
            .entry(category)
            .or_default()
            .insert(path.into(), generator);
    }

    /// Insert every generator of a category-less map under `category`
    pub fn add_generators(&mut self, category: Category, generators: &BTreeMap<String, Generator>) {
        let target = self.categories.entry(category).or_default();
        for (path, generator) in generators {
            target.insert(path.clone(), generator.clone());
        }
    }

    /// Look up the generator at `(category, path)`
    pub fn get(&self, category: Category, path: &str) -> Option<&Generator> {
        self.categories.get(&category).and_then(|c| c.get(path))
    }

    /// Generators of one category
    pub fn category(&self, category: Category) -> Option<&BTreeMap<String, Generator>> {
        self.categories.get(&category)
    }

    /// Merge another generator set; entries at other paths are left alone
    pub fn merge(&mut self, other: &Generators) {
        for (category, generators) in &other.categories {
            self.add_generators(*category, generators);
        }
    }

    /// Drop every generator in a category
    pub fn clear_category(&mut self, category: Category) {
        self.categories.remove(&category);
    }

    /// Total number of generators across categories
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    /// Check whether no generator is set
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as `{"body": {"$.id": {"type": "Uuid"}}}`
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .categories
            .iter()
            .filter(|(_, generators)| !generators.is_empty())
            .map(|(category, generators)| {
                let paths: Map<String, Value> = generators
                    .iter()
                    .map(|(path, generator)| (path.clone(), generator.to_json()))
                    .collect();
                (category.to_string(), Value::Object(paths))
            })
            .collect();
        Value::Object(map)
    }

    /// Parse the pact file form
    pub fn from_json(value: &Value) -> Result<Self> {
        let mut generators = Generators::new();
        if let Some(obj) = value.as_object() {
            for (name, paths) in obj {
                let category: Category = name.parse()?;
                for (path, generator) in paths.as_object().into_iter().flatten() {
                    generators.add_generator(category, path.clone(), Generator::from_json(generator)?);
                }
            }
        }
        Ok(generators)
    }
}
