//! Matching rules
//!
//! Matching rules tell a verifier how to compare an actual value against the
//! recorded example instead of using exact equality. Rules are grouped by
//! [`Category`] and keyed by path within the category: body rules use path
//! expressions such as `$.id`, metadata rules use the metadata key.

use crate::error::{PactError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Grouping key for rules and generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Message body, keyed by path expression
    Body,
    /// Message metadata, keyed by metadata key
    Metadata,
}

impl Category {
    /// Name used in pact files
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Body => "body",
            Category::Metadata => "metadata",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PactError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "body" => Ok(Category::Body),
            "metadata" => Ok(Category::Metadata),
            other => Err(PactError::Serialization(format!(
                "unknown rule category '{}'",
                other
            ))),
        }
    }
}

/// A single matching rule
#[derive(Debug, Clone, PartialEq)]
pub enum MatchingRule {
    /// Exact equality
    Equality,
    /// String form of the value must match the regular expression
    Regex(String),
    /// Same type as the example
    Type,
    /// Same type, array has at least `n` elements
    MinType(usize),
    /// Same type, array has at most `n` elements
    MaxType(usize),
    /// Same type, array length within bounds
    MinMaxType(usize, usize),
    /// String contains the given substring
    Include(String),
    /// Any integer
    Integer,
    /// Any decimal number
    Decimal,
    /// Any number
    Number,
    /// Null value
    Null,
    /// Boolean value
    Boolean,
    /// Timestamp in the given format
    Timestamp(String),
    /// Date in the given format
    Date(String),
    /// Time in the given format
    Time(String),
    /// Content detected as the given content type
    ContentType(String),
    /// Map values are matched, keys ignored
    Values,
}

impl MatchingRule {
    /// Render in pact file form, e.g. `{"match": "type", "min": 1}`
    pub fn to_json(&self) -> Value {
        match self {
            MatchingRule::Equality => json!({"match": "equality"}),
            MatchingRule::Regex(r) => json!({"match": "regex", "regex": r}),
            MatchingRule::Type => json!({"match": "type"}),
            MatchingRule::MinType(min) => json!({"match": "type", "min": min}),
            MatchingRule::MaxType(max) => json!({"match": "type", "max": max}),
            MatchingRule::MinMaxType(min, max) => {
                json!({"match": "type", "min": min, "max": max})
            }
            MatchingRule::Include(s) => json!({"match": "include", "value": s}),
            MatchingRule::Integer => json!({"match": "integer"}),
            MatchingRule::Decimal => json!({"match": "decimal"}),
            MatchingRule::Number => json!({"match": "number"}),
            MatchingRule::Null => json!({"match": "null"}),
            MatchingRule::Boolean => json!({"match": "boolean"}),
            MatchingRule::Timestamp(f) => json!({"match": "timestamp", "format": f}),
            MatchingRule::Date(f) => json!({"match": "date", "format": f}),
            MatchingRule::Time(f) => json!({"match": "time", "format": f}),
            MatchingRule::ContentType(ct) => json!({"match": "contentType", "value": ct}),
            MatchingRule::Values => json!({"match": "values"}),
        }
    }

    /// Parse the pact file form
    pub fn from_json(value: &Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| PactError::Serialization(format!("matcher is not an object: {}", value)))?;
        let str_field = |name: &str| -> Result<String> {
            obj.get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| PactError::Serialization(format!("matcher is missing '{}'", name)))
        };
        let num_field = |name: &str| obj.get(name).and_then(Value::as_u64).map(|n| n as usize);

        let kind = obj.get("match").and_then(Value::as_str).unwrap_or("type");
        match kind {
            "equality" => Ok(MatchingRule::Equality),
            "regex" => Ok(MatchingRule::Regex(str_field("regex")?)),
            "type" => match (num_field("min"), num_field("max")) {
                (Some(min), Some(max)) => Ok(MatchingRule::MinMaxType(min, max)),
                (Some(min), None) => Ok(MatchingRule::MinType(min)),
                (None, Some(max)) => Ok(MatchingRule::MaxType(max)),
                (None, None) => Ok(MatchingRule::Type),
            },
            "include" => Ok(MatchingRule::Include(str_field("value")?)),
            "integer" => Ok(MatchingRule::Integer),
            "decimal" => Ok(MatchingRule::Decimal),
            "number" => Ok(MatchingRule::Number),
            "null" => Ok(MatchingRule::Null),
            "boolean" => Ok(MatchingRule::Boolean),
            "timestamp" => Ok(MatchingRule::Timestamp(str_field("format")?)),
            "date" => Ok(MatchingRule::Date(str_field("format")?)),
            "time" => Ok(MatchingRule::Time(str_field("format")?)),
            "contentType" => Ok(MatchingRule::ContentType(str_field("value")?)),
            "values" => Ok(MatchingRule::Values),
            other => Err(PactError::Serialization(format!(
                "unknown matcher type '{}'",
                other
            ))),
        }
    }

    /// Check the rule against the example value it annotates
    ///
    /// Only regex rules carry a constraint that an example can violate.
    pub fn validate_example(&self, path: &str, example: &Value) -> Result<()> {
        if let MatchingRule::Regex(pattern) = self {
            let anchored = format!("^(?:{})$", pattern);
            let re = regex::Regex::new(&anchored).map_err(|e| PactError::InvalidMatcher {
                path: path.to_string(),
                reason: format!("invalid regex '{}': {}", pattern, e),
            })?;
            let text = match example {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if !re.is_match(&text) {
                return Err(PactError::InvalidMatcher {
                    path: path.to_string(),
                    reason: format!("example '{}' does not match regex '{}'", text, pattern),
                });
            }
        }
        Ok(())
    }
}

/// How the rules in a list combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RuleLogic {
    /// All rules must match
    #[default]
    And,
    /// Any rule may match
    Or,
}

impl RuleLogic {
    fn as_str(&self) -> &'static str {
        match self {
            RuleLogic::And => "AND",
            RuleLogic::Or => "OR",
        }
    }
}

/// Rules applied at one path
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleList {
    /// Rules in declaration order
    pub rules: Vec<MatchingRule>,
    /// Combination logic
    pub logic: RuleLogic,
}

impl RuleList {
    /// A list holding a single rule
    pub fn new(rule: MatchingRule) -> Self {
        RuleList {
            rules: vec![rule],
            logic: RuleLogic::And,
        }
    }

    /// Render as `{"matchers": [...], "combine": "AND"}`
    pub fn to_json(&self) -> Value {
        json!({
            "matchers": self.rules.iter().map(MatchingRule::to_json).collect::<Vec<_>>(),
            "combine": self.logic.as_str(),
        })
    }

    fn from_json(value: &Value) -> Result<Self> {
        let matchers = value
            .get("matchers")
            .and_then(Value::as_array)
            .ok_or_else(|| PactError::Serialization("rule list is missing 'matchers'".to_string()))?;
        let rules = matchers
            .iter()
            .map(MatchingRule::from_json)
            .collect::<Result<Vec<_>>>()?;
        let logic = match value.get("combine").and_then(Value::as_str) {
            Some("OR") => RuleLogic::Or,
            _ => RuleLogic::And,
        };
        Ok(RuleList { rules, logic })
    }
}

/// Rules of one category, keyed by path
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchingRuleCategory {
    rules: BTreeMap<String, RuleList>,
}

impl MatchingRuleCategory {
    /// Set the rule at `path`, replacing only what was at that path
    pub fn add_rule(&mut self, path: impl Into<String>, rule: MatchingRule) {
        self.rules.insert(path.into(), RuleList::new(rule));
    }

    /// Look up the rules at `path`
    pub fn get(&self, path: &str) -> Option<&RuleList> {
        self.rules.get(path)
    }

    /// Iterate paths and their rules in path order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleList)> {
        self.rules.iter()
    }

    /// Number of paths with rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check whether no rules are set
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .rules
            .iter()
            .map(|(path, list)| (path.clone(), list.to_json()))
            .collect();
        Value::Object(map)
    }
}

/// All matching rules of a message
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchingRules {
    categories: BTreeMap<Category, MatchingRuleCategory>,
}

impl MatchingRules {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a category
    pub fn add_category(&mut self, category: Category) -> &mut MatchingRuleCategory {
        self.categories.entry(category).or_default()
    }

    /// Look up a category
    pub fn rules_for_category(&self, category: Category) -> Option<&MatchingRuleCategory> {
        self.categories.get(&category)
    }

    /// Insert or overwrite the rule at `(category, path)`
    pub fn add_rule(&mut self, category: Category, path: impl Into<String>, rule: MatchingRule) {
        self.add_category(category).add_rule(path, rule);
    }

    /// Merge another rule set; entries at other paths are left alone
    pub fn merge(&mut self, other: &MatchingRules) {
        for (category, rules) in &other.categories {
            let target = self.add_category(*category);
            for (path, list) in &rules.rules {
                target.rules.insert(path.clone(), list.clone());
            }
        }
    }

    /// Drop every rule in a category
    pub fn clear_category(&mut self, category: Category) {
        self.categories.remove(&category);
    }

    /// Check whether no category holds any rule
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(MatchingRuleCategory::is_empty)
    }

    /// Total number of paths with rules, across categories
    pub fn len(&self) -> usize {
        self.categories.values().map(MatchingRuleCategory::len).sum()
    }

    /// Render as `{"body": {"$.id": {...}}, "metadata": {...}}`
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .categories
            .iter()
            .filter(|(_, rules)| !rules.is_empty())
            .map(|(category, rules)| (category.to_string(), rules.to_json()))
            .collect();
        Value::Object(map)
    }

    /// Parse the pact file form
    pub fn from_json(value: &Value) -> Result<Self> {
        let mut rules = MatchingRules::new();
        if let Some(obj) = value.as_object() {
            for (name, paths) in obj {
                let category: Category = name.parse()?;
                let target = rules.add_category(category);
                for (path, list) in paths.as_object().into_iter().flatten() {
                    target.rules.insert(path.clone(), RuleList::from_json(list)?);
                }
            }
        }
        Ok(rules)
    }
}
