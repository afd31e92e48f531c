//! Structured content trees
//!
//! A [`ContentNode`] is a JSON-shaped tree whose leaves may carry
//! annotations. Rendering a tree yields the plain JSON example; walking it
//! yields the rules and generators keyed by each annotated node's path.

use crate::annotated::{AnnotatedValue, Matcher};
use crate::error::Result;
use crate::index::AnnotationIndex;
use crate::matchers::{Category, MatchingRule};
use crate::path::DocPath;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// An array inside a content tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayNode {
    /// Elements in order
    pub items: Vec<ContentNode>,
    /// Rule applied to the array itself, e.g. a minimum length
    pub rule: Option<MatchingRule>,
    /// Elements repeat one template; annotations are keyed by `[*]`
    pub template: bool,
}

/// A node of a structured content tree
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    /// A value, possibly annotated
    Leaf(AnnotatedValue),
    /// An object with ordered fields
    Object(BTreeMap<String, ContentNode>),
    /// An array
    Array(ArrayNode),
}

impl ContentNode {
    /// An empty object node
    pub fn object() -> Self {
        ContentNode::Object(BTreeMap::new())
    }

    /// An empty array node
    pub fn array() -> Self {
        ContentNode::Array(ArrayNode::default())
    }

    /// Render the plain example value
    pub fn to_value(&self) -> Value {
        match self {
            ContentNode::Leaf(leaf) => leaf.value().clone(),
            ContentNode::Object(fields) => {
                let map: Map<String, Value> = fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect();
                Value::Object(map)
            }
            ContentNode::Array(array) => {
                Value::Array(array.items.iter().map(ContentNode::to_value).collect())
            }
        }
    }

    /// Record every annotation below `path` into `index` under `category`
    ///
    /// Regex rules are checked against their examples; the first mismatch
    /// aborts the walk.
    pub fn collect_annotations(
        &self,
        path: &DocPath,
        category: Category,
        index: &mut AnnotationIndex,
    ) -> Result<()> {
        match self {
            ContentNode::Leaf(AnnotatedValue::Plain(_)) => Ok(()),
            ContentNode::Leaf(AnnotatedValue::Annotated(matcher)) => {
                let key = path.to_string();
                if let Some(rule) = matcher.rule() {
                    rule.validate_example(&key, matcher.value())?;
                    index.merge_rule(category, key.clone(), rule.clone());
                }
                if let Some(generator) = matcher.generator() {
                    index.merge_generator(category, key, generator.clone());
                }
                Ok(())
            }
            ContentNode::Object(fields) => {
                for (name, child) in fields {
                    child.collect_annotations(&path.clone().field(name.clone()), category, index)?;
                }
                Ok(())
            }
            ContentNode::Array(array) => {
                if let Some(rule) = &array.rule {
                    index.merge_rule(category, path.to_string(), rule.clone());
                }
                if array.template {
                    if let Some(first) = array.items.first() {
                        first.collect_annotations(&path.clone().star_index(), category, index)?;
                    }
                } else {
                    for (i, item) in array.items.iter().enumerate() {
                        item.collect_annotations(&path.clone().index(i), category, index)?;
                    }
                }
                Ok(())
            }
        }
    }

    /// Annotations of the whole tree, rooted at `$`
    pub fn annotations(&self, category: Category) -> Result<AnnotationIndex> {
        let mut index = AnnotationIndex::new();
        self.collect_annotations(&DocPath::root(), category, &mut index)?;
        Ok(index)
    }
}

impl From<Value> for ContentNode {
    fn from(v: Value) -> Self {
        ContentNode::Leaf(AnnotatedValue::Plain(v))
    }
}

impl From<Matcher> for ContentNode {
    fn from(m: Matcher) -> Self {
        ContentNode::Leaf(AnnotatedValue::Annotated(m))
    }
}

impl From<AnnotatedValue> for ContentNode {
    fn from(v: AnnotatedValue) -> Self {
        ContentNode::Leaf(v)
    }
}
