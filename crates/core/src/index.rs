//! Rule and generator index
//!
//! Pairs the matching rules and generators of one message. Every merge is
//! insert-or-overwrite at a single `(category, path)`; nothing at another
//! path is ever removed by a merge.

use crate::generators::{Generator, Generators};
use crate::matchers::{Category, MatchingRule, MatchingRules};

/// Matching rules and generators, keyed by category then path
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationIndex {
    /// Matching rules
    pub matching_rules: MatchingRules,
    /// Generators
    pub generators: Generators,
}

impl AnnotationIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a rule
    pub fn merge_rule(&mut self, category: Category, path: impl Into<String>, rule: MatchingRule) {
        self.matching_rules.add_rule(category, path, rule);
    }

    /// Insert or overwrite a generator
    pub fn merge_generator(
        &mut self,
        category: Category,
        path: impl Into<String>,
        generator: Generator,
    ) {
        self.generators.add_generator(category, path, generator);
    }

    /// Absorb the full contents of another index
    pub fn merge_all(&mut self, other: &AnnotationIndex) {
        self.matching_rules.merge(&other.matching_rules);
        self.generators.merge(&other.generators);
    }

    /// Drop every rule and generator of a category
    pub fn clear_category(&mut self, category: Category) {
        self.matching_rules.clear_category(category);
        self.generators.clear_category(category);
    }

    /// Check whether neither rules nor generators are present
    pub fn is_empty(&self) -> bool {
        self.matching_rules.is_empty() && self.generators.is_empty()
    }
}
