//! Annotation Index Tests

use crate::common::*;
use pactum::{AnnotationIndex, Generator};
use proptest::prelude::*;

#[test]
fn merging_distinct_paths_keeps_both() {
    let mut index = AnnotationIndex::new();
    index.merge_rule(Category::Body, "$.a", MatchingRule::Type);
    index.merge_rule(Category::Body, "$.b", MatchingRule::Integer);
    let body = index.matching_rules.rules_for_category(Category::Body).unwrap();
    assert!(body.get("$.a").is_some());
    assert!(body.get("$.b").is_some());
}

#[test]
fn merging_same_path_overwrites() {
    let mut index = AnnotationIndex::new();
    index.merge_rule(Category::Metadata, "topic", MatchingRule::Type);
    index.merge_rule(Category::Metadata, "topic", MatchingRule::Regex("o.*".to_string()));
    let rules = index
        .matching_rules
        .rules_for_category(Category::Metadata)
        .unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(
        rules.get("topic").unwrap().rules,
        vec![MatchingRule::Regex("o.*".to_string())]
    );
}

#[test]
fn clearing_one_category_keeps_the_other() {
    let mut index = AnnotationIndex::new();
    index.merge_rule(Category::Body, "$.a", MatchingRule::Type);
    index.merge_generator(Category::Body, "$.a", Generator::Uuid);
    index.merge_rule(Category::Metadata, "k", MatchingRule::Type);
    index.clear_category(Category::Body);
    assert!(index.matching_rules.rules_for_category(Category::Body).is_none());
    assert!(index.generators.category(Category::Body).is_none());
    assert_eq!(index.matching_rules.len(), 1);
}

proptest! {
    #[test]
    fn merge_never_drops_other_paths(
        first in prop::collection::btree_set("[a-z]{1,4}", 1..8),
        second in prop::collection::btree_set("[a-z]{1,4}", 1..8),
    ) {
        let mut index = AnnotationIndex::new();
        for name in &first {
            index.merge_rule(Category::Body, format!("$.{}", name), MatchingRule::Type);
        }
        let mut other = AnnotationIndex::new();
        for name in &second {
            other.merge_rule(Category::Body, format!("$.{}", name), MatchingRule::Number);
        }
        index.merge_all(&other);

        let body = index.matching_rules.rules_for_category(Category::Body).unwrap();
        prop_assert_eq!(body.len(), first.union(&second).count());
        for name in &second {
            let path = format!("$.{}", name);
            prop_assert_eq!(&body.get(&path).unwrap().rules, &vec![MatchingRule::Number]);
        }
    }
}
