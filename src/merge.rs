//! Deep merge of configuration trees.
//!
//! Trees are merged in order, later trees taking precedence:
//!
//! - Keys appear in the result in the order they were first seen.
//! - When any source holds a mapping for a key, only the mappings are merged
//!   (recursively) and every non-mapping value for that key is dropped, even
//!   one from a higher-precedence source.
//! - Otherwise the last value wins. Arrays are replaced, never concatenated.

use crate::types::{Tree, Value};
use indexmap::IndexMap;
use tracing::debug;

/// Strategy combining parsed trees into one.
pub trait Merger {
    /// Merge `trees`, lowest precedence first.
    fn merge(&self, trees: Vec<Tree>) -> Tree;
}

impl<F> Merger for F
where
    F: Fn(Vec<Tree>) -> Tree,
{
    fn merge(&self, trees: Vec<Tree>) -> Tree {
        self(trees)
    }
}

/// The default [`Merger`], backed by [`merge`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepMerger;

impl Merger for DeepMerger {
    fn merge(&self, trees: Vec<Tree>) -> Tree {
        merge(trees)
    }
}

/// Merge trees in order, with later trees taking precedence.
///
/// An empty input yields an empty tree.
///
/// # Example
/// ```
/// use serde_json::json;
/// use confight::merge::merge;
/// use confight::types::into_tree;
///
/// let base = into_tree(json!({"server": {"port": 8080, "host": "localhost"}})).unwrap();
/// let overlay = into_tree(json!({"server": {"port": 9000}, "debug": true})).unwrap();
/// let merged = merge(vec![base, overlay]);
/// assert_eq!(
///     serde_json::Value::Object(merged),
///     json!({"server": {"port": 9000, "host": "localhost"}, "debug": true})
/// );
/// ```
pub fn merge(trees: Vec<Tree>) -> Tree {
    debug!(sources = trees.len(), "Merging config data");

    let mut slots: IndexMap<String, Vec<Value>> = IndexMap::new();
    for tree in trees {
        for (key, value) in tree {
            slots.entry(key).or_default().push(value);
        }
    }

    slots
        .into_iter()
        .map(|(key, values)| (key, merge_values(values)))
        .collect()
}

/// Resolve every value collected for one key.
fn merge_values(values: Vec<Value>) -> Value {
    let mut mappings = Vec::new();
    let mut last = Value::Null;

    for value in values {
        match value {
            Value::Object(map) => mappings.push(map),
            other => last = other,
        }
    }

    if mappings.is_empty() {
        last
    } else {
        Value::Object(merge(mappings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{into_tree, keys};
    use serde_json::json;

    fn tree(value: Value) -> Tree {
        into_tree(value).unwrap()
    }

    #[test]
    fn test_last_value_wins() {
        let result = merge(vec![
            tree(json!({"key": 1})),
            tree(json!({"key": 2})),
            tree(json!({"key": 3})),
        ]);
        assert_eq!(result["key"], json!(3));
    }

    #[test]
    fn test_all_sections_are_kept() {
        let result = merge(vec![
            tree(json!({"section1": {"key1": 1}})),
            tree(json!({"section2": {"key2": 2}})),
            tree(json!({"section3": {"key3": 3}})),
        ]);
        assert_eq!(
            Value::Object(result),
            json!({
                "section1": {"key1": 1},
                "section2": {"key2": 2},
                "section3": {"key3": 3}
            })
        );
    }

    #[test]
    fn test_nested_mappings_merge_recursively() {
        let result = merge(vec![
            tree(json!({"section": {"lv1": {"lv2": {"lv3": 1, "keep": true}}}})),
            tree(json!({"section": {"lv1": {"lv2": {"lv3": 2}}}})),
            tree(json!({"section": {"lv1": {"lv2": {"lv3": 3}}}})),
        ]);
        assert_eq!(result["section"]["lv1"]["lv2"]["lv3"], json!(3));
        assert_eq!(result["section"]["lv1"]["lv2"]["keep"], json!(true));
    }

    #[test]
    fn test_scalars_never_replace_mappings() {
        let result = merge(vec![
            tree(json!({"section": {"key": 1}})),
            tree(json!({"section": null})),
            tree(json!({"section": {"key": 2}})),
            tree(json!({"section": []})),
            tree(json!({"section": {"key": 3}})),
        ]);
        assert_eq!(result["section"], json!({"key": 3}));
    }

    #[test]
    fn test_later_scalar_dropped_when_mapping_exists() {
        let result = merge(vec![
            tree(json!({"section": {"key": 1}})),
            tree(json!({"section": "override"})),
        ]);
        assert_eq!(result["section"], json!({"key": 1}));
    }

    #[test]
    fn test_mapping_replaces_earlier_scalar() {
        let result = merge(vec![
            tree(json!({"value": 42})),
            tree(json!({"value": {"nested": true}})),
        ]);
        assert_eq!(result["value"], json!({"nested": true}));
    }

    #[test]
    fn test_arrays_replaced_not_concatenated() {
        let result = merge(vec![
            tree(json!({"items": [1, 2, 3]})),
            tree(json!({"items": [4, 5]})),
        ]);
        assert_eq!(result["items"], json!([4, 5]));
    }

    #[test]
    fn test_null_overrides_scalar() {
        let result = merge(vec![tree(json!({"a": 1})), tree(json!({"a": null}))]);
        assert_eq!(result["a"], Value::Null);
    }

    #[test]
    fn test_keys_in_first_seen_order() {
        let result = merge(vec![
            tree(json!({"b": 1, "a": 1})),
            tree(json!({"c": 2, "a": 2})),
            tree(json!({"d": 3, "b": 3})),
        ]);
        assert_eq!(keys(&result), vec!["b", "a", "c", "d"]);
        assert_eq!(result["a"], json!(2));
        assert_eq!(result["b"], json!(3));
    }

    #[test]
    fn test_empty_input() {
        assert!(merge(Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_is_associative_by_position() {
        let a = tree(json!({"s": {"x": 1, "y": {"z": 1}}, "k": "a"}));
        let b = tree(json!({"s": {"y": {"z": 2, "w": 2}}, "k": "b"}));
        let c = tree(json!({"s": {"x": 3}, "n": [1]}));

        let flat = merge(vec![a.clone(), b.clone(), c.clone()]);
        let nested = merge(vec![merge(vec![a, b]), c]);
        assert_eq!(flat, nested);
        assert_eq!(keys(&flat), keys(&nested));
    }

    #[test]
    fn test_closure_merger() {
        let merger = |trees: Vec<Tree>| {
            let mut out = Tree::new();
            out.insert("count".to_string(), json!(trees.len()));
            out
        };
        let result = Merger::merge(&merger, vec![Tree::new(), Tree::new()]);
        assert_eq!(result["count"], json!(2));
    }
}
