//! Configuration tree types.
//!
//! A parsed source is an insertion-ordered mapping of string keys to
//! [`Value`]s. `serde_json` is built with `preserve_order`, so key order
//! survives decoding, merging and rendering.

pub use serde_json::Value;

/// One configuration tree (a parsed file, or the result of a merge).
pub type Tree = serde_json::Map<String, Value>;

/// Build a [`Tree`] from a value that must be a mapping.
///
/// Returns `None` for any other shape.
pub fn into_tree(value: Value) -> Option<Tree> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Keys of a tree in order.
pub fn keys(tree: &Tree) -> Vec<&str> {
    tree.keys().map(String::as_str).collect()
}
