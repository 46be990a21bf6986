//! Postorder tree walker over arbitrary JSON.
//!
//! The walker descends into every array and object regardless of whether it
//! is a node. Once a node's children have been walked (and possibly
//! replaced), the callback sees the rebuilt node and decides what takes its
//! place:
//!
//! - `Ok(Some(value))` replaces the node (returning the input is a no-op)
//! - `Ok(None)` removes it: dropped from its array, its key dropped from its
//!   object, or `null` at the root
//! - `Err(e)` aborts the walk
//!
//! Callbacks never see non-node values, and a node's replacement is not
//! walked again by the same pass.

use crate::node::is_node;
use serde_json::{Map, Value};

/// Walk `root`, applying `f` to every node in postorder.
///
/// A removed root comes back as `Value::Null`; use [`walk_value`] to tell a
/// removed root apart from a literal `null`.
pub fn walk<F, E>(root: Value, f: &mut F) -> Result<Value, E>
where
    F: FnMut(Value) -> Result<Option<Value>, E>,
{
    Ok(walk_value(root, f)?.unwrap_or(Value::Null))
}

/// Walk `root`, returning `None` if the callback removed the root itself
pub fn walk_value<F, E>(root: Value, f: &mut F) -> Result<Option<Value>, E>
where
    F: FnMut(Value) -> Result<Option<Value>, E>,
{
    match root {
        Value::Array(items) => Ok(Some(Value::Array(walk_array(items, f)?))),
        Value::Object(map) => {
            let rebuilt = Value::Object(walk_object(map, f)?);
            if is_node(&rebuilt) {
                f(rebuilt)
            } else {
                Ok(Some(rebuilt))
            }
        }
        scalar => Ok(Some(scalar)),
    }
}

/// Walk every element of a list, dropping removed elements
pub fn walk_array<F, E>(items: Vec<Value>, f: &mut F) -> Result<Vec<Value>, E>
where
    F: FnMut(Value) -> Result<Option<Value>, E>,
{
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if let Some(value) = walk_value(item, f)? {
            out.push(value);
        }
    }
    Ok(out)
}

fn walk_object<F, E>(map: Map<String, Value>, f: &mut F) -> Result<Map<String, Value>, E>
where
    F: FnMut(Value) -> Result<Option<Value>, E>,
{
    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        if let Some(value) = walk_value(value, f)? {
            out.insert(key, value);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::type_of;
    use std::convert::Infallible;

    fn sample() -> Value {
        serde_json::json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {},
            "blocks": [
                {"t": "Para", "c": [{"t": "Str", "c": "one"}, {"t": "Space"}, {"t": "Str", "c": "two"}]},
                {"t": "HorizontalRule"},
                {"t": "BlockQuote", "c": [{"t": "Para", "c": [{"t": "Str", "c": "three"}]}]}
            ]
        })
    }

    #[test]
    fn test_identity_walk_preserves_tree() {
        let doc = sample();
        let out = walk(doc.clone(), &mut |n| Ok::<_, Infallible>(Some(n))).unwrap();
        assert_eq!(out, doc);
        assert_eq!(
            serde_json::to_string(&out).unwrap(),
            serde_json::to_string(&doc).unwrap()
        );
    }

    #[test]
    fn test_visits_children_before_parents() {
        let mut order = Vec::new();
        walk(sample(), &mut |n| {
            order.push(type_of(&n).unwrap_or_default().to_string());
            Ok::<_, Infallible>(Some(n))
        })
        .unwrap();

        assert_eq!(
            order,
            vec!["Str", "Space", "Str", "Para", "HorizontalRule", "Str", "Para", "BlockQuote"]
        );
    }

    #[test]
    fn test_parent_sees_replaced_children() {
        let out = walk(sample(), &mut |n| {
            let replaced = match type_of(&n) {
                Some("Str") => serde_json::json!({"t": "Str", "c": "x"}),
                Some("Para") => {
                    let words = n["c"].as_array().map(Vec::len).unwrap_or(0);
                    assert!(n["c"][0]["c"] == "x");
                    serde_json::json!({"t": "Para", "c": [{"t": "Str", "c": words.to_string()}]})
                }
                _ => n,
            };
            Ok::<_, Infallible>(Some(replaced))
        })
        .unwrap();

        assert_eq!(out["blocks"][0]["c"][0]["c"], "3");
    }

    #[test]
    fn test_removal() {
        let out = walk(sample(), &mut |n| {
            if type_of(&n) == Some("HorizontalRule") || type_of(&n) == Some("Space") {
                Ok::<_, Infallible>(None)
            } else {
                Ok(Some(n))
            }
        })
        .unwrap();

        assert_eq!(out["blocks"].as_array().unwrap().len(), 2);
        assert_eq!(out["blocks"][0]["c"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_removed_root() {
        let root = serde_json::json!({"t": "HorizontalRule"});
        assert_eq!(walk_value(root.clone(), &mut |_| Ok::<_, Infallible>(None)).unwrap(), None);
        assert_eq!(walk(root, &mut |_| Ok::<_, Infallible>(None)).unwrap(), Value::Null);
    }

    #[test]
    fn test_error_aborts() {
        let mut seen = 0;
        let result = walk(sample(), &mut |n| {
            seen += 1;
            if type_of(&n) == Some("HorizontalRule") {
                Err("boom")
            } else {
                Ok(Some(n))
            }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(seen, 5);
    }

    #[test]
    fn test_untagged_values_are_not_dispatched() {
        let doc = serde_json::json!({"meta": {"title": {"c": "no tag"}}, "list": [[1, 2], "s", null]});
        let mut calls = 0;
        let out = walk(doc.clone(), &mut |n| {
            calls += 1;
            Ok::<_, Infallible>(Some(n))
        })
        .unwrap();
        assert_eq!(calls, 0);
        assert_eq!(out, doc);
    }
}
