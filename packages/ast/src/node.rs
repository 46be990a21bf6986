//! Dynamic node helpers over `serde_json::Value`.
//!
//! A node is any JSON object carrying a string `"t"` tag. Its payload, when it
//! has one, lives under `"c"`. Everything else (arrays, untagged objects,
//! scalars) is opaque to filters and only ever recursed into.

use serde_json::{Map, Value};

/// Key holding a node's type tag
pub const TYPE_KEY: &str = "t";

/// Key holding a node's payload
pub const CONTENT_KEY: &str = "c";

/// Returns true if the value is an object with a string type tag
pub fn is_node(value: &Value) -> bool {
    type_of(value).is_some()
}

/// Type tag of a node, `None` for non-nodes
pub fn type_of(value: &Value) -> Option<&str> {
    value.as_object()?.get(TYPE_KEY)?.as_str()
}

/// Payload of a node, `None` for non-nodes and nullary nodes
pub fn content_of(value: &Value) -> Option<&Value> {
    if !is_node(value) {
        return None;
    }
    value.as_object()?.get(CONTENT_KEY)
}

/// Build a new node. Nullary nodes (e.g. `HorizontalRule`) pass `None`.
pub fn make_node(tag: &str, content: Option<Value>) -> Value {
    let mut map = Map::new();
    map.insert(TYPE_KEY.to_string(), Value::String(tag.to_string()));
    if let Some(content) = content {
        map.insert(CONTENT_KEY.to_string(), content);
    }
    Value::Object(map)
}

/// Top-level block list of a pandoc document
pub fn blocks(document: &Value) -> Option<&Vec<Value>> {
    document.get("blocks")?.as_array()
}

/// Consume a document and return its blocks, or an empty list if it has none
pub fn take_blocks(document: Value) -> Vec<Value> {
    match document {
        Value::Object(mut map) => match map.remove("blocks") {
            Some(Value::Array(blocks)) => blocks,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Plain text of an inline list: `Str` words joined by spaces
pub fn stringify(inlines: &[Value]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match type_of(inline) {
            Some("Str") => {
                if let Some(text) = content_of(inline).and_then(Value::as_str) {
                    out.push_str(text);
                }
            }
            Some("Space") | Some("SoftBreak") | Some("LineBreak") => out.push(' '),
            Some("Code") => {
                if let Some(text) = content_of(inline)
                    .and_then(|c| c.get(1))
                    .and_then(Value::as_str)
                {
                    out.push_str(text);
                }
            }
            Some(_) => {
                // Emph, Strong, Link, ... carry their inlines somewhere in the payload
                if let Some(Value::Array(parts)) = content_of(inline) {
                    for part in parts {
                        if let Value::Array(nested) = part {
                            out.push_str(&stringify(nested));
                        }
                    }
                    if parts.iter().all(is_node) {
                        out.push_str(&stringify(parts));
                    }
                }
            }
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_node() {
        assert!(is_node(&json!({"t": "Para", "c": []})));
        assert!(is_node(&json!({"t": "HorizontalRule"})));
        assert!(!is_node(&json!({"c": []})));
        assert!(!is_node(&json!({"t": 3})));
        assert!(!is_node(&json!([{"t": "Para"}])));
        assert!(!is_node(&json!("Para")));
    }

    #[test]
    fn test_accessors() {
        let node = json!({"t": "Str", "c": "hello"});
        assert_eq!(type_of(&node), Some("Str"));
        assert_eq!(content_of(&node), Some(&json!("hello")));

        let rule = json!({"t": "HorizontalRule"});
        assert_eq!(content_of(&rule), None);
        assert_eq!(content_of(&json!({"c": 1})), None);
    }

    #[test]
    fn test_make_node() {
        assert_eq!(
            make_node("Str", Some(json!("x"))),
            json!({"t": "Str", "c": "x"})
        );
        assert_eq!(make_node("HorizontalRule", None), json!({"t": "HorizontalRule"}));
    }

    #[test]
    fn test_take_blocks() {
        let doc = json!({"pandoc-api-version": [1, 23], "meta": {}, "blocks": [{"t": "HorizontalRule"}]});
        assert_eq!(blocks(&doc).map(Vec::len), Some(1));
        assert_eq!(take_blocks(doc), vec![json!({"t": "HorizontalRule"})]);
        assert!(take_blocks(json!([])).is_empty());
    }

    #[test]
    fn test_stringify() {
        let inlines = vec![
            json!({"t": "Str", "c": "Hello"}),
            json!({"t": "Space"}),
            json!({"t": "Emph", "c": [{"t": "Str", "c": "world"}]}),
        ];
        assert_eq!(stringify(&inlines), "Hello world");
    }
}
