use crate::node::{is_node, type_of};
use serde_json::Value;

/// Read-only visitor over a JSON document
///
/// The default implementation of `visit_value` walks the whole tree in
/// document order and calls `visit_node` on every node before its children.
/// Override `visit_node` to inspect nodes; return `false` from it to skip the
/// node's children.
pub trait Visitor<'a>: Sized {
    fn visit_value(&mut self, value: &'a Value) {
        walk_value(self, value);
    }

    fn visit_node(&mut self, _node: &'a Value) -> bool {
        true
    }
}

/// Default traversal used by `Visitor::visit_value`
pub fn walk_value<'a, V: Visitor<'a>>(visitor: &mut V, value: &'a Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                visitor.visit_value(item);
            }
        }
        Value::Object(map) => {
            if is_node(value) && !visitor.visit_node(value) {
                return;
            }
            for child in map.values() {
                visitor.visit_value(child);
            }
        }
        _ => {
            // Scalars have no children
        }
    }
}

/// Visit `root` with `visitor`
pub fn visit<'a, V: Visitor<'a>>(root: &'a Value, visitor: &mut V) {
    visitor.visit_value(root);
}

struct TagCollector<'a, 't> {
    tag: &'t str,
    found: Vec<&'a Value>,
}

impl<'a, 't> Visitor<'a> for TagCollector<'a, 't> {
    fn visit_node(&mut self, node: &'a Value) -> bool {
        if type_of(node) == Some(self.tag) {
            self.found.push(node);
        }
        true
    }
}

/// Collect every node with the given type tag, in document order
pub fn filter_nodes<'a>(root: &'a Value, tag: &str) -> Vec<&'a Value> {
    let mut collector = TagCollector {
        tag,
        found: Vec::new(),
    };
    visit(root, &mut collector);
    collector.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_nodes_in_document_order() {
        let doc = json!({
            "blocks": [
                {"t": "CodeBlock", "c": [["a", [], []], "first"]},
                {"t": "Div", "c": [["", [], []], [
                    {"t": "CodeBlock", "c": [["b", [], []], "second"]}
                ]]},
                {"t": "CodeBlock", "c": [["c", [], []], "third"]}
            ]
        });

        let found = filter_nodes(&doc, "CodeBlock");
        let texts: Vec<_> = found.iter().map(|n| n["c"][1].as_str().unwrap()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert!(filter_nodes(&doc, "Table").is_empty());
    }

    #[test]
    fn test_visit_node_can_prune() {
        struct TopLevelOnly(usize);
        impl<'a> Visitor<'a> for TopLevelOnly {
            fn visit_node(&mut self, _node: &'a Value) -> bool {
                self.0 += 1;
                false
            }
        }

        let doc = json!([{"t": "Div", "c": [["", [], []], [{"t": "Para", "c": []}]]}, {"t": "HorizontalRule"}]);
        let mut visitor = TopLevelOnly(0);
        visit(&doc, &mut visitor);
        assert_eq!(visitor.0, 2);
    }
}
