use serde_json::json;

use crate::node::{DocumentNode, DocumentTree};

/// Serialize a whole tree to JSON, resolved values included.
///
/// See [`node_to_json`] for the shape.
pub fn tree_to_json(tree: &DocumentTree) -> serde_json::Value {
    node_to_json(tree.root())
}

/// Serialize one node (and everything under it) to JSON.
///
/// Duplicate keys are the norm in this dialect, so children and pairs export
/// as arrays of entries rather than JSON objects, preserving duplicates and
/// document order:
///
/// ```json
/// {
///   "key": "HUM",
///   "pairs": [ { "key": "archetype", "value": "BIOLOGICAL" } ],
///   "values": [ "# a retained comment" ],
///   "children": [ ... ]
/// }
/// ```
///
/// Pair values are the resolved ones; resolving here is what display
/// consumers want, and it goes through the node's memoized view.
pub fn node_to_json(node: DocumentNode<'_>) -> serde_json::Value {
    json!({
        "key": node.key(),
        "pairs": node.key_values(),
        "values": node.values(),
        "children": node
            .children()
            .map(node_to_json)
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::resolver::TableResolver;

    #[test]
    fn test_export_shape() {
        let tree = DocumentBuilder::new()
            .parse_str(
                "# header\nHUM = { archetype = BIOLOGICAL }\nHUM = { archetype = ALT }",
                "species.txt",
            )
            .unwrap();

        let v = tree_to_json(&tree);
        assert_eq!(v["key"], "species.txt");
        assert_eq!(v["values"][0], "# header");
        // duplicates preserved as an array of entries
        assert_eq!(v["children"].as_array().unwrap().len(), 2);
        assert_eq!(v["children"][0]["pairs"][0]["key"], "archetype");
        assert_eq!(v["children"][1]["pairs"][0]["value"], "ALT");
    }

    #[test]
    fn test_export_uses_resolved_values() {
        let mut table = HashMap::new();
        table.insert("@tier1cost".to_string(), "100".to_string());
        let builder = DocumentBuilder::with_resolver(Arc::new(TableResolver::new(table)));
        let tree = builder.parse_str("t = { cost = @tier1cost }", "traits.txt").unwrap();

        let v = tree_to_json(&tree);
        assert_eq!(v["children"][0]["pairs"][0]["value"], "100");
    }
}
