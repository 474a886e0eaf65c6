//! Serialization of loaded trees back to the declarative form.

use serde_json::{json, Value};

use crate::domain::{ChildSlot, NavDocument, NavIndex, NavTree, NodeRef};

/// Declarative forest: `[[label, target, children], ...]`.
pub fn tree_to_value(tree: &NavTree) -> Value {
    Value::Array(tree.get_root().iter().map(node_to_value).collect())
}

/// Document form: `{"tree": <forest>, "index": [...]}`.
pub fn document_to_value(document: &NavDocument) -> Value {
    json!({
        "tree": tree_to_value(&document.tree),
        "index": index_to_value(&document.index),
    })
}

pub fn index_to_value(index: &NavIndex) -> Value {
    Value::Array(index.iter().map(|e| Value::String(e.to_string())).collect())
}

/// Pretty-printed JSON of a document.
pub fn to_json_pretty(document: &NavDocument) -> String {
    format!("{:#}", document_to_value(document))
}

fn node_to_value(node: &NodeRef<'_>) -> Value {
    let children = match node.slot() {
        ChildSlot::Null => Value::Null,
        ChildSlot::Inline => Value::Array(node.children().map(|c| node_to_value(&c)).collect()),
        ChildSlot::Deferred(name) => Value::String(name.clone()),
    };
    json!([node.label(), node.target(), children])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::loader::load_tree;

    #[test]
    fn given_loaded_tree_when_serialized_then_matches_input_shape() {
        let input = json!([
            ["Classes", "annotated.html", [
                ["Class List", "annotated.html", "annotated_dup"],
                ["Class Index", "classes.html", null],
                ["Empty group", null, []]
            ]]
        ]);

        let tree = load_tree(&input.to_string()).unwrap();

        assert_eq!(tree_to_value(&tree), input);
    }
}
