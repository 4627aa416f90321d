//! JSON export
//!
//!     One-way projection of the document tree into JSON, for handing
//!     documents to tools that speak JSON but not XML. Attributes land
//!     under `"@attributes"`, significant text under `"@text"`, and child
//!     elements are grouped by tag name: a single child becomes an
//!     object, repeated children become an array in document order. The
//!     mapping is lossy (tag grouping forgets interleaving), so there is
//!     no parse direction.

use std::collections::BTreeMap;

use crate::error::FormatError;
use crate::format::Format;
use snx_parser::xml::{NodeId, Tree};

/// JSON value for the whole document.
///
/// The document root maps like any element, so a document with several
/// top-level elements still exports as one object.
pub fn export_value(tree: &Tree) -> serde_json::Value {
    node_value(tree, tree.root())
}

fn node_value(tree: &Tree, id: NodeId) -> serde_json::Value {
    let node = tree.node(id);
    let mut map = serde_json::Map::new();

    if !node.attributes.is_empty() {
        let mut attrs = serde_json::Map::new();
        for attr in &node.attributes {
            attrs.insert(
                attr.key.clone(),
                serde_json::Value::String(attr.value.clone()),
            );
        }
        map.insert("@attributes".to_string(), serde_json::Value::Object(attrs));
    }

    if let Some(text) = node.significant_text() {
        map.insert(
            "@text".to_string(),
            serde_json::Value::String(text.to_string()),
        );
    }

    let mut groups: BTreeMap<&str, Vec<serde_json::Value>> = BTreeMap::new();
    for &child in &node.children {
        groups
            .entry(tree.node(child).name.as_str())
            .or_default()
            .push(node_value(tree, child));
    }
    for (name, mut values) in groups {
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            serde_json::Value::Array(values)
        };
        map.insert(name.to_string(), value);
    }

    serde_json::Value::Object(map)
}

/// Format implementation for JSON export
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON export of the document tree"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &Tree) -> Result<Vec<u8>, FormatError> {
        serde_json::to_vec_pretty(&export_value(tree))
            .map_err(|e| FormatError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use snx_parser::xml::parse;

    fn exported(source: &str) -> serde_json::Value {
        export_value(&parse(source).unwrap())
    }

    #[test]
    fn attributes_and_text_use_reserved_keys() {
        let value = exported("<user id=\"1\" role=\"admin\">Ada</user>");
        assert_eq!(
            value,
            json!({
                "user": {
                    "@attributes": { "id": "1", "role": "admin" },
                    "@text": "Ada"
                }
            })
        );
    }

    #[test]
    fn single_child_is_an_object_repeated_children_an_array() {
        let value = exported(
            "<users><user id=\"1\"/><user id=\"2\"/><meta><count>2</count></meta></users>",
        );
        assert_eq!(
            value,
            json!({
                "users": {
                    "user": [
                        { "@attributes": { "id": "1" } },
                        { "@attributes": { "id": "2" } }
                    ],
                    "meta": { "count": { "@text": "2" } }
                }
            })
        );
    }

    #[test]
    fn repeated_children_keep_document_order() {
        let value = exported("<l><i>1</i><i>2</i><i>3</i></l>");
        let items = &value["l"]["i"];
        assert_eq!(
            items,
            &json!([{ "@text": "1" }, { "@text": "2" }, { "@text": "3" }])
        );
    }

    #[test]
    fn whitespace_only_text_is_omitted() {
        let value = exported("<users>\n    <user id=\"1\"/>\n</users>");
        assert_eq!(
            value,
            json!({ "users": { "user": { "@attributes": { "id": "1" } } } })
        );
    }

    #[test]
    fn childless_attributeless_element_is_an_empty_object() {
        assert_eq!(exported("<a><b/></a>"), json!({ "a": { "b": {} } }));
    }

    #[test]
    fn empty_tree_exports_an_empty_object() {
        assert_eq!(export_value(&Tree::new()), json!({}));
    }

    #[test]
    fn json_format_is_serialize_only() {
        let format = JsonFormat;
        assert!(!format.supports_parsing());
        assert!(format.supports_serialization());
        assert!(matches!(
            format.parse(b"{}"),
            Err(FormatError::NotSupported(_))
        ));
    }

    #[test]
    fn serialized_bytes_are_pretty_printed_json() {
        let format = JsonFormat;
        let tree = parse("<a><b/></a>").unwrap();
        let bytes = format.serialize(&tree).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"a\""));
        let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, export_value(&tree));
    }
}
