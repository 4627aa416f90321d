//! Property tests for the serializer and the binary codec
//!
//! Trees are generated directly (not parsed), so the properties cover
//! shapes the tokenizer alone would never produce: deep nesting, empty
//! attribute values, text full of markup characters.

use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;

use snx_babel::{BinaryFormat, Format, SerializeOptions, XmlSerializer};
use snx_parser::xml::{parse, Attribute, NodeId, Tree};

#[derive(Debug, Clone)]
struct ElementSpec {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<ElementSpec>,
}

fn tag_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

fn attr_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    btree_map(tag_name(), "[ -~]{0,12}", 0..3).prop_map(|m| m.into_iter().collect())
}

fn text_run() -> impl Strategy<Value = String> {
    // At least one non-space character keeps the run significant.
    "[ -~]{0,8}[!-~][ -~]{0,8}"
}

fn element_spec() -> impl Strategy<Value = ElementSpec> {
    let leaf = (tag_name(), attr_pairs(), option::of(text_run())).prop_map(
        |(name, attributes, text)| ElementSpec {
            name,
            attributes,
            text,
            children: Vec::new(),
        },
    );
    leaf.prop_recursive(3, 24, 4, |inner| {
        (
            tag_name(),
            attr_pairs(),
            option::of(text_run()),
            vec(inner, 0..4),
        )
            .prop_map(|(name, attributes, text, children)| ElementSpec {
                name,
                attributes,
                text,
                children,
            })
    })
}

fn build_tree(spec: &ElementSpec) -> Tree {
    let mut tree = Tree::new();
    let root = tree.root();
    attach(&mut tree, root, spec);
    tree
}

fn attach(tree: &mut Tree, parent: NodeId, spec: &ElementSpec) {
    let attributes = spec
        .attributes
        .iter()
        .map(|(k, v)| Attribute::new(k.clone(), v.clone()))
        .collect();
    let id = tree.append_element(parent, spec.name.clone(), attributes);
    if let Some(text) = &spec.text {
        tree.append_text(id, text);
    }
    for child in &spec.children {
        attach(tree, id, child);
    }
}

mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn pretty_output_reparses_to_the_same_tree(spec in element_spec()) {
            let tree = build_tree(&spec);
            let out = XmlSerializer::new(SerializeOptions::default()).serialize(&tree);
            let reparsed = parse(&out).unwrap();
            prop_assert_eq!(reparsed.normalized(), tree.normalized());
        }

        #[test]
        fn pretty_printing_is_idempotent(spec in element_spec()) {
            let tree = build_tree(&spec);
            let first = XmlSerializer::new(SerializeOptions::default()).serialize(&tree);
            let reparsed = parse(&first).unwrap();
            let second = XmlSerializer::new(SerializeOptions::default()).serialize(&reparsed);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn minified_output_is_idempotent(spec in element_spec()) {
            let tree = build_tree(&spec);
            let first = XmlSerializer::new(SerializeOptions::minified()).serialize(&tree);
            let reparsed = parse(&first).unwrap();
            let second = XmlSerializer::new(SerializeOptions::minified()).serialize(&reparsed);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn binary_codec_preserves_normalized_trees(spec in element_spec()) {
            let tree = build_tree(&spec);
            let bytes = BinaryFormat.serialize(&tree).unwrap();
            let decoded = BinaryFormat.parse(&bytes).unwrap();
            prop_assert_eq!(decoded, tree.normalized());
        }

        #[test]
        fn binary_encoding_is_deterministic(spec in element_spec()) {
            let tree = build_tree(&spec);
            let first = BinaryFormat.serialize(&tree).unwrap();
            let second = BinaryFormat.serialize(&tree).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
