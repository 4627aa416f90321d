//! Property-based tests for the tokenizer and the tree builder
//!
//! Three families of properties:
//! - generated well-formed documents parse strictly, and the lenient
//!   parser agrees with the strict one on them (same tree, no repairs)
//! - the tokenizer reports honest lexemes: every token's raw slice is
//!   exactly the source at its offset, in strictly increasing order,
//!   on any input whatsoever
//! - tag soup never breaks the lenient builder as long as the input is
//!   lexically complete

use proptest::prelude::*;
use snx_parser::xml::{parse, parse_lenient, ParseMode, Tokenizer};

fn tag_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9]{0,8}",
        "[a-z][a-z0-9_]{1,8}",
        "[a-z][a-z0-9-]{1,8}",
    ]
}

/// Attribute sets with unique keys, rendered `k="v"`.
fn attributes_strategy() -> impl Strategy<Value = String> {
    prop::collection::btree_map("[a-z][a-z0-9_]{0,6}", "[a-zA-Z0-9 .]{0,12}", 0..3).prop_map(
        |attrs| {
            attrs
                .into_iter()
                .map(|(k, v)| format!(" {k}=\"{v}\""))
                .collect::<String>()
        },
    )
}

/// Text content free of markup-significant bytes.
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?-]{1,30}"
}

/// A well-formed element, nested up to four levels deep.
fn element_strategy() -> impl Strategy<Value = String> {
    let leaf = (
        tag_name_strategy(),
        attributes_strategy(),
        prop::option::of(text_strategy()),
    )
        .prop_map(|(name, attrs, text)| match text {
            Some(text) => format!("<{name}{attrs}>{text}</{name}>"),
            None => format!("<{name}{attrs}/>"),
        });
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            tag_name_strategy(),
            attributes_strategy(),
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(name, attrs, children)| {
                format!("<{name}{attrs}>{}</{name}>", children.join(""))
            })
    })
}

/// Fragments that are individually lexically complete but may nest
/// arbitrarily badly.
fn soup_fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-d]".prop_map(|t| format!("<{t}>")),
        "[a-d]".prop_map(|t| format!("</{t}>")),
        "[a-d]".prop_map(|t| format!("<{t}/>")),
        "[a-z0-9 ]{1,10}".prop_map(|t| t),
    ]
}

mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn well_formed_documents_parse_strictly(doc in element_strategy()) {
            let tree = parse(&doc);
            prop_assert!(tree.is_ok(), "failed to parse: {doc}");
        }

        #[test]
        fn lenient_agrees_with_strict_on_well_formed_input(doc in element_strategy()) {
            let strict = parse(&doc).unwrap();
            let outcome = parse_lenient(&doc).unwrap();
            prop_assert!(outcome.is_clean(), "unexpected repairs for: {doc}");
            prop_assert_eq!(strict, outcome.tree);
        }

        #[test]
        fn token_raw_slices_are_honest(input in "\\PC{0,120}") {
            let mut last_end = 0usize;
            for item in Tokenizer::new(&input, ParseMode::Lenient) {
                let Ok(token) = item else { break };
                prop_assert!(token.offset >= last_end);
                let end = token.offset + token.raw.len();
                prop_assert!(end <= input.len());
                prop_assert_eq!(&input[token.offset..end], token.raw.as_str());
                prop_assert!(end > token.offset, "empty lexeme at {}", token.offset);
                last_end = end;
            }
        }

        #[test]
        fn tokenizing_twice_yields_the_same_sequence(input in "\\PC{0,120}") {
            let first: Vec<_> = Tokenizer::new(&input, ParseMode::Lenient).collect();
            let second: Vec<_> = Tokenizer::new(&input, ParseMode::Lenient).collect();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn tag_soup_never_breaks_the_lenient_builder(
            fragments in prop::collection::vec(soup_fragment_strategy(), 0..24)
        ) {
            let source = fragments.join("");
            let outcome = parse_lenient(&source);
            prop_assert!(outcome.is_ok(), "lenient parse failed on: {source}");
            let outcome = outcome.unwrap();
            for record in &outcome.corrections {
                prop_assert!(record.offset <= source.len());
            }
        }
    }
}
