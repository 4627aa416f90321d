//! End-to-end parse checks over a realistic social-network document

use snx_parser::xml::{parse, parse_lenient, CorrectionKind, DocumentLoader, ParseMode};

const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<users>
    <user id="1">
        <name>Grace Hopper</name>
        <posts>
            <post>
                <body>Compilers are bridges between people &amp; machines.</body>
                <topics>
                    <topic>compilers</topic>
                    <topic>history</topic>
                </topics>
            </post>
        </posts>
        <followers>
            <follower>
                <id>2</id>
            </follower>
        </followers>
        <followings>
            <following>
                <id>2</id>
            </following>
        </followings>
    </user>
    <user id="2">
        <name>Ada Lovelace</name>
        <connections>
            <friend user_id="1"/>
        </connections>
    </user>
</users>
"#;

#[test]
fn parses_the_sample_strictly_and_cleanly() {
    let tree = parse(SAMPLE).unwrap();
    assert_eq!(tree.declaration(), Some(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert_eq!(tree.top_level().len(), 1);

    let outcome = parse_lenient(SAMPLE).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.tree, tree);
}

#[test]
fn the_structure_is_what_the_document_says() {
    let tree = parse(SAMPLE).unwrap();
    let users = tree.top_level()[0];
    assert_eq!(tree.node(users).name, "users");
    assert_eq!(tree.node(users).children.len(), 2);

    let first = tree.node(users).children[0];
    assert_eq!(tree.node(first).attribute("id"), Some("1"));

    let name = tree.child_named(first, "name").unwrap();
    assert_eq!(tree.node(name).significant_text(), Some("Grace Hopper"));

    let posts = tree.child_named(first, "posts").unwrap();
    let post = tree.node(posts).children[0];
    let body = tree.child_named(post, "body").unwrap();
    assert_eq!(
        tree.node(body).significant_text(),
        Some("Compilers are bridges between people & machines.")
    );

    let topics: Vec<&str> = tree
        .elements_named("topic")
        .filter_map(|id| tree.node(id).significant_text())
        .collect();
    assert_eq!(topics, vec!["compilers", "history"]);
}

#[test]
fn container_whitespace_is_layout_not_content() {
    let tree = parse(SAMPLE).unwrap();
    let users = tree.top_level()[0];
    // The container holds plenty of indentation text, none of it significant.
    assert!(tree.node(users).text.is_some());
    assert_eq!(tree.node(users).significant_text(), None);
}

#[test]
fn a_mangled_copy_is_repaired_with_a_faithful_report() {
    // Drop one </follower> and duplicate an attribute.
    let mangled = SAMPLE
        .replace(
            "            </follower>\n",
            "",
        )
        .replace(r#"<user id="1">"#, r#"<user id="1" id="9">"#);
    let outcome = parse_lenient(&mangled).unwrap();
    let kinds: Vec<CorrectionKind> = outcome.corrections.iter().map(|r| r.kind).collect();
    assert!(kinds.contains(&CorrectionKind::DuplicateAttribute));
    assert!(kinds.contains(&CorrectionKind::UnclosedTag));

    let users = outcome.tree.top_level()[0];
    let first = outcome.tree.node(users).children[0];
    assert_eq!(outcome.tree.node(first).attribute("id"), Some("1"));
}

#[test]
fn loader_round_trips_through_a_file() {
    let dir = std::env::temp_dir().join("snx-parser-loader-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sample.xml");
    std::fs::write(&path, SAMPLE).unwrap();

    let loader = DocumentLoader::from_path(&path).unwrap();
    assert_eq!(loader.source(), SAMPLE);
    let tokens = loader.tokenize(ParseMode::Strict).unwrap();
    assert!(!tokens.is_empty());
    let tree = loader.parse().unwrap();
    assert_eq!(tree.top_level().len(), 1);

    std::fs::remove_file(&path).ok();
}
