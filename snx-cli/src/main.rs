//! Command-line interface for snx
//! This binary verifies, converts and analyzes social-network XML files.
//!
//! Usage:
//!   snx verify -i in.xml [-o out.xml -f]  - Report (and optionally fix) structural damage
//!   snx format -i in.xml [-o out.xml]     - Pretty-print
//!   snx json -i in.xml [--users]          - Convert to JSON
//!   snx mini -i in.xml [-o out.xml]       - Minify
//!   snx compress -i in.xml -o out.snxb    - Compress to the snxb binary format
//!   snx decompress -i in.snxb [-o out]    - Back to pretty XML
//!   snx search -i in.xml -w WORD|-t TOPIC - Search the posts
//!   snx most-active | most-influencer     - Degree analysis
//!   snx mutual --ids 1,2 | suggest --id 1 - Follow-graph queries

mod cli;

use std::fs;
use std::process;

use clap::ArgMatches;
use snx_babel::{BinaryFormat, FormatRegistry, JsonFormat, XmlFormat};
use snx_config::SnxConfig;
use snx_network::{network_from_tree, FollowGraph, PostQuery, SocialNetwork};
use snx_parser::xml::{DocumentLoader, Tree};

/// Parse, validation, or codec failure.
const EXIT_DATA: i32 = 1;
/// Filesystem or configuration failure.
const EXIT_IO: i32 = 2;

fn main() {
    env_logger::init();

    let matches = cli::build_cli().get_matches();
    let config = load_config(&matches);
    let registry = registry_for(&config);

    match matches.subcommand() {
        Some(("verify", m)) => handle_verify_command(m, &registry),
        Some(("format", m)) => handle_format_command(m, &registry),
        Some(("json", m)) => handle_json_command(m, &registry),
        Some(("mini", m)) => handle_mini_command(m, &registry),
        Some(("compress", m)) => handle_compress_command(m, &registry),
        Some(("decompress", m)) => handle_decompress_command(m, &registry),
        Some(("search", m)) => handle_search_command(m),
        Some(("most-active", m)) => handle_most_active_command(m),
        Some(("most-influencer", m)) => handle_most_influencer_command(m),
        Some(("mutual", m)) => handle_mutual_command(m),
        Some(("suggest", m)) => handle_suggest_command(m, &config),
        _ => unreachable!("subcommand is required"),
    }
}

/// Handle the verify command
///
/// Lenient parse; the repair log goes to stdout in document order. With
/// `--fix` the repaired tree is formatted into the output path and the
/// run succeeds; without it, any repair means a damaged document and the
/// data exit code.
fn handle_verify_command(matches: &ArgMatches, registry: &FormatRegistry) {
    let loader = read_input(matches);
    let outcome = loader.parse_lenient().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(EXIT_DATA);
    });

    for record in &outcome.corrections {
        println!("{}", record);
    }
    if outcome.corrections.is_empty() {
        println!("document is well-formed");
    }

    if matches.get_flag("fix") {
        let rendered = serialize_with(registry, &outcome.tree, "xml");
        let path = matches
            .get_one::<String>("output")
            .expect("--fix requires --output");
        write_output(path, &rendered);
        println!("saved to {}", path);
    } else if !outcome.corrections.is_empty() {
        process::exit(EXIT_DATA);
    }
}

/// Handle the format command
fn handle_format_command(matches: &ArgMatches, registry: &FormatRegistry) {
    let loader = read_input(matches);
    let tree = parse_strict(&loader);
    let rendered = serialize_with(registry, &tree, "xml");
    emit(matches, &rendered);
}

/// Handle the json command
fn handle_json_command(matches: &ArgMatches, registry: &FormatRegistry) {
    let loader = read_input(matches);
    let tree = parse_strict(&loader);

    let rendered = if matches.get_flag("users") {
        let network = network_from_tree(&tree);
        let value = snx_network::users_value(&network);
        match serde_json::to_string_pretty(&value) {
            Ok(text) => text.into_bytes(),
            Err(e) => {
                eprintln!("serialize error: {}", e);
                process::exit(EXIT_DATA);
            }
        }
    } else {
        serialize_with(registry, &tree, "json")
    };
    emit(matches, &rendered);
}

/// Handle the mini command
fn handle_mini_command(matches: &ArgMatches, registry: &FormatRegistry) {
    let loader = read_input(matches);
    let tree = parse_strict(&loader);
    let rendered = serialize_with(registry, &tree, "xml-min");
    emit(matches, &rendered);
}

/// Handle the compress command
fn handle_compress_command(matches: &ArgMatches, registry: &FormatRegistry) {
    let loader = read_input(matches);
    let tree = parse_strict(&loader);
    let encoded = serialize_with(registry, &tree, "snxb");
    let path = matches
        .get_one::<String>("output")
        .expect("output is required");
    write_output(path, &encoded);
    println!("saved to {}", path);
}

/// Handle the decompress command
fn handle_decompress_command(matches: &ArgMatches, registry: &FormatRegistry) {
    let bytes = fs::read(input_path(matches)).unwrap_or_else(|e| {
        eprintln!("IO error: {}", e);
        process::exit(EXIT_IO);
    });
    let tree = registry.parse(&bytes, "snxb").unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(EXIT_DATA);
    });
    let rendered = serialize_with(registry, &tree, "xml");
    match matches.get_one::<String>("output") {
        Some(path) => {
            write_output(path, &rendered);
            println!("saved to {}", path);
        }
        None => emit(matches, &rendered),
    }
}

/// Handle the search command
fn handle_search_command(matches: &ArgMatches) {
    let network = network_from_input(matches);
    let query = match matches.get_one::<String>("word") {
        Some(word) => PostQuery::word(word).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(EXIT_DATA);
        }),
        None => {
            let topic = matches
                .get_one::<String>("topic")
                .expect("the query group requires a word or a topic");
            PostQuery::topic(topic)
        }
    };

    let hits = snx_network::search_posts(&network, &query);
    if hits.is_empty() {
        println!("we didn't find any matching post");
        return;
    }
    for (index, hit) in hits.iter().enumerate() {
        println!("{}. {} (id {})", index + 1, hit.user_name, hit.user_id);
        println!("   {}", hit.content);
        if !hit.topics.is_empty() {
            println!("   topics: {}", hit.topics.join(", "));
        }
    }
}

/// Handle the most-active command
fn handle_most_active_command(matches: &ArgMatches) {
    let network = network_from_input(matches);
    let graph = FollowGraph::new(&network);
    match graph.most_active() {
        Some(entry) => println!(
            "the most active person is: {}\nwith an id of: {}",
            entry.name, entry.id
        ),
        None => println!("the network has no users"),
    }
}

/// Handle the most-influencer command
fn handle_most_influencer_command(matches: &ArgMatches) {
    let network = network_from_input(matches);
    let graph = FollowGraph::new(&network);
    match graph.most_influential() {
        Some(entry) => println!(
            "the person that has the most influence is: {}\nwith an id of: {}",
            entry.name, entry.id
        ),
        None => println!("the network has no users"),
    }
}

/// Handle the mutual command
fn handle_mutual_command(matches: &ArgMatches) {
    let network = network_from_input(matches);
    let graph = FollowGraph::new(&network);
    let raw = matches.get_one::<String>("ids").expect("ids is required");
    let ids = digit_runs(raw);

    let mutual = graph.mutual_followers(&ids);
    if mutual.is_empty() {
        println!("we didn't find any mutual friend");
        return;
    }
    println!("we found some mutual friends you might wanna check out:");
    for (index, profile) in mutual.iter().enumerate() {
        println!("{}. {} (id {})", index + 1, profile.name, profile.id);
    }
}

/// Handle the suggest command
fn handle_suggest_command(matches: &ArgMatches, config: &SnxConfig) {
    let network = network_from_input(matches);
    let graph = FollowGraph::new(&network);
    let id = matches.get_one::<String>("id").expect("id is required");

    let suggested = graph.suggestions_for(id.trim(), config.network.suggest_limit);
    if suggested.is_empty() {
        println!("we couldn't suggest any new friend");
        return;
    }
    println!("we can suggest some new friends you might wanna check out:");
    for (index, suggestion) in suggested.iter().enumerate() {
        println!("{}. {} (id {})", index + 1, suggestion.name, suggestion.id);
    }
}

/// Read the configuration, layering the `--config` file when present.
fn load_config(matches: &ArgMatches) -> SnxConfig {
    let loader = match matches.get_one::<String>("config") {
        Some(path) => snx_config::Loader::new().with_file(path),
        None => snx_config::Loader::new(),
    };
    loader.build().unwrap_or_else(|e| {
        eprintln!("configuration error: {}", e);
        process::exit(EXIT_IO);
    })
}

/// Registry whose pretty XML entry carries the configured formatting knobs.
fn registry_for(config: &SnxConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(XmlFormat::with_options(config.formatting.serialize_options()));
    registry.register(XmlFormat::minified());
    registry.register(JsonFormat);
    registry.register(BinaryFormat);
    registry
}

fn input_path(matches: &ArgMatches) -> &str {
    matches.get_one::<String>("input").expect("input is required")
}

/// Read the input document named by `-i`.
fn read_input(matches: &ArgMatches) -> DocumentLoader {
    DocumentLoader::from_path(input_path(matches)).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(EXIT_IO);
    })
}

/// Strict parse for the conversion commands; malformed input is fatal.
fn parse_strict(loader: &DocumentLoader) -> Tree {
    loader.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(EXIT_DATA);
    })
}

/// Lenient parse plus extraction for the analysis commands: a damaged
/// export should still answer queries.
fn network_from_input(matches: &ArgMatches) -> SocialNetwork {
    let loader = read_input(matches);
    let outcome = loader.parse_lenient().unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(EXIT_DATA);
    });
    network_from_tree(&outcome.tree)
}

/// Serialize through the registry, treating any failure as a data error.
fn serialize_with(registry: &FormatRegistry, tree: &Tree, format: &str) -> Vec<u8> {
    registry.serialize(tree, format).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(EXIT_DATA);
    })
}

/// Write to the `-o` path when given, otherwise print to stdout.
fn emit(matches: &ArgMatches, bytes: &[u8]) {
    match matches.get_one::<String>("output") {
        Some(path) => write_output(path, bytes),
        None => {
            let text = String::from_utf8_lossy(bytes);
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
}

fn write_output(path: &str, bytes: &[u8]) {
    if let Err(e) = fs::write(path, bytes) {
        eprintln!("IO error: {}", e);
        process::exit(EXIT_IO);
    }
}

/// Every run of decimal digits in `raw`, in order. Ids may be separated
/// by commas, spaces, or anything else.
fn digit_runs(raw: &str) -> Vec<&str> {
    raw.split(|c: char| !c.is_ascii_digit())
        .filter(|chunk| !chunk.is_empty())
        .collect()
}
