// Command tree for the snx binary. Kept free of handler logic so the
// build script can include this file and generate shell completions
// from the same definition.

use clap::{Arg, ArgAction, ArgGroup, Command};

/// Required `-i/--input` argument shared by every subcommand.
fn input_arg() -> Arg {
    Arg::new("input")
        .short('i')
        .long("input")
        .value_name("PATH")
        .help("Path to the input XML file")
        .required(true)
}

/// Optional `-o/--output` argument; commands print to stdout without it.
fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("PATH")
        .help("Path to the output file")
}

/// The full snx command tree.
pub fn build_cli() -> Command {
    Command::new("snx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for verifying, converting and analyzing social-network XML files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("TOML configuration file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("verify")
                .about("Verify the structure of the XML file, reporting every repair")
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("fix")
                        .short('f')
                        .long("fix")
                        .action(ArgAction::SetTrue)
                        .requires("output")
                        .help("Write the repaired, formatted document to the output path"),
                ),
        )
        .subcommand(
            Command::new("format")
                .about("Pretty-print the XML file")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("json")
                .about("Convert the XML file to JSON")
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("users")
                        .long("users")
                        .action(ArgAction::SetTrue)
                        .help("Emit the users/posts/followers shape instead of the structural export"),
                ),
        )
        .subcommand(
            Command::new("mini")
                .about("Minify the XML file")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("compress")
                .about("Compress the XML file to the snxb binary format")
                .arg(input_arg())
                .arg(output_arg().required(true)),
        )
        .subcommand(
            Command::new("decompress")
                .about("Decompress an snxb file back to pretty-printed XML")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("search")
                .about("Search the posts in the XML file")
                .arg(input_arg())
                .arg(
                    Arg::new("word")
                        .short('w')
                        .long("word")
                        .value_name("WORD")
                        .help("Match posts containing the word"),
                )
                .arg(
                    Arg::new("topic")
                        .short('t')
                        .long("topic")
                        .value_name("TOPIC")
                        .help("Match posts filed under the topic"),
                )
                .group(ArgGroup::new("query").args(["word", "topic"]).required(true)),
        )
        .subcommand(
            Command::new("most-active")
                .about("Name the user who follows the most people")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("most-influencer")
                .about("Name the user with the most followers")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("mutual")
                .about("List followers common to every listed user")
                .arg(input_arg())
                .arg(
                    Arg::new("ids")
                        .long("ids")
                        .value_name("IDS")
                        .required(true)
                        .help("User ids, e.g. 1,2,3"),
                ),
        )
        .subcommand(
            Command::new("suggest")
                .about("Suggest users to follow, ranked by shared followings")
                .arg(input_arg())
                .arg(
                    Arg::new("id")
                        .long("id")
                        .value_name("ID")
                        .required(true)
                        .help("Id of the user to suggest for"),
                ),
        )
}
