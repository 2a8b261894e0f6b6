// Command-line interface for novel-md
//
// This binary converts Novel editor content between editor HTML, Markdown and the editor's JSON
// document format. The conversions themselves live in the novel-md crate; this crate only wires
// files, configuration and logging around them.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag. Reading from stdin ("-") requires --from.
// Usage:
//  novel-md <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  novel-md convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  novel-md roundtrip <input> [--from <format>]  - Show the Markdown export and re-import of a document
//  novel-md --list-formats                       - List available formats
//
// Extra Parameters:
//
// Configuration keys can be overridden using --extra-<parameter-name> <value>.
// Example:
//  novel-md notes.html --to markdown --extra-bullet-marker '*'
//
// Logging goes to stderr and is controlled with RUST_LOG (defaults to "warn").

use clap::{Arg, ArgAction, Command, ValueHint};
use novel_md::FormatRegistry;
use novel_md_config::{Loader, NovelMdConfig};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A lone "-" is a value (stdin or a bullet marker), not a flag.
            let has_value = if i + 1 < args.len() {
                let next = &args[i + 1];
                next == "-" || !next.starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or '-' for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_hint(ValueHint::Other)
}

fn build_cli() -> Command {
    Command::new("novel-md")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Novel editor content between HTML, Markdown and editor JSON")
        .long_about(
            "novel-md converts content of the Novel block editor.\n\n\
            Formats:\n  \
            - html:     Editor HTML (.html, .htm)\n  \
            - markdown: Markdown with task lists (.md, .markdown)\n  \
            - editor:   Editor document JSON (.json)\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration keys\n  \
            (bullet-marker, strong-delimiter, em-delimiter, strike-delimiter,\n  \
            code-fence, strikethrough, table, autolink, pretty).\n\n\
            Examples:\n  \
            novel-md notes.html --to markdown           # Convert to markdown (stdout)\n  \
            novel-md notes.md --to editor -o doc.json   # Load markdown as an editor document\n  \
            novel-md roundtrip doc.json                 # Export and re-import a stored document",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a novel-md.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between formats (default command)")
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Print the Markdown export of a document and its re-import")
                .long_about(
                    "Runs the editor's export pipeline on an HTML or editor JSON document:\n\
                    the document is converted to Markdown, the Markdown back to HTML, and\n\
                    that HTML loaded as an editor document. All three stages are printed.",
                )
                .arg(input_arg())
                .arg(from_arg()),
        )
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare input path means the default "convert" subcommand.
            if cleaned_args.len() > 1
                && (cleaned_args[1] == "-" || !cleaned_args[1].starts_with('-'))
                && cleaned_args[1] != "convert"
                && cleaned_args[1] != "roundtrip"
                && cleaned_args[1] != "help"
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        tracing::warn!("ignoring unknown parameter --extra-{key}");
    }
    let registry = config.registry();

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let from = resolve_from(&registry, input, sub_matches.get_one::<String>("from"));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output);
        }
        Some(("roundtrip", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = resolve_from(&registry, input, sub_matches.get_one::<String>("from"));
            handle_roundtrip_command(&registry, input, &from);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Explicit --from, or the format detected from the input's extension
fn resolve_from(registry: &FormatRegistry, input: &str, explicit: Option<&String>) -> String {
    if let Some(from) = explicit {
        return from.to_string();
    }
    if input == "-" {
        eprintln!("Error: reading from stdin requires --from");
        std::process::exit(1);
    }
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_input(input: &str) -> String {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        });
        return source;
    }
    fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
) {
    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);
    tracing::debug!(input, from, to, "converting");

    let mut result = registry.convert(&source, from, to).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });
    if !result.ends_with('\n') {
        result.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

fn handle_roundtrip_command(registry: &FormatRegistry, input: &str, from: &str) {
    let source = read_input(input);
    let stage = |source: &str, from: &str, to: &str| {
        registry.convert(source, from, to).unwrap_or_else(|e| {
            eprintln!("Conversion error ({from} → {to}): {e}");
            std::process::exit(1);
        })
    };

    let markdown = stage(&source, from, "markdown");
    let html = stage(&markdown, "markdown", "html");
    let editor = stage(&html, "html", "editor");

    println!("--- markdown ---\n{markdown}");
    println!("--- html ---\n{}", html.trim_end());
    println!("--- editor ---\n{editor}");
}

fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let description = registry
            .get(&format_name)
            .map(|format| format.description().to_string())
            .unwrap_or_default();
        println!("  {format_name:<10}{description}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> NovelMdConfig {
    let loader = Loader::new().with_optional_file("novel-md.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut NovelMdConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["bullet-marker", "bullet"]) {
        config.markdown.bullet_marker = parse_bullet_arg(&raw);
    }
    if let Some(raw) = take_override(extra_params, &["strong-delimiter"]) {
        config.markdown.strong_delimiter = raw;
    }
    if let Some(raw) = take_override(extra_params, &["em-delimiter"]) {
        config.markdown.em_delimiter = raw;
    }
    if let Some(raw) = take_override(extra_params, &["strike-delimiter"]) {
        config.markdown.strike_delimiter = raw;
    }
    if let Some(raw) = take_override(extra_params, &["code-fence"]) {
        config.markdown.code_fence = raw;
    }

    if let Some(raw) = extra_params.remove("strikethrough") {
        config.html.strikethrough = parse_bool_arg("strikethrough", &raw);
    }
    if let Some(raw) = extra_params.remove("table") {
        config.html.table = parse_bool_arg("table", &raw);
    }
    if let Some(raw) = extra_params.remove("autolink") {
        config.html.autolink = parse_bool_arg("autolink", &raw);
    }

    if let Some(raw) = extra_params.remove("pretty") {
        config.editor.pretty = parse_bool_arg("pretty", &raw);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn parse_bullet_arg(raw: &str) -> char {
    match raw {
        "-" => '-',
        "*" => '*',
        "+" => '+',
        other => {
            eprintln!("Invalid bullet marker '{other}' for --extra-bullet-marker (use -, * or +)");
            std::process::exit(1);
        }
    }
}
