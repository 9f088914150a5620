//! REBOL-family scanner CLI
//!
//! Inspects what the scanner makes of a source file.

mod commands;

use std::sync::Once;

use reb_lexer::ScanOptions;

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=reb_lexer=trace rebc load script.r`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    // Flags may appear anywhere after the command; the first other
    // argument is the file.
    let mut options = ScanOptions::default();
    let mut file_path = None;
    for arg in args.iter().skip(2) {
        match arg.as_str() {
            "--next" => options = options.with_next_only(true),
            "--only" => options = options.with_single_value_only(true),
            "--relax" => options = options.with_relax_errors(true),
            _ if !arg.starts_with('-') && file_path.is_none() => file_path = Some(arg.as_str()),
            _ => {
                eprintln!("error: unknown option '{arg}'");
                std::process::exit(1);
            }
        }
    }

    let needs_file = |usage: &str| require_file(file_path, usage);

    match command.as_str() {
        "load" => {
            let path = needs_file("load <file> [--next] [--only] [--relax]");
            commands::load_file(path, options);
        }
        "tokens" => commands::token_file(needs_file("tokens <file>")),
        "header" => commands::header_file(needs_file("header <file>")),
        "word" => commands::word_file(needs_file("word <file>")),
        "issue" => commands::issue_file(needs_file("issue <file>")),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-v" => {
            println!("rebc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// The file argument, or exit with usage text.
fn require_file<'a>(file_path: Option<&'a str>, usage: &str) -> &'a str {
    if let Some(path) = file_path {
        return path;
    }
    eprintln!("Usage: rebc {usage}");
    std::process::exit(1);
}

fn print_usage() {
    println!("REBOL-family scanner");
    println!();
    println!("Usage: rebc <command> <file> [options]");
    println!();
    println!("Commands:");
    println!("  load <file>      Scan and print each value");
    println!("  tokens <file>    Print the raw token stream");
    println!("  header <file>    Locate the REBOL [...] header");
    println!("  word <file>      Check that the file holds exactly one word");
    println!("  issue <file>     Check that the file holds valid issue text");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Load options:");
    println!("  --next           Stop after the first value");
    println!("  --only           Stop after the first value, rejecting blocks");
    println!("  --relax          Record malformed input and keep scanning");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=reb_lexer=debug) for scanner logs.");
}
