//! Command implementations.

use std::fmt::Write as _;

use reb_ir::{Block, BlockKind, SymbolTable, Value, WordKind};
use reb_lexer::{scan_header, scan_issue, scan_word, transcode, ScanOptions};
use reb_lexer_core::{SourceBuffer, Tokenizer};

/// Read a file from disk, exiting with a user-friendly error message on failure.
fn read_file(path: &str) -> Vec<u8> {
    match std::fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Scan a file and print one value per line.
pub fn load_file(path: &str, options: ScanOptions) {
    let content = read_file(path);
    let symbols = SymbolTable::new();

    let out = match transcode(&content, &symbols, options) {
        Ok(out) => out,
        Err(failure) => {
            eprintln!("error: {failure}");
            if failure.error_count > 1 {
                eprintln!("({} errors)", failure.error_count);
            }
            std::process::exit(1);
        }
    };

    println!(
        "Values for '{path}' ({} values, {} bytes consumed):",
        out.values.len(),
        out.consumed
    );
    for item in &out.values {
        let mark = if item.new_line { '\u{21b5}' } else { ' ' };
        println!("{mark} {} @ {}", render(&item.value, &symbols), item.span);
    }

    if !out.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &out.errors {
            println!("  {error}");
        }
    }
}

/// Print the raw token stream.
pub fn token_file(path: &str) {
    let content = read_file(path);
    let buf = SourceBuffer::new(&content);
    let tokens: Vec<_> = Tokenizer::new(&buf).collect();

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for tok in &tokens {
        let text = String::from_utf8_lossy(buf.cursor().slice(tok.start, tok.end));
        let flag = if tok.malformed { " (malformed)" } else { "" };
        println!("  {} @ {}..{}{flag} {text:?}", tok.kind, tok.start, tok.end);
    }
}

/// Print where the header block starts.
pub fn header_file(path: &str) {
    let content = read_file(path);
    match scan_header(&content) {
        Some(found) => println!(
            "{:?} header at byte {} (block at {}, line {})",
            found.kind, found.offset, found.block, found.line
        ),
        None => {
            eprintln!("no header in '{path}'");
            std::process::exit(1);
        }
    }
}

pub fn word_file(path: &str) {
    let content = read_file(path);
    let symbols = SymbolTable::new();
    match scan_word(content.trim_ascii(), &symbols) {
        Some(sym) => println!("word: {}", symbols.lookup(sym)),
        None => {
            eprintln!("not a word");
            std::process::exit(1);
        }
    }
}

pub fn issue_file(path: &str) {
    let content = read_file(path);
    let symbols = SymbolTable::new();
    match scan_issue(content.trim_ascii(), &symbols) {
        Some(sym) => println!("issue: #{}", symbols.lookup(sym)),
        None => {
            eprintln!("not an issue");
            std::process::exit(1);
        }
    }
}

/// Source-like text for a value, for display only.
fn render(value: &Value, symbols: &SymbolTable) -> String {
    let mut out = String::new();
    write_value(&mut out, value, symbols);
    out
}

fn write_value(out: &mut String, value: &Value, symbols: &SymbolTable) {
    // Writing to a String cannot fail.
    let _ = match value {
        Value::None => write!(out, "#[none]"),
        Value::Unset => write!(out, "#[unset]"),
        Value::Logic(b) => write!(out, "#[{b}]"),
        Value::Integer(n) => write!(out, "{n}"),
        Value::Decimal(d) => write!(out, "{d:?}"),
        Value::Percent(p) => write!(out, "{}%", p * 100.0),
        Value::Money(m) => write!(out, "${m:.2}"),
        Value::Char(c) => write!(out, "#{:?}", c.to_string()),
        Value::Pair { x, y } => write!(out, "{x}x{y}"),
        Value::Tuple(parts) => {
            let parts: Vec<String> = parts.iter().map(u8::to_string).collect();
            write!(out, "{}", parts.join("."))
        }
        Value::Time(t) => write!(out, "{t}"),
        Value::Date(d) => write!(out, "{d}"),
        Value::String(s) => write!(out, "{s:?}"),
        Value::Binary(bytes) => {
            let hex = reb_lexer::encode_base(bytes, reb_lexer::Base::Sixteen, Default::default());
            write!(out, "#{{{hex}}}")
        }
        Value::File(s) => write!(out, "%{s}"),
        Value::Email(s) | Value::Url(s) => write!(out, "{s}"),
        Value::Tag(s) => write!(out, "<{s}>"),
        Value::Issue(sym) => write!(out, "#{}", symbols.lookup(*sym)),
        Value::Word(kind, sym) => {
            let name = symbols.lookup(*sym);
            match kind {
                WordKind::Word => write!(out, "{name}"),
                WordKind::SetWord => write!(out, "{name}:"),
                WordKind::GetWord => write!(out, ":{name}"),
                WordKind::LitWord => write!(out, "'{name}"),
                WordKind::Refinement => write!(out, "/{name}"),
            }
        }
        Value::Block(kind, block) => {
            write_block(out, *kind, block, symbols);
            Ok(())
        }
        Value::Datatype(sym) => write!(out, "#[{}]", symbols.lookup(*sym)),
        Value::Object(fields) => {
            out.push_str("#[object! [");
            for (i, (name, field)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(symbols.lookup(*name));
                out.push_str(": ");
                write_value(out, &field.value, symbols);
            }
            write!(out, "]]")
        }
        Value::Error(err) => write!(out, "** {err}"),
    };
}

fn write_block(out: &mut String, kind: BlockKind, block: &Block, symbols: &SymbolTable) {
    let (open, sep, close) = match kind {
        BlockKind::Block => ("[", " ", "]"),
        BlockKind::Paren => ("(", " ", ")"),
        BlockKind::Path => ("", "/", ""),
        BlockKind::SetPath => ("", "/", ":"),
        BlockKind::GetPath => (":", "/", ""),
        BlockKind::LitPath => ("'", "/", ""),
    };
    out.push_str(open);
    for (i, item) in block.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        // Empty leading slot of `/a/b`.
        if i == 0 && sep == "/" && matches!(item.value, Value::None) {
            continue;
        }
        write_value(out, &item.value, symbols);
    }
    out.push_str(close);
}
