//! Token-to-value scanner for REBOL-family source.
//!
//! Builds on `reb_lexer_core`'s tokenizer: every token is converted into a
//! typed [`Value`](reb_ir::Value), blocks and paths are nested, and
//! malformed input is reported as a [`ScanError`] with the line and text
//! where it happened.
//!
//! # Entry points
//!
//! - [`scan_source`]: a whole buffer as one block of values
//! - [`transcode`]: incremental scanning with [`ScanOptions`], reporting how
//!   many bytes were consumed
//! - [`scan_header`]: locate the `REBOL [...]` header
//! - [`scan_word`] and [`scan_issue`]: validate and intern a single name

pub mod binary;
pub mod construct;
mod header;
pub mod literal;
mod options;
mod scanner;

use reb_ir::{Block, ScanError, ScanFailure, Symbol, SymbolTable};
use reb_lexer_core::{SourceBuffer, TokenKind, Tokenizer};
use tracing::debug;

pub use binary::{decode_base, encode_base, Base, EncodeOptions};
pub use construct::{Construct, StandardConstructor};
pub use header::{HeaderKind, HeaderMatch};
pub use options::{ScanOptions, DEFAULT_MAX_DEPTH};

use scanner::Scanner;

/// Result of an incremental scan.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcoded {
    pub values: Block,
    /// Byte offset where scanning stopped. Equals the input length unless
    /// the scan stopped after one value.
    pub consumed: u32,
    /// Errors recorded in relaxed mode, in source order.
    pub errors: Vec<ScanError>,
}

/// Scan a whole source buffer into a block of values.
pub fn scan_source(source: &[u8], symbols: &SymbolTable) -> Result<Block, ScanFailure> {
    transcode(source, symbols, ScanOptions::default()).map(|out| out.values)
}

/// Scan with options, using [`StandardConstructor`] for `#[...]`.
pub fn transcode(
    source: &[u8],
    symbols: &SymbolTable,
    options: ScanOptions,
) -> Result<Transcoded, ScanFailure> {
    transcode_with(source, symbols, options, &StandardConstructor)
}

/// Scan with options and a caller-supplied construct builder.
pub fn transcode_with(
    source: &[u8],
    symbols: &SymbolTable,
    options: ScanOptions,
    constructor: &dyn Construct,
) -> Result<Transcoded, ScanFailure> {
    let buf = SourceBuffer::new(source);
    debug!(len = buf.len(), ?options, "scan start");

    let mut scanner = Scanner::new(Tokenizer::new(&buf), symbols, constructor, options);
    match scanner.scan_top() {
        Ok(values) => {
            let consumed = scanner.position();
            let errors = scanner.take_errors();
            debug!(
                values = values.len(),
                consumed,
                errors = errors.len(),
                "scan finish"
            );
            Ok(Transcoded {
                values,
                consumed,
                errors,
            })
        }
        Err(error) => {
            let error_count = scanner.error_count();
            debug!(line = error.line, error_count, "scan failed");
            Err(ScanFailure { error, error_count })
        }
    }
}

/// Locate the script header.
pub fn scan_header(source: &[u8]) -> Option<HeaderMatch> {
    let buf = SourceBuffer::new(source);
    let mut cursor = buf.cursor();
    cursor.set_begin(buf.bom_len());
    cursor.set_end(buf.bom_len());
    header::scan_head(&mut cursor)
}

/// Intern `source` if it is exactly one plain word.
pub fn scan_word(source: &[u8], symbols: &SymbolTable) -> Option<Symbol> {
    let buf = SourceBuffer::new(source);
    let mut tok = Tokenizer::new(&buf);
    let token = tok.scan_token();
    if token.malformed
        || token.kind != TokenKind::Word
        || token.start != buf.bom_len()
        || token.end != buf.len()
    {
        return None;
    }
    let text = std::str::from_utf8(tok.cursor().slice(token.start, token.end)).ok()?;
    Some(symbols.intern(text))
}

/// Intern `source` as the text of an issue (without the `#`).
pub fn scan_issue(source: &[u8], symbols: &SymbolTable) -> Option<Symbol> {
    if source.is_empty() || !literal::is_issue_text(source) {
        return None;
    }
    let text = std::str::from_utf8(source).ok()?;
    Some(symbols.intern(text))
}
