//! Low-level scanner for REBOL-family source text.
//!
//! This crate turns a byte buffer into a stream of classified [`Token`]s.
//! It performs no value conversion: numbers stay unparsed, words are not
//! interned, and only quoted strings are decoded (into a scratch buffer the
//! caller copies out). The `reb_lexer` crate builds typed values on top.
//!
//! # Layers
//!
//! ```text
//! SourceBuffer -> Cursor -> prescan -> Tokenizer::scan_token -> Token
//!                             |              |
//!                         lex_class     escape / quoted
//! ```
//!
//! Every byte is first looked up in the 256-entry [`lex_class`] table; the
//! [`prescan`] pass consumes a maximal run and records which special
//! characters it saw, and the [`Tokenizer`] uses the first byte plus those
//! flags to decide the token kind.

mod cursor;
pub mod escape;
pub mod lex_class;
mod prescan;
pub mod quoted;
mod source_buffer;
mod token;
mod tokenizer;
pub mod utf8;

pub use cursor::Cursor;
pub use lex_class::{Delimiter, Lex, LexClass, Special};
pub use prescan::{prescan, LexFlags};
pub use source_buffer::SourceBuffer;
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
