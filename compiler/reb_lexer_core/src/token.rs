//! Token kinds produced by the tokenizer.

use std::fmt;

/// Classification of one scanned token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    /// Line break, possibly after a `;` comment.
    LineBreak,
    BlockStart,
    BlockEnd,
    ParenStart,
    ParenEnd,
    Word,
    SetWord,
    GetWord,
    LitWord,
    Refinement,
    Issue,
    String,
    Binary,
    Char,
    Integer,
    Decimal,
    Percent,
    Money,
    Time,
    Date,
    Pair,
    Tuple,
    File,
    Email,
    Url,
    Tag,
    Path,
    /// `#[` opening a construction literal.
    Construct,
}

impl TokenKind {
    /// Lower-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "end-of-script",
            TokenKind::LineBreak => "line",
            TokenKind::BlockStart => "block-begin",
            TokenKind::BlockEnd => "block-end",
            TokenKind::ParenStart => "paren-begin",
            TokenKind::ParenEnd => "paren-end",
            TokenKind::Word => "word",
            TokenKind::SetWord => "word-set",
            TokenKind::GetWord => "word-get",
            TokenKind::LitWord => "word-lit",
            TokenKind::Refinement => "refinement",
            TokenKind::Issue => "issue",
            TokenKind::String => "string",
            TokenKind::Binary => "binary",
            TokenKind::Char => "char",
            TokenKind::Integer => "integer",
            TokenKind::Decimal => "decimal",
            TokenKind::Percent => "percent",
            TokenKind::Money => "money",
            TokenKind::Time => "time",
            TokenKind::Date => "date",
            TokenKind::Pair => "pair",
            TokenKind::Tuple => "tuple",
            TokenKind::File => "file",
            TokenKind::Email => "email",
            TokenKind::Url => "url",
            TokenKind::Tag => "tag",
            TokenKind::Path => "path",
            TokenKind::Construct => "construct",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified token with its byte range.
///
/// `malformed` marks a token whose text violates its kind's grammar; the
/// kind still records what the scanner was trying to read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub malformed: bool,
    pub start: u32,
    pub end: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Token {
            kind,
            malformed: false,
            start,
            end,
        }
    }

    #[inline]
    pub fn malformed(kind: TokenKind, start: u32, end: u32) -> Self {
        Token {
            kind,
            malformed: true,
            start,
            end,
        }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
