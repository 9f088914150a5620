//! Scan error records.

use reb_lexer_core::TokenKind;

use crate::Span;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScanErrorKind {
    /// A token's text violates its kind's grammar.
    #[error("invalid {token}")]
    Invalid { token: TokenKind },
    /// End of input or a different closer reached with a block still open.
    #[error("missing {close}")]
    Missing { close: char },
    /// A closing bracket with nothing open.
    #[error("extra {close}")]
    Extra { close: char },
    /// A `#[...]` body that does not construct a value.
    #[error("invalid construct")]
    MalformedConstruct,
    /// Nesting exceeded the configured depth or the available stack.
    #[error("nesting too deep")]
    TooDeep,
    /// A nested block or paren in single-value mode.
    #[error("{token} not allowed")]
    NotAllowed { token: TokenKind },
}

/// One scan error with the context needed to report it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} -- {bytes} (line {line}) near: {near}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    /// Kind of the offending token.
    pub token: TokenKind,
    /// Offending source text (lossy UTF-8).
    pub bytes: String,
    pub span: Span,
    /// 1-based line number.
    pub line: u32,
    /// Text of the line where the error was detected.
    pub near: String,
}

impl ScanError {
    /// Resource exhaustion cannot be relaxed.
    pub fn is_fatal(&self) -> bool {
        self.kind == ScanErrorKind::TooDeep
    }
}

/// A scan that aborted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ScanFailure {
    /// The error that stopped the scan.
    pub error: ScanError,
    /// Errors recorded in the session, including `error`.
    pub error_count: u32,
}
