//! Scanned values.
//!
//! A [`ScannedValue`] is one value produced by the block scanner together
//! with its source span and whether a line break preceded it. Block-family
//! values own their children, so a scan result is a plain tree.

use smallvec::SmallVec;

use crate::datetime::{Date, Time};
use crate::{ScanError, Span, Symbol};

/// Maximum number of tuple components.
pub const MAX_TUPLE: usize = 10;

/// Minimum number of tuple components; shorter tuples are zero-padded.
pub const MIN_TUPLE: usize = 3;

/// Tuple components, each `0..=255`.
pub type Tuple = SmallVec<[u8; MAX_TUPLE]>;

/// Word flavors sharing one symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WordKind {
    Word,
    SetWord,
    GetWord,
    LitWord,
    Refinement,
}

/// Block flavors sharing one element representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Block,
    Paren,
    Path,
    SetPath,
    GetPath,
    LitPath,
}

impl BlockKind {
    pub fn is_path(self) -> bool {
        matches!(
            self,
            BlockKind::Path | BlockKind::SetPath | BlockKind::GetPath | BlockKind::LitPath
        )
    }
}

/// Ordered sequence of scanned values.
///
/// `tail_new_line` records a line break after the last element (before the
/// closing bracket).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub items: Vec<ScannedValue>,
    pub tail_new_line: bool,
}

impl Block {
    pub fn new(items: Vec<ScannedValue>) -> Self {
        Block {
            items,
            tail_new_line: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScannedValue> {
        self.items.iter()
    }

    /// The payload values, without spans or line flags.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.items.iter().map(|item| &item.value)
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a ScannedValue;
    type IntoIter = std::slice::Iter<'a, ScannedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A typed value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    None,
    Unset,
    Logic(bool),
    Integer(i64),
    Decimal(f64),
    /// Stored as a fraction: `10%` is `0.1`.
    Percent(f64),
    Money(f64),
    Char(char),
    Pair { x: f64, y: f64 },
    Tuple(Tuple),
    Time(Time),
    Date(Date),
    String(String),
    Binary(Vec<u8>),
    File(String),
    Email(String),
    Url(String),
    /// Raw text between `<` and `>`.
    Tag(String),
    Issue(Symbol),
    Word(WordKind, Symbol),
    Block(BlockKind, Block),
    /// Datatype literal such as `#[integer!]`.
    Datatype(Symbol),
    /// Object literal: ordered field names and values.
    Object(Vec<(Symbol, ScannedValue)>),
    /// Malformed input recorded in relaxed mode.
    Error(Box<ScanError>),
}

impl Value {
    /// Short lower-case type name, as used in datatype literals.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Unset => "unset",
            Value::Logic(_) => "logic",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Percent(_) => "percent",
            Value::Money(_) => "money",
            Value::Char(_) => "char",
            Value::Pair { .. } => "pair",
            Value::Tuple(_) => "tuple",
            Value::Time(_) => "time",
            Value::Date(_) => "date",
            Value::String(_) => "string",
            Value::Binary(_) => "binary",
            Value::File(_) => "file",
            Value::Email(_) => "email",
            Value::Url(_) => "url",
            Value::Tag(_) => "tag",
            Value::Issue(_) => "issue",
            Value::Word(kind, _) => match kind {
                WordKind::Word => "word",
                WordKind::SetWord => "set-word",
                WordKind::GetWord => "get-word",
                WordKind::LitWord => "lit-word",
                WordKind::Refinement => "refinement",
            },
            Value::Block(kind, _) => match kind {
                BlockKind::Block => "block",
                BlockKind::Paren => "paren",
                BlockKind::Path => "path",
                BlockKind::SetPath => "set-path",
                BlockKind::GetPath => "get-path",
                BlockKind::LitPath => "lit-path",
            },
            Value::Datatype(_) => "datatype",
            Value::Object(_) => "object",
            Value::Error(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Children of a block-family value.
    pub fn as_block(&self) -> Option<(BlockKind, &Block)> {
        match self {
            Value::Block(kind, block) => Some((*kind, block)),
            _ => None,
        }
    }

    /// Symbol and flavor of a word-family value.
    pub fn as_word(&self) -> Option<(WordKind, Symbol)> {
        match self {
            Value::Word(kind, sym) => Some((*kind, *sym)),
            _ => None,
        }
    }
}

/// A value with its source position.
#[derive(Clone, Debug, PartialEq)]
pub struct ScannedValue {
    pub value: Value,
    /// A line break preceded this value.
    pub new_line: bool,
    pub span: Span,
}

impl ScannedValue {
    pub fn new(value: Value, span: Span) -> Self {
        ScannedValue {
            value,
            new_line: false,
            span,
        }
    }
}
