//! Values built from `#[...]` literals.

use reb_ir::{BlockKind, ScannedValue, SymbolTable, Value, WordKind};

/// Datatype names accepted as `#[name!]`, without the `!`.
const DATATYPES: &[&str] = &[
    "none",
    "unset",
    "logic",
    "integer",
    "decimal",
    "percent",
    "money",
    "char",
    "pair",
    "tuple",
    "time",
    "date",
    "string",
    "binary",
    "file",
    "email",
    "url",
    "tag",
    "issue",
    "word",
    "set-word",
    "get-word",
    "lit-word",
    "refinement",
    "block",
    "paren",
    "path",
    "set-path",
    "get-path",
    "lit-path",
    "datatype",
    "object",
    "error",
];

/// Turns the scanned body of a `#[...]` literal into a value.
pub trait Construct {
    /// `None` when `spec` does not describe a value.
    fn construct(&self, spec: &[ScannedValue], symbols: &SymbolTable) -> Option<Value>;
}

/// Constructs `#[none]`, `#[true]`, `#[false]`, `#[unset]`, `#[type!]` and
/// `#[object! [field: value ...]]`.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardConstructor;

impl Construct for StandardConstructor {
    fn construct(&self, spec: &[ScannedValue], symbols: &SymbolTable) -> Option<Value> {
        let (head, rest) = spec.split_first()?;
        let (WordKind::Word, symbol) = head.value.as_word()? else {
            return None;
        };
        let name = symbols.lookup(symbol).to_ascii_lowercase();
        match (name.as_str(), rest) {
            ("none", []) => Some(Value::None),
            ("unset", []) => Some(Value::Unset),
            ("true", []) => Some(Value::Logic(true)),
            ("false", []) => Some(Value::Logic(false)),
            ("object!", [body]) => object(&body.value),
            (name, []) => name
                .strip_suffix('!')
                .is_some_and(|ty| DATATYPES.contains(&ty))
                .then_some(Value::Datatype(symbol)),
            _ => None,
        }
    }
}

/// Field list of an object body. Consecutive set-words share the value
/// that follows them.
fn object(body: &Value) -> Option<Value> {
    let (BlockKind::Block, block) = body.as_block()? else {
        return None;
    };
    let mut fields = Vec::new();
    let mut pending = Vec::new();
    for item in block {
        match item.value.as_word() {
            Some((WordKind::SetWord, name)) => pending.push(name),
            _ if pending.is_empty() => return None,
            _ => fields.extend(pending.drain(..).map(|name| (name, item.clone()))),
        }
    }
    pending.is_empty().then_some(Value::Object(fields))
}
