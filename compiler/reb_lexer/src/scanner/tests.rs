use super::*;
use crate::construct::StandardConstructor;
use pretty_assertions::assert_eq;
use reb_lexer_core::SourceBuffer;

struct Run {
    result: Result<Block, ScanError>,
    position: u32,
    error_count: u32,
    errors: Vec<ScanError>,
}

fn run(source: &str, options: ScanOptions, symbols: &SymbolTable) -> Run {
    let buf = SourceBuffer::new(source.as_bytes());
    let mut scanner = Scanner::new(Tokenizer::new(&buf), symbols, &StandardConstructor, options);
    let result = scanner.scan_top();
    Run {
        result,
        position: scanner.position(),
        error_count: scanner.error_count(),
        errors: scanner.take_errors(),
    }
}

fn scan(source: &str, symbols: &SymbolTable) -> Block {
    run(source, ScanOptions::default(), symbols)
        .result
        .unwrap_or_else(|err| panic!("scan of {source:?} failed: {err}"))
}

fn scan_err(source: &str) -> ScanError {
    let symbols = SymbolTable::new();
    match run(source, ScanOptions::default(), &symbols).result {
        Ok(block) => panic!("scan of {source:?} succeeded: {block:?}"),
        Err(err) => err,
    }
}

fn word(symbols: &SymbolTable, kind: WordKind, name: &str) -> Value {
    Value::Word(kind, symbols.intern(name))
}

fn nested(value: &Value) -> (BlockKind, &Block) {
    value
        .as_block()
        .unwrap_or_else(|| panic!("expected a block-family value, got {value:?}"))
}

#[test]
fn spans_cover_each_value() {
    let symbols = SymbolTable::new();
    let block = scan("abc  12 \"x\"", &symbols);
    let spans: Vec<Span> = block.iter().map(|item| item.span).collect();
    assert_eq!(spans, vec![Span::new(0, 3), Span::new(5, 7), Span::new(8, 11)]);
}

#[test]
fn new_line_flags() {
    let symbols = SymbolTable::new();
    let block = scan("a\nb c\r\n[d\n]", &symbols);
    let flags: Vec<bool> = block.iter().map(|item| item.new_line).collect();
    assert_eq!(flags, vec![false, true, false, true]);

    let (_, inner) = nested(&block.items[3].value);
    assert!(inner.tail_new_line);
    assert!(!block.tail_new_line);
}

#[test]
fn trailing_comment_is_not_a_line_break() {
    let symbols = SymbolTable::new();
    let block = scan("a ; note", &symbols);
    assert_eq!(block.len(), 1);
    assert!(!block.tail_new_line);

    let block = scan("a ; note\n", &symbols);
    assert!(block.tail_new_line);
}

#[test]
fn nested_blocks_and_parens() {
    let symbols = SymbolTable::new();
    let block = scan("[a (b [c])]", &symbols);
    let (kind, outer) = nested(&block.items[0].value);
    assert_eq!(kind, BlockKind::Block);
    let (kind, paren) = nested(&outer.items[1].value);
    assert_eq!(kind, BlockKind::Paren);
    let (kind, inner) = nested(&paren.items[1].value);
    assert_eq!(kind, BlockKind::Block);
    assert_eq!(inner.items[0].value, word(&symbols, WordKind::Word, "c"));
    assert_eq!(block.items[0].span, Span::new(0, 11));
}

#[test]
fn path_segments() {
    let symbols = SymbolTable::new();
    let block = scan("a/b/1/(c)", &symbols);
    let (kind, path) = nested(&block.items[0].value);
    assert_eq!(kind, BlockKind::Path);
    assert_eq!(path.len(), 4);
    assert_eq!(path.items[0].value, word(&symbols, WordKind::Word, "a"));
    assert_eq!(path.items[2].value, Value::Integer(1));
    assert_eq!(nested(&path.items[3].value).0, BlockKind::Paren);
    assert_eq!(block.items[0].span, Span::new(0, 9));
}

#[test]
fn set_get_and_lit_paths() {
    let symbols = SymbolTable::new();
    let block = scan("a/b: :a/b 'a/b", &symbols);
    let kinds: Vec<BlockKind> = block.values().map(|v| nested(v).0).collect();
    assert_eq!(kinds, vec![BlockKind::SetPath, BlockKind::GetPath, BlockKind::LitPath]);
    for value in block.values() {
        let (_, path) = nested(value);
        assert_eq!(path.items[0].value, word(&symbols, WordKind::Word, "a"));
        assert_eq!(path.items[1].value, word(&symbols, WordKind::Word, "b"));
    }
}

#[test]
fn set_path_with_integer_tail() {
    let symbols = SymbolTable::new();
    let block = scan("a/1: 2", &symbols);
    let (kind, path) = nested(&block.items[0].value);
    assert_eq!(kind, BlockKind::SetPath);
    assert_eq!(path.items[1].value, Value::Integer(1));
    assert_eq!(block.items[1].value, Value::Integer(2));
}

#[test]
fn get_word_segment_inside_path() {
    let symbols = SymbolTable::new();
    let block = scan("a/:b", &symbols);
    let (_, path) = nested(&block.items[0].value);
    assert_eq!(path.items[1].value, word(&symbols, WordKind::GetWord, "b"));
}

#[test]
fn refinement_path_has_empty_first_slot() {
    let symbols = SymbolTable::new();
    let block = scan("/a/b /c/d: /e", &symbols);
    assert_eq!(block.len(), 3);

    let (kind, path) = nested(&block.items[0].value);
    assert_eq!(kind, BlockKind::Path);
    let segments: Vec<Value> = path.values().cloned().collect();
    assert_eq!(
        segments,
        vec![
            Value::None,
            word(&symbols, WordKind::Word, "a"),
            word(&symbols, WordKind::Word, "b"),
        ]
    );
    assert_eq!(path.items[0].span, Span::new(0, 1));
    assert_eq!(block.items[0].span, Span::new(0, 4));

    let (kind, path) = nested(&block.items[1].value);
    assert_eq!(kind, BlockKind::SetPath);
    assert_eq!(path.items[0].value, Value::None);
    assert_eq!(path.items[2].value, word(&symbols, WordKind::Word, "d"));

    assert_eq!(block.items[2].value, word(&symbols, WordKind::Refinement, "e"));
}

#[test]
fn path_ending_in_slash_is_invalid() {
    let err = scan_err("a/ b");
    assert_eq!(err.kind, ScanErrorKind::Invalid { token: TokenKind::Path });
}

#[test]
fn get_path_with_trailing_colon_is_invalid() {
    let err = scan_err(":a/b:");
    assert_eq!(err.kind, ScanErrorKind::Invalid { token: TokenKind::Path });
}

#[test]
fn slash_dates() {
    let symbols = SymbolTable::new();
    let block = scan("1/2/2021 1-Jan-2021/10:00", &symbols);
    assert!(matches!(block.items[0].value, Value::Date(_)));
    let Value::Date(date) = &block.items[1].value else {
        panic!("expected a date, got {:?}", block.items[1].value);
    };
    assert!(date.time.is_some());
    assert_eq!(block.items[1].span, Span::new(9, 25));
}

#[test]
fn long_date_suffix_is_left_for_the_next_token() {
    let symbols = SymbolTable::new();
    let tail = "abcdefghij".repeat(5);
    let block = scan(&format!("1-Jan-2021/{tail}"), &symbols);
    assert_eq!(block.len(), 2);
    assert!(matches!(block.items[0].value, Value::Date(_)));
    assert_eq!(block.items[0].span, Span::new(0, 10));
    assert_eq!(block.items[1].value, word(&symbols, WordKind::Refinement, &tail));
    assert_eq!(block.items[1].span, Span::new(10, 61));
}

#[test]
fn decimal_followed_by_slash_is_invalid() {
    let err = scan_err("1.5/2");
    assert_eq!(err.kind, ScanErrorKind::Invalid { token: TokenKind::Decimal });
    assert_eq!(err.bytes, "1.5/");
}

#[test]
fn issue_forms() {
    let symbols = SymbolTable::new();
    let block = scan("#abc #", &symbols);
    assert_eq!(block.items[0].value, Value::Issue(symbols.intern("abc")));
    assert_eq!(block.items[1].value, Value::None);
}

#[test]
fn pound_paren_is_invalid() {
    let err = scan_err("#(a)");
    assert_eq!(err.kind, ScanErrorKind::Invalid { token: TokenKind::Construct });
}

#[test]
fn construct_values() {
    let symbols = SymbolTable::new();
    let block = scan("#[none] #[true] #[integer!]", &symbols);
    assert_eq!(block.items[0].value, Value::None);
    assert_eq!(block.items[1].value, Value::Logic(true));
    assert_eq!(block.items[2].value, Value::Datatype(symbols.intern("integer!")));
}

#[test]
fn unknown_construct_is_malformed() {
    let err = scan_err("#[nonsense 1 2]");
    assert_eq!(err.kind, ScanErrorKind::MalformedConstruct);
    assert_eq!(err.span, Span::new(0, 15));
}

#[test]
fn missing_closer_reports_open_line() {
    let err = scan_err("x [a\nb\n");
    assert_eq!(err.kind, ScanErrorKind::Missing { close: ']' });
    assert_eq!(err.line, 1);
    assert_eq!(err.near, "x [a");
}

#[test]
fn mismatched_closer() {
    let err = scan_err("[a)");
    assert_eq!(err.kind, ScanErrorKind::Missing { close: ']' });
    assert_eq!(err.token, TokenKind::ParenEnd);
}

#[test]
fn extra_closer() {
    let err = scan_err("a ]");
    assert_eq!(err.kind, ScanErrorKind::Extra { close: ']' });
    assert_eq!(err.span, Span::new(2, 3));
}

#[test]
fn relaxed_mismatch_recovers_in_outer_block() {
    let symbols = SymbolTable::new();
    let out = run("[(a] b", ScanOptions::default().with_relax_errors(true), &symbols);
    let block = out.result.unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(out.error_count, 1);
    assert_eq!(out.errors[0].kind, ScanErrorKind::Missing { close: ')' });

    let (_, outer) = nested(&block.items[0].value);
    let (_, paren) = nested(&outer.items[0].value);
    assert!(paren.items[1].value.is_error());
    assert_eq!(block.items[1].value, word(&symbols, WordKind::Word, "b"));
}

#[test]
fn relaxed_errors_keep_scanning() {
    let symbols = SymbolTable::new();
    let out = run("a 1.5/ b ]", ScanOptions::default().with_relax_errors(true), &symbols);
    let block = out.result.unwrap_or_else(|err| panic!("{err}"));
    let types: Vec<&str> = block.values().map(Value::type_name).collect();
    assert_eq!(types, vec!["word", "error", "word", "error"]);
    assert_eq!(out.error_count, 2);
    assert_eq!(out.errors.len(), 2);
}

#[test]
fn depth_limit_is_fatal_even_when_relaxed() {
    let symbols = SymbolTable::new();
    let options = ScanOptions::default()
        .with_relax_errors(true)
        .with_max_depth(3);
    assert!(run("[[[a]]]", options, &symbols).result.is_ok());

    let out = run("[[[[a]]]]", options, &symbols);
    let err = out.result.err().unwrap_or_else(|| panic!("expected depth error"));
    assert_eq!(err.kind, ScanErrorKind::TooDeep);
    assert!(out.errors.is_empty());
}

#[test]
fn path_counts_toward_depth() {
    let symbols = SymbolTable::new();
    let options = ScanOptions::default().with_max_depth(1);
    assert!(run("[a]", options, &symbols).result.is_ok());
    let err = run("[a/b]", options, &symbols)
        .result
        .err()
        .unwrap_or_else(|| panic!("expected depth error"));
    assert_eq!(err.kind, ScanErrorKind::TooDeep);
}

#[test]
fn next_only_stops_after_one_value() {
    let symbols = SymbolTable::new();
    let out = run("[a b] c", ScanOptions::default().with_next_only(true), &symbols);
    let block = out.result.unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(block.len(), 1);
    assert_eq!(out.position, 5);
}

#[test]
fn next_only_skips_leading_line_breaks() {
    let symbols = SymbolTable::new();
    let out = run("\n\n  a b", ScanOptions::default().with_next_only(true), &symbols);
    let block = out.result.unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(block.len(), 1);
    assert!(block.items[0].new_line);
    assert_eq!(out.position, 5);
}

#[test]
fn single_value_rejects_blocks() {
    let symbols = SymbolTable::new();
    let options = ScanOptions::default().with_single_value_only(true);
    let err = run("(a)", options, &symbols)
        .result
        .err()
        .unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.kind, ScanErrorKind::NotAllowed { token: TokenKind::ParenStart });

    let block = run("12 13", options, &symbols)
        .result
        .unwrap_or_else(|err| panic!("{err}"));
    assert_eq!(block.len(), 1);
}

#[test]
fn error_counter_includes_fatal_error() {
    let symbols = SymbolTable::new();
    let out = run("a \"open", ScanOptions::default(), &symbols);
    assert!(out.result.is_err());
    assert_eq!(out.error_count, 1);
}

#[test]
fn set_word_and_refinement_text() {
    let symbols = SymbolTable::new();
    let block = scan("foo: /ref 'lit :get", &symbols);
    let values: Vec<Value> = block.values().cloned().collect();
    assert_eq!(
        values,
        vec![
            word(&symbols, WordKind::SetWord, "foo"),
            word(&symbols, WordKind::Refinement, "ref"),
            word(&symbols, WordKind::LitWord, "lit"),
            word(&symbols, WordKind::GetWord, "get"),
        ]
    );
}
