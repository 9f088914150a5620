use super::*;

#[test]
fn test_intern_and_lookup() {
    let table = SymbolTable::new();

    let hello = table.intern("hello");
    let world = table.intern("world");
    let hello2 = table.intern("hello");

    assert_eq!(hello, hello2);
    assert_ne!(hello, world);

    assert_eq!(table.lookup(hello), "hello");
    assert_eq!(table.lookup(world), "world");
}

#[test]
fn test_empty_string() {
    let table = SymbolTable::new();
    assert_eq!(table.intern(""), Symbol::EMPTY);
    assert_eq!(table.lookup(Symbol::EMPTY), "");
    assert!(table.is_empty());
}

#[test]
fn test_case_preserving() {
    let table = SymbolTable::new();
    let lower = table.intern("print");
    let upper = table.intern("PRINT");
    assert_ne!(lower, upper);
    assert_eq!(table.lookup(upper), "PRINT");
}

#[test]
fn test_get_without_interning() {
    let table = SymbolTable::new();
    assert_eq!(table.get("missing"), None);
    let sym = table.intern("present");
    assert_eq!(table.get("present"), Some(sym));
}

#[test]
fn test_len_counts_new_symbols_only() {
    let table = SymbolTable::new();
    table.intern("a");
    table.intern("b");
    table.intern("a");
    assert_eq!(table.len(), 3);
}

#[test]
fn test_concurrent_interning() {
    let table = SymbolTable::new();
    let symbols: Vec<Symbol> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| table.intern("shared-word")))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(Symbol::EMPTY))
            .collect()
    });
    assert!(symbols.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(table.lookup(symbols[0]), "shared-word");
}
