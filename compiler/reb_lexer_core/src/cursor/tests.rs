use crate::SourceBuffer;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn byte_reads_past_sentinel_as_zero() {
    let buf = SourceBuffer::new(b"ab");
    let cursor = buf.cursor();
    assert_eq!(cursor.byte(0), b'a');
    assert_eq!(cursor.byte(1), b'b');
    assert_eq!(cursor.byte(2), 0);
    assert_eq!(cursor.byte(10_000), 0);
}

#[test]
fn accept_moves_begin_to_end() {
    let buf = SourceBuffer::new(b"word rest");
    let mut cursor = buf.cursor();
    cursor.set_end(4);
    assert_eq!(cursor.token_bytes(), b"word");
    cursor.accept();
    assert_eq!(cursor.begin(), 4);
    assert_eq!(cursor.token_bytes(), b"");
}

#[test]
fn line_bookkeeping() {
    let buf = SourceBuffer::new(b"a\nb");
    let mut cursor = buf.cursor();
    cursor.add_lines(2);
    assert_eq!(cursor.line(), 3);
    cursor.set_line(1);
    cursor.set_head_line(2);
    assert_eq!(cursor.line(), 1);
    assert_eq!(cursor.head_line(), 2);
}

#[test]
fn line_end_finds_each_break_kind() {
    let buf = SourceBuffer::new(b"ab\ncd\ref");
    let cursor = buf.cursor();
    assert_eq!(cursor.line_end_from(0), 2);
    assert_eq!(cursor.line_end_from(3), 5);
    assert_eq!(cursor.line_end_from(6), 8);
}

#[test]
fn line_end_stops_at_interior_null() {
    let buf = SourceBuffer::new(b"ab\0cd");
    assert_eq!(buf.cursor().line_end_from(0), 2);
}

#[test]
fn line_text_skips_leading_space() {
    let buf = SourceBuffer::new(b"x\n   [a b\nnext");
    let cursor = buf.cursor();
    assert_eq!(cursor.line_text(2), b"[a b");
}

#[test]
fn slice_is_clamped() {
    let buf = SourceBuffer::new(b"abc");
    let cursor = buf.cursor();
    assert_eq!(cursor.slice(1, 100), b"bc");
    assert_eq!(cursor.slice(5, 2), b"");
}

#[test]
fn eof_detection() {
    let buf = SourceBuffer::new(b"a");
    let mut cursor = buf.cursor();
    assert!(!cursor.is_eof());
    cursor.set_begin(1);
    assert!(cursor.is_eof());
}

proptest! {
    #[test]
    fn line_end_agrees_with_scalar_search(src in proptest::collection::vec(any::<u8>(), 0..200), start in 0u32..220) {
        let buf = SourceBuffer::new(&src);
        let cursor = buf.cursor();
        let len = buf.len();
        let expected = (start.min(len)..len)
            .find(|&i| matches!(src[i as usize], b'\n' | b'\r' | 0))
            .unwrap_or(len.max(start));
        prop_assert_eq!(cursor.line_end_from(start), expected);
    }
}
