//! Character, file, email, URL, tag and issue literals.

use reb_lexer_core::escape::scan_char;
use reb_lexer_core::lex_class::{is_word_or_number, Lex};
use reb_lexer_core::quoted::scan_item;

/// Bytes not allowed literally in an unquoted file name.
const FILE_INVALID: &[u8] = b":;\"";

/// Bytes not allowed literally in a quoted file name.
const QUOTED_FILE_INVALID: &[u8] = b":;";

/// `#"c"` with one possibly-escaped character between the quotes.
pub fn parse_char(text: &[u8]) -> Option<char> {
    let body = text.strip_prefix(b"#\"")?.strip_suffix(b"\"")?;
    if body.is_empty() {
        return None;
    }
    let (ch, width) = scan_char(body)?;
    (width == body.len()).then_some(ch)
}

/// `%name`, `%dir/name` or `%"quoted name"`.
pub fn parse_file(text: &[u8]) -> Option<String> {
    let body = text.strip_prefix(b"%")?;
    let (body, term, invalid) = match body.strip_prefix(b"\"") {
        Some(quoted) => (quoted, Some(b'"'), QUOTED_FILE_INVALID),
        None => (body, None, FILE_INVALID),
    };
    let mut out = String::new();
    let used = scan_item(body, term, invalid, &mut out)?;
    (used == body.len()).then_some(out)
}

/// Decode `%xx` escapes, requiring both digits when `strict`. Without
/// `strict` a `%` not followed by two hex digits stands for itself.
fn percent_decode(text: &[u8], strict: bool) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    let mut i = 0;
    while let Some(&b) = text.get(i) {
        if b == b'%' {
            let hex = |k: usize| text.get(k).and_then(|&d| Lex::of(d).hex_digit());
            match (hex(i + 1), hex(i + 2)) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
                _ if strict => return None,
                _ => {}
            }
        }
        out.push(b);
        i += 1;
    }
    Some(out)
}

/// `user@host`, with exactly one `@`.
pub fn parse_email(text: &[u8]) -> Option<String> {
    let decoded = percent_decode(text, true)?;
    if text.iter().filter(|&&b| b == b'@').count() != 1 {
        return None;
    }
    String::from_utf8(decoded).ok()
}

/// `scheme:rest`, decoding `%xx` where both digits are hex.
pub fn parse_url(text: &[u8]) -> Option<String> {
    String::from_utf8(percent_decode(text, false)?).ok()
}

/// Raw text between `<` and `>`.
pub fn parse_tag(text: &[u8]) -> Option<String> {
    let body = text.strip_prefix(b"<")?.strip_suffix(b">")?;
    std::str::from_utf8(body).ok().map(str::to_owned)
}

/// True when `text` may name an issue: word and number bytes plus
/// `' , . + - ~`.
pub fn is_issue_text(text: &[u8]) -> bool {
    !text.is_empty()
        && text
            .iter()
            .all(|&b| is_word_or_number(b) || matches!(b, b'\'' | b',' | b'.' | b'+' | b'-' | b'~'))
}

#[cfg(test)]
mod tests;
