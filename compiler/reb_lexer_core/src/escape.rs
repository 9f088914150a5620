//! Caret escape decoding.
//!
//! Inside strings, characters, files, and issues a `^` introduces an
//! escape:
//!
//! | Form            | Result                                  |
//! |-----------------|-----------------------------------------|
//! | `^/`            | line feed                               |
//! | `^^`            | `^`                                     |
//! | `^-`            | tab                                     |
//! | `^!`            | `0x1E`                                  |
//! | `^@` .. `^_`    | control code (letters are case-folded)  |
//! | `^~`            | `0x7F`                                  |
//! | `^(hex)`        | code point, 1 to 4 hex digits           |
//! | `^(name)`       | `line tab page escape esc back del null` |
//!
//! Any other byte after the caret stands for itself.

use crate::lex_class::Lex;
use crate::utf8;

/// Named escapes accepted inside `^( )`, matched case-insensitively.
const ESCAPE_NAMES: &[(&[u8], char)] = &[
    (b"line", '\n'),
    (b"tab", '\t'),
    (b"page", '\u{0C}'),
    (b"escape", '\u{1B}'),
    (b"esc", '\u{1B}'),
    (b"back", '\u{08}'),
    (b"del", '\u{7F}'),
    (b"null", '\0'),
];

#[inline]
fn at(bytes: &[u8], i: usize) -> u8 {
    bytes.get(i).copied().unwrap_or(0)
}

/// Decode one possibly-escaped character at the start of `bytes`.
///
/// Returns the character and the number of bytes consumed, or `None` for a
/// malformed escape or invalid UTF-8. A caret followed by end of input
/// yields `'\0'` and consumes only the caret; callers that forbid that case
/// check for it before calling.
pub fn scan_char(bytes: &[u8]) -> Option<(char, usize)> {
    let first = at(bytes, 0);
    if first >= 0x80 {
        return utf8::decode_char(bytes);
    }
    if first != b'^' {
        return Some((char::from(first), 1));
    }

    let c = at(bytes, 1);
    let decoded = match c {
        0 => return Some(('\0', 1)),
        b'/' => '\n',
        b'^' => '^',
        b'-' => '\t',
        b'!' => '\u{1E}',
        b'(' => return scan_paren_escape(bytes),
        _ => {
            let upper = c.to_ascii_uppercase();
            if (b'@'..=b'_').contains(&upper) {
                char::from(upper - b'@')
            } else if c == b'~' {
                '\u{7F}'
            } else if c >= 0x80 {
                let (ch, width) = utf8::decode_char(&bytes[1..])?;
                return Some((ch, width + 1));
            } else {
                char::from(c)
            }
        }
    };
    Some((decoded, 2))
}

/// `^(...)`: hex code point or a named escape. `bytes` starts at the caret.
fn scan_paren_escape(bytes: &[u8]) -> Option<(char, usize)> {
    let body = bytes.get(2..).unwrap_or_default();

    let mut value: u32 = 0;
    let mut digits = 0;
    while let Some(d) = Lex::of(at(body, digits)).hex_digit() {
        if digits == 4 {
            return None;
        }
        value = (value << 4) | u32::from(d);
        digits += 1;
    }
    if digits > 0 && at(body, digits) == b')' {
        // Surrogates are not characters.
        return char::from_u32(value).map(|ch| (ch, 2 + digits + 1));
    }

    for &(name, ch) in ESCAPE_NAMES {
        let Some(candidate) = body.get(..name.len()) else {
            continue;
        };
        if candidate.eq_ignore_ascii_case(name) && at(body, name.len()) == b')' {
            return Some((ch, 2 + name.len() + 1));
        }
    }
    None
}
