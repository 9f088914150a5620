//! Delimited-text scanners: quoted and braced strings, file/URL items, and
//! tags.
//!
//! All functions take a slice that starts at the first byte to examine and
//! treat reading past its end as `0x00`, the end-of-input byte. Offsets in
//! the results are relative to the start of that slice.

use crate::escape::scan_char;
use crate::lex_class::{is_any_space, Lex};
use crate::utf8;

#[inline]
fn at(src: &[u8], i: usize) -> u8 {
    src.get(i).copied().unwrap_or(0)
}

/// Result of a successful [`scan_quote`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuoteScan {
    /// Offset one past the closing quote or brace.
    pub len: usize,
    /// Line breaks crossed inside a braced string.
    pub lines: u32,
    /// Offset just after the last line break crossed, or 0.
    pub head: usize,
}

/// Scan a `"..."` or `{...}` string starting at its opening delimiter,
/// decoding escapes into `out`.
///
/// Braced strings nest and may span lines; CR and CR LF are stored as a
/// single LF. Quoted strings may not contain a line break. Fails on end of
/// input, a malformed escape, or invalid UTF-8. `out` is cleared first.
pub fn scan_quote(src: &[u8], out: &mut String) -> Option<QuoteScan> {
    out.clear();
    let term = if at(src, 0) == b'{' { b'}' } else { b'"' };
    let braced = term == b'}';
    let mut nest = 0u32;
    let mut lines = 0u32;
    let mut head = 0;
    let mut i = 1;

    loop {
        let b = at(src, i);
        if b == term && nest == 0 {
            break;
        }
        let ch = match b {
            0 => return None,
            b'^' => {
                let (ch, width) = scan_char(src.get(i..).unwrap_or_default())?;
                i += width;
                out.push(ch);
                continue;
            }
            b'{' if braced => {
                nest += 1;
                '{'
            }
            b'}' if braced => {
                nest = nest.saturating_sub(1);
                '}'
            }
            b'\r' | b'\n' => {
                if !braced {
                    return None;
                }
                if b == b'\r' && at(src, i + 1) == b'\n' {
                    i += 1;
                }
                lines += 1;
                head = i + 1;
                '\n'
            }
            0x80.. => {
                let (ch, width) = utf8::decode_char(src.get(i..).unwrap_or_default())?;
                i += width;
                out.push(ch);
                continue;
            }
            _ => char::from(b),
        };
        out.push(ch);
        i += 1;
    }

    Some(QuoteScan {
        len: i + 1,
        lines,
        head,
    })
}

/// Scan a file or URL item into `out`.
///
/// Stops at the end of `src`, at `term` (consumed when present), at end of
/// input, or with no terminator at whitespace. Backslashes become `/`,
/// `%xx` is decoded to the code point `0xXX`, and `^` escapes are decoded.
/// Fails on control bytes, a malformed `%` or `^` escape, invalid UTF-8,
/// or a literal byte from `invalid`.
///
/// Returns the number of bytes consumed.
pub fn scan_item(src: &[u8], term: Option<u8>, invalid: &[u8], out: &mut String) -> Option<usize> {
    out.clear();
    let mut i = 0;

    while i < src.len() && Some(src[i]) != term {
        let b = src[i];
        if b == 0 {
            break;
        }
        if term.is_none() && is_any_space(b) {
            break;
        }
        if b < b' ' {
            return None;
        }
        match b {
            b'\\' => {
                out.push('/');
                i += 1;
            }
            b'%' => {
                let hi = Lex::of(at(src, i + 1)).hex_digit()?;
                let lo = Lex::of(at(src, i + 2)).hex_digit()?;
                out.push(char::from((hi << 4) | lo));
                i += 3;
            }
            b'^' => {
                if i + 1 == src.len() {
                    return None;
                }
                let (ch, width) = scan_char(&src[i..])?;
                if term.is_none() && ch.is_ascii_whitespace() {
                    break;
                }
                out.push(ch);
                i += width;
            }
            0x80.. => {
                let (ch, width) = utf8::decode_char(&src[i..])?;
                out.push(ch);
                i += width;
            }
            _ if invalid.contains(&b) => return None,
            _ => {
                out.push(char::from(b));
                i += 1;
            }
        }
    }

    if term.is_some() && i < src.len() && Some(src[i]) == term {
        i += 1;
    }
    Some(i)
}

/// Skip a `<...>` tag starting at `<`. Double-quoted runs inside the tag
/// may contain `>`.
///
/// Returns the offset one past the closing `>`, or `None` at end of input.
pub fn skip_tag(src: &[u8]) -> Option<usize> {
    let mut i = usize::from(at(src, 0) == b'<');
    loop {
        match at(src, i) {
            0 => return None,
            b'>' => return Some(i + 1),
            b'"' => {
                i += 1;
                while !matches!(at(src, i), 0 | b'"') {
                    i += 1;
                }
                if at(src, i) == 0 {
                    return None;
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
}
