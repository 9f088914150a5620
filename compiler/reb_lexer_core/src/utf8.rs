//! Single-character UTF-8 decoding.
//!
//! The scanner walks raw bytes and only decodes when it meets a byte at or
//! above `0x80`. Overlong forms, surrogates, and code points above
//! `U+10FFFF` are rejected.

/// Width of the UTF-8 sequence introduced by `lead`, or `None` if `lead`
/// cannot start a sequence.
#[inline]
pub fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Decode the character at the start of `bytes`.
///
/// Returns the character and the number of bytes it occupies.
pub fn decode_char(bytes: &[u8]) -> Option<(char, usize)> {
    let width = sequence_len(*bytes.first()?)?;
    let seq = bytes.get(..width)?;
    let ch = std::str::from_utf8(seq).ok()?.chars().next()?;
    Some((ch, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii() {
        assert_eq!(decode_char(b"abc"), Some(('a', 1)));
    }

    #[test]
    fn multibyte() {
        assert_eq!(decode_char("é!".as_bytes()), Some(('é', 2)));
        assert_eq!(decode_char("\u{20AC}".as_bytes()), Some(('\u{20AC}', 3)));
        assert_eq!(decode_char("\u{1F600}".as_bytes()), Some(('\u{1F600}', 4)));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(decode_char(b""), None);
        assert_eq!(decode_char(b"\xC0\x80"), None);
        assert_eq!(decode_char(b"\xE2\x82"), None);
        assert_eq!(decode_char(b"\x80"), None);
        // Encoded surrogate U+D800.
        assert_eq!(decode_char(b"\xED\xA0\x80"), None);
        assert_eq!(decode_char(b"\xF5\x80\x80\x80"), None);
    }
}
