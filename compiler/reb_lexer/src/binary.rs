//! Base-2, base-16 and base-64 binary text.
//!
//! `#{...}` literals are base 16 unless prefixed with `2#`, `16#` or `64#`.
//! Whitespace between digits is ignored in every base.

use std::fmt;

use reb_lexer_core::lex_class::{is_any_space, Lex};

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Supported digit bases.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Base {
    Two,
    Sixteen,
    SixtyFour,
}

impl Base {
    /// Base for a numeric radix prefix.
    pub fn from_radix(radix: u32) -> Option<Base> {
        match radix {
            2 => Some(Base::Two),
            16 => Some(Base::Sixteen),
            64 => Some(Base::SixtyFour),
            _ => None,
        }
    }

    pub fn radix(self) -> u32 {
        match self {
            Base::Two => 2,
            Base::Sixteen => 16,
            Base::SixtyFour => 64,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.radix())
    }
}

/// Formatting for [`encode_base`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Insert a line feed after this many digits.
    pub line_break_every: Option<usize>,
}

/// Decode `text` up to `delimiter` (or its end).
///
/// Fails on a digit outside the base or an incomplete final group.
pub fn decode_base(text: &[u8], base: Base, delimiter: Option<u8>) -> Option<Vec<u8>> {
    let end = delimiter
        .and_then(|d| text.iter().position(|&b| b == d))
        .unwrap_or(text.len());
    let digits = text[..end].iter().copied().filter(|&b| !is_any_space(b));
    match base {
        Base::Two => decode_bits(digits),
        Base::Sixteen => decode_hex(digits),
        Base::SixtyFour => decode_base64(digits),
    }
}

fn decode_bits(digits: impl Iterator<Item = u8>) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    let mut acc = 0u8;
    let mut count = 0;
    for b in digits {
        let bit = match b {
            b'0' => 0,
            b'1' => 1,
            _ => return None,
        };
        acc = (acc << 1) | bit;
        count += 1;
        if count == 8 {
            out.push(acc);
            acc = 0;
            count = 0;
        }
    }
    (count == 0).then_some(out)
}

fn decode_hex(digits: impl Iterator<Item = u8>) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    let mut high = None;
    for b in digits {
        let nibble = Lex::of(b).hex_digit()?;
        match high.take() {
            None => high = Some(nibble),
            Some(h) => out.push((h << 4) | nibble),
        }
    }
    high.is_none().then_some(out)
}

fn base64_value(b: u8) -> Option<u32> {
    let value = match b {
        b'A'..=b'Z' => b - b'A',
        b'a'..=b'z' => b - b'a' + 26,
        b'0'..=b'9' => b - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(u32::from(value))
}

fn decode_base64(digits: impl Iterator<Item = u8>) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    let mut acc = 0u32;
    let mut count = 0;
    let mut padding = 0;
    for b in digits {
        if b == b'=' {
            padding += 1;
            continue;
        }
        if padding > 0 {
            return None;
        }
        acc = (acc << 6) | base64_value(b)?;
        count += 1;
        if count == 4 {
            out.extend_from_slice(&acc.to_be_bytes()[1..]);
            acc = 0;
            count = 0;
        }
    }
    // A trailing group of 2 or 3 digits carries 1 or 2 bytes.
    let (tail, take) = match count {
        0 => (0, 0),
        2 => (acc << 12, 1),
        3 => (acc << 6, 2),
        _ => return None,
    };
    if padding > 0 && count + padding != 4 {
        return None;
    }
    out.extend_from_slice(&tail.to_be_bytes()[1..1 + take]);
    Some(out)
}

/// Encode `bytes` as digits in `base`.
///
/// Base 16 uses upper-case digits; base 64 pads with `=`.
pub fn encode_base(bytes: &[u8], base: Base, options: EncodeOptions) -> String {
    let digits = match base {
        Base::Two => bytes.iter().map(|b| format!("{b:08b}")).collect::<String>(),
        Base::Sixteen => bytes.iter().map(|b| format!("{b:02X}")).collect::<String>(),
        Base::SixtyFour => encode_base64(bytes),
    };
    match options.line_break_every {
        Some(width) if width > 0 && digits.len() > width => {
            let mut out = String::with_capacity(digits.len() + digits.len() / width);
            for (i, ch) in digits.chars().enumerate() {
                if i > 0 && i % width == 0 {
                    out.push('\n');
                }
                out.push(ch);
            }
            out
        }
        _ => digits,
    }
}

fn encode_base64(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let mut group = [0u8; 3];
        group[..chunk.len()].copy_from_slice(chunk);
        let acc = u32::from_be_bytes([0, group[0], group[1], group[2]]);
        for k in 0..4 {
            if k <= chunk.len() {
                let index = (acc >> (18 - 6 * k)) & 0x3F;
                out.push(char::from(BASE64_ALPHABET[index as usize]));
            } else {
                out.push('=');
            }
        }
    }
    out
}

/// Decode the text of a `#{...}` token, honoring a `2#`, `16#` or `64#`
/// prefix.
pub fn parse_binary(text: &[u8]) -> Option<Vec<u8>> {
    let open = text.iter().position(|&b| b == b'{')?;
    let prefix = text.get(..open)?.strip_suffix(b"#")?;
    let base = if prefix.is_empty() {
        Base::Sixteen
    } else {
        let radix = std::str::from_utf8(prefix).ok()?.parse().ok()?;
        Base::from_radix(radix)?
    };
    let body = text.get(open + 1..)?;
    if body.last() != Some(&b'}') {
        return None;
    }
    // `{` cannot be a digit, so the first `}` is the closing one.
    if body.iter().position(|&b| b == b'}') != Some(body.len() - 1) {
        return None;
    }
    decode_base(body, base, Some(b'}'))
}

#[cfg(test)]
mod tests;
