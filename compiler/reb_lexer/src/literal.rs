//! Literal parsers.
//!
//! Each parser takes the exact byte range the tokenizer assigned to a token
//! and either converts all of it or fails. None of them allocate unless the
//! value itself owns text.

mod date;
mod item;
mod number;

pub use date::{parse_date, parse_time};
pub use item::{is_issue_text, parse_char, parse_email, parse_file, parse_tag, parse_url};
pub use number::{
    parse_decimal, parse_integer, parse_money, parse_pair, parse_percent, parse_tuple,
};

#[inline]
fn at(bytes: &[u8], i: usize) -> u8 {
    bytes.get(i).copied().unwrap_or(0)
}

/// Leading decimal digits of `bytes`: their value and how many there were.
///
/// No digits yields `(0, 0)`; overflow yields `None`.
fn grab_int(bytes: &[u8]) -> Option<(i64, usize)> {
    let mut value: i64 = 0;
    let mut count = 0;
    while let Some(&b) = bytes.get(count) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.checked_mul(10)?.checked_add(i64::from(b - b'0'))?;
        count += 1;
    }
    Some((value, count))
}

/// Split a leading `+` or `-`; the flag is true for `-`.
fn split_sign(bytes: &[u8]) -> (bool, &[u8]) {
    match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    }
}
