//! Integer, decimal, percent, money, pair and tuple literals.

use reb_ir::{Tuple, MAX_TUPLE, MIN_TUPLE};

use super::split_sign;

/// `[+-]digits`, with `'` digit-group separators ignored.
pub fn parse_integer(text: &[u8]) -> Option<i64> {
    let (negative, digits) = split_sign(text);
    if !digits.first().is_some_and(u8::is_ascii_digit) {
        return None;
    }
    // Accumulate negatively so i64::MIN is reachable.
    let mut value: i64 = 0;
    for &b in digits {
        match b {
            b'0'..=b'9' => {
                value = value.checked_mul(10)?.checked_sub(i64::from(b - b'0'))?;
            }
            b'\'' => {}
            _ => return None,
        }
    }
    if negative {
        Some(value)
    } else {
        value.checked_neg()
    }
}

/// `[+-]digits[(.|,)digits][(e|E)[+-]digits]`, `'` separators ignored.
///
/// At least one mantissa digit is required; either side of the radix
/// point may be empty.
pub fn parse_decimal(text: &[u8]) -> Option<f64> {
    let (negative, rest) = split_sign(text);
    let mut clean = String::with_capacity(text.len() + 2);
    if negative {
        clean.push('-');
    }
    let (whole, mut i) = digit_run(rest, 0, &mut clean);
    if whole == 0 {
        clean.push('0');
    }
    let mut fraction = 0;
    if matches!(rest.get(i), Some(b'.' | b',')) {
        clean.push('.');
        (fraction, i) = digit_run(rest, i + 1, &mut clean);
        if fraction == 0 {
            clean.push('0');
        }
    }
    if whole + fraction == 0 {
        return None;
    }
    if matches!(rest.get(i), Some(b'e' | b'E')) {
        clean.push('e');
        i += 1;
        if let Some(&sign @ (b'+' | b'-')) = rest.get(i) {
            clean.push(char::from(sign));
            i += 1;
        }
        let (exponent, end) = digit_run(rest, i, &mut clean);
        i = end;
        if exponent == 0 {
            return None;
        }
    }
    if i != rest.len() {
        return None;
    }
    clean.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Copy the digits of `bytes[from..]` into `out`, skipping `'`
/// separators. Returns the digit count and the position after the run.
fn digit_run(bytes: &[u8], from: usize, out: &mut String) -> (usize, usize) {
    let mut i = from;
    let mut count = 0;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'0'..=b'9' => {
                out.push(char::from(b));
                count += 1;
            }
            b'\'' => {}
            _ => break,
        }
        i += 1;
    }
    (count, i)
}

/// A decimal followed by `%`, as a fraction: `10%` is `0.1`.
pub fn parse_percent(text: &[u8]) -> Option<f64> {
    let body = text.strip_suffix(b"%")?;
    parse_decimal(body).map(|value| value / 100.0)
}

/// `[+-]$decimal`.
pub fn parse_money(text: &[u8]) -> Option<f64> {
    let (negative, rest) = split_sign(text);
    let body = rest.strip_prefix(b"$")?;
    if matches!(body.first(), Some(b'+' | b'-')) {
        return None;
    }
    let amount = parse_decimal(body)?;
    Some(if negative { -amount } else { amount })
}

/// `decimal(x|X)decimal`.
pub fn parse_pair(text: &[u8]) -> Option<(f64, f64)> {
    let split = text.iter().position(|&b| b == b'x' || b == b'X')?;
    let x = parse_decimal(&text[..split])?;
    let y = parse_decimal(&text[split + 1..])?;
    Some((x, y))
}

/// Dot-separated byte components. Empty components read as 0 and short
/// tuples are zero-padded to three components.
pub fn parse_tuple(text: &[u8]) -> Option<Tuple> {
    let mut tuple = Tuple::new();
    for part in text.split(|&b| b == b'.') {
        if tuple.len() == MAX_TUPLE {
            return None;
        }
        if part.len() > 3 || !part.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let value = part
            .iter()
            .fold(0u16, |acc, &b| acc * 10 + u16::from(b - b'0'));
        tuple.push(u8::try_from(value).ok()?);
    }
    while tuple.len() < MIN_TUPLE {
        tuple.push(0);
    }
    Some(tuple)
}

#[cfg(test)]
mod tests;
