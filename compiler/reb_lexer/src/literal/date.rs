//! Time and date literals.

use reb_ir::datetime::{
    Date, Time, Zone, MONTH_NAMES, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MIN, NANOS_PER_SEC,
};

use super::{at, grab_int};

/// Largest year a date literal may name.
const MAX_YEAR: i64 = 0x3FFF;

/// Fraction digits kept; a time has nanosecond resolution.
const FRACTION_DIGITS: u32 = 9;

/// `[+-]H:M[:S][.frac][AM|PM]`, `[+-]M:S.frac`, or `:M`.
pub fn parse_time(text: &[u8]) -> Option<Time> {
    let (time, used) = scan_time(text)?;
    (used == text.len()).then_some(time)
}

/// Leading fraction digits scaled to nanoseconds; extra digits are
/// consumed and dropped.
fn grab_fraction(bytes: &[u8]) -> (i64, usize) {
    let count = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut value = 0i64;
    let mut kept = 0;
    for &b in bytes.iter().take(count) {
        if kept == FRACTION_DIGITS {
            break;
        }
        value = value * 10 + i64::from(b - b'0');
        kept += 1;
    }
    (value * 10i64.pow(FRACTION_DIGITS - kept), count)
}

/// Time at the start of `text`, and the number of bytes it spans.
fn scan_time(text: &[u8]) -> Option<(Time, usize)> {
    let mut i = 0;
    let negative = match at(text, 0) {
        b'-' => {
            i = 1;
            true
        }
        b'+' => {
            i = 1;
            false
        }
        _ => false,
    };
    if matches!(at(text, i), b'+' | b'-') {
        return None;
    }

    // The leading part may be empty, as in `:30`.
    let (mut first, n) = grab_int(text.get(i..)?)?;
    i += n;
    if at(text, i) != b':' {
        return None;
    }
    i += 1;

    let (second, n) = grab_int(text.get(i..)?)?;
    if n == 0 {
        return None;
    }
    i += n;

    let mut third = None;
    if at(text, i) == b':' {
        let (value, n) = grab_int(text.get(i + 1..)?)?;
        if n == 0 {
            return None;
        }
        third = Some(value);
        i += 1 + n;
    }

    let mut fraction = None;
    if matches!(at(text, i), b'.' | b',') {
        let (value, n) = grab_fraction(text.get(i + 1..)?);
        if n == 0 {
            return None;
        }
        fraction = Some(value);
        i += 1 + n;
    }

    let meridian = at(text, i).to_ascii_uppercase();
    if matches!(meridian, b'A' | b'P') && at(text, i + 1).to_ascii_uppercase() == b'M' {
        if first > 12 {
            return None;
        }
        if meridian == b'P' {
            if first != 12 {
                first += 12;
            }
        } else if first == 12 {
            first = 0;
        }
        i += 2;
    }

    let nanos = if third.is_some() || fraction.is_none() {
        // H:M[:S][.frac]
        let seconds = third.unwrap_or(0);
        if second > 59 || seconds > 59 {
            return None;
        }
        first
            .checked_mul(NANOS_PER_HOUR)?
            .checked_add(second * NANOS_PER_MIN)?
            .checked_add(seconds * NANOS_PER_SEC)?
            .checked_add(fraction.unwrap_or(0))?
    } else {
        // M:S.frac
        if second > 59 {
            return None;
        }
        first
            .checked_mul(NANOS_PER_MIN)?
            .checked_add(second * NANOS_PER_SEC)?
            .checked_add(fraction.unwrap_or(0))?
    };

    let time = Time(nanos);
    Some((if negative { time.negate() } else { time }, i))
}

/// Month number for a name prefix of at least three letters.
fn month_from_name(name: &[u8]) -> Option<u8> {
    if name.len() < 3 {
        return None;
    }
    let index = MONTH_NAMES.iter().position(|month| {
        month
            .as_bytes()
            .get(..name.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
    })?;
    u8::try_from(index + 1).ok()
}

/// Calendar date with optional time of day and zone.
///
/// Accepts day-first (`1-Jan-2021`, `1/1/2021`, `1.1.2021`) and year-first
/// (`2021-01-31`) orders. The same separator must appear twice; two-digit
/// years pivot at 50. A leading `Weekday,` is skipped. A time follows
/// after `/` or a space and a zone (`+5:30`, `-0800`, `+5`) must end the
/// text.
pub fn parse_date(text: &[u8]) -> Option<Date> {
    let end = text.len();
    let mut i = 0;

    let weekday = text.iter().take_while(|b| b.is_ascii_alphabetic()).count();
    if weekday > 0 && at(text, weekday) == b',' {
        i = weekday + 1;
    }

    let (lead, n) = grab_int(text.get(i..)?)?;
    let (mut year, mut day) = match n {
        0 => return None,
        1..=3 => (None, Some(lead)),
        _ => (Some(lead), None),
    };
    i += n;

    let sep = at(text, i);
    if !matches!(sep, b'/' | b'-' | b'.' | b' ') {
        return None;
    }
    i += 1;

    let (number, n) = grab_int(text.get(i..)?)?;
    let month = if n > 0 {
        i += n;
        u8::try_from(number).ok()?
    } else {
        let len = text[i..].iter().take_while(|b| b.is_ascii_alphabetic()).count();
        let month = month_from_name(&text[i..i + len])?;
        i += len;
        month
    };

    if at(text, i) != sep {
        return None;
    }
    i += 1;

    let (last, n) = grab_int(text.get(i..)?)?;
    if n == 0 {
        return None;
    }
    i += n;
    if year.is_none() {
        year = Some(match (n, last) {
            (3.., _) => last,
            (_, 50..) => 1900 + last,
            _ => 2000 + last,
        });
    } else {
        day = Some(last);
    }

    let year = year.filter(|&y| y <= MAX_YEAR)?;
    let mut date = Date::new(
        i32::try_from(year).ok()?,
        month,
        u8::try_from(day?).ok()?,
    )?;

    if i < end && matches!(text[i], b'/' | b' ') {
        i += 1;
        if i < end {
            let (time, n) = scan_time(&text[i..])?;
            if !(0..NANOS_PER_DAY).contains(&time.nanos()) {
                return None;
            }
            date.time = Some(time);
            i += n;
        }
    }

    if i < end && matches!(text[i], b'+' | b'-') {
        let negative = text[i] == b'-';
        i += 1;
        let (number, n) = grab_int(&text[i..])?;
        if n == 0 || n > 4 {
            return None;
        }
        i += n;
        let minutes = if at(text, i) == b':' {
            let (extra, m) = grab_int(text.get(i + 1..)?)?;
            if m == 0 || extra > 59 {
                return None;
            }
            i += 1 + m;
            number * 60 + extra
        } else if n <= 2 {
            number * 60
        } else {
            if number % 100 > 59 {
                return None;
            }
            (number / 100) * 60 + number % 100
        };
        let minutes = i32::try_from(minutes).ok()?;
        date.zone = Some(Zone::from_minutes(if negative { -minutes } else { minutes })?);
    }

    (i == end).then_some(date)
}

#[cfg(test)]
mod tests;
