use super::*;
use pretty_assertions::assert_eq;

#[test]
fn integers() {
    assert_eq!(parse_integer(b"0"), Some(0));
    assert_eq!(parse_integer(b"42"), Some(42));
    assert_eq!(parse_integer(b"-42"), Some(-42));
    assert_eq!(parse_integer(b"+7"), Some(7));
    assert_eq!(parse_integer(b"1'000'000"), Some(1_000_000));
}

#[test]
fn integer_limits() {
    assert_eq!(parse_integer(b"9223372036854775807"), Some(i64::MAX));
    assert_eq!(parse_integer(b"-9223372036854775808"), Some(i64::MIN));
    assert_eq!(parse_integer(b"9223372036854775808"), None);
}

#[test]
fn integer_rejects() {
    assert_eq!(parse_integer(b""), None);
    assert_eq!(parse_integer(b"-"), None);
    assert_eq!(parse_integer(b"'1"), None);
    assert_eq!(parse_integer(b"12a"), None);
    assert_eq!(parse_integer(b"1.0"), None);
}

#[test]
fn decimals() {
    assert_eq!(parse_decimal(b"1.5"), Some(1.5));
    assert_eq!(parse_decimal(b"1,5"), Some(1.5));
    assert_eq!(parse_decimal(b"-0.25"), Some(-0.25));
    assert_eq!(parse_decimal(b".5"), Some(0.5));
    assert_eq!(parse_decimal(b"2."), Some(2.0));
    assert_eq!(parse_decimal(b"1'000.5"), Some(1000.5));
    assert_eq!(parse_decimal(b"1e3"), Some(1000.0));
    assert_eq!(parse_decimal(b"1.5E-2"), Some(0.015));
}

#[test]
fn decimal_rejects() {
    assert_eq!(parse_decimal(b"."), None);
    assert_eq!(parse_decimal(b"1e"), None);
    assert_eq!(parse_decimal(b"1.2.3"), None);
    assert_eq!(parse_decimal(b"1e999"), None);
    assert_eq!(parse_decimal(b"inf"), None);
}

#[test]
fn percents() {
    assert_eq!(parse_percent(b"10%"), Some(0.1));
    assert_eq!(parse_percent(b"-50%"), Some(-0.5));
    assert_eq!(parse_percent(b"10"), None);
}

#[test]
fn money() {
    assert_eq!(parse_money(b"$1.50"), Some(1.5));
    assert_eq!(parse_money(b"-$2"), Some(-2.0));
    assert_eq!(parse_money(b"$-2"), None);
    assert_eq!(parse_money(b"1.50"), None);
}

#[test]
fn pairs() {
    assert_eq!(parse_pair(b"10x20"), Some((10.0, 20.0)));
    assert_eq!(parse_pair(b"1.5X-2"), Some((1.5, -2.0)));
    assert_eq!(parse_pair(b"10x"), None);
    assert_eq!(parse_pair(b"10"), None);
}

#[test]
fn tuples() {
    let tuple = parse_tuple(b"1.2.3").unwrap_or_default();
    assert_eq!(tuple.as_slice(), &[1, 2, 3]);
    let tuple = parse_tuple(b"192.168.0.255").unwrap_or_default();
    assert_eq!(tuple.as_slice(), &[192, 168, 0, 255]);
}

#[test]
fn tuple_padding_and_empty_parts() {
    let tuple = parse_tuple(b"1.2").unwrap_or_default();
    assert_eq!(tuple.as_slice(), &[1, 2, 0]);
    let tuple = parse_tuple(b"1..3").unwrap_or_default();
    assert_eq!(tuple.as_slice(), &[1, 0, 3]);
}

#[test]
fn tuple_rejects() {
    assert_eq!(parse_tuple(b"1.2.256"), None);
    assert_eq!(parse_tuple(b"1.2.x"), None);
    assert_eq!(parse_tuple(b"1.2.3.4.5.6.7.8.9.10.11"), None);
    assert!(parse_tuple(b"1.2.3.4.5.6.7.8.9.10").is_some());
}
