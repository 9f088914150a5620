use super::*;
use pretty_assertions::assert_eq;

fn hms(h: i64, m: i64, s: i64) -> Time {
    Time::from_hms_nanos(h, m, s, 0)
}

fn date(text: &str) -> Date {
    parse_date(text.as_bytes()).unwrap_or_else(|| panic!("date {text:?} should parse"))
}

#[test]
fn hour_minute_forms() {
    assert_eq!(parse_time(b"10:30"), Some(hms(10, 30, 0)));
    assert_eq!(parse_time(b"10:30:15"), Some(hms(10, 30, 15)));
    assert_eq!(parse_time(b"100:00"), Some(hms(100, 0, 0)));
    assert_eq!(parse_time(b"-1:30"), Some(hms(1, 30, 0).negate()));
    assert_eq!(parse_time(b"+1:30"), Some(hms(1, 30, 0)));
}

#[test]
fn fractions() {
    assert_eq!(
        parse_time(b"1:02:03.5"),
        Some(Time::from_hms_nanos(1, 2, 3, 500_000_000))
    );
    // Minutes and seconds when there is a fraction but no third part.
    assert_eq!(
        parse_time(b"2:03.25"),
        Some(Time::from_hms_nanos(0, 2, 3, 250_000_000))
    );
    assert_eq!(
        parse_time(b"0:00:00.1234567891"),
        Some(Time::from_hms_nanos(0, 0, 0, 123_456_789))
    );
}

#[test]
fn meridian() {
    assert_eq!(parse_time(b"10:30PM"), Some(hms(22, 30, 0)));
    assert_eq!(parse_time(b"12:15am"), Some(hms(0, 15, 0)));
    assert_eq!(parse_time(b"12:15pm"), Some(hms(12, 15, 0)));
    assert_eq!(parse_time(b"13:00PM"), None);
}

#[test]
fn leading_colon() {
    assert_eq!(parse_time(b":30"), Some(hms(0, 30, 0)));
}

#[test]
fn time_rejects() {
    assert_eq!(parse_time(b"10:"), None);
    assert_eq!(parse_time(b"10:60"), None);
    assert_eq!(parse_time(b"--1:00"), None);
    assert_eq!(parse_time(b"10:30x"), None);
    assert_eq!(parse_time(b"10"), None);
}

#[test]
fn day_first_dates() {
    let d = date("1-Jan-2021");
    assert_eq!((d.year, d.month, d.day), (2021, 1, 1));
    let d = date("31/12/1999");
    assert_eq!((d.year, d.month, d.day), (1999, 12, 31));
    let d = date("5.june.2020");
    assert_eq!((d.year, d.month, d.day), (2020, 6, 5));
    let d = date("1 Feb 2020");
    assert_eq!((d.year, d.month, d.day), (2020, 2, 1));
    assert_eq!(d.time, None);
    assert_eq!(d.zone, None);
}

#[test]
fn year_first_dates() {
    let d = date("2021-01-31");
    assert_eq!((d.year, d.month, d.day), (2021, 1, 31));
}

#[test]
fn two_digit_year_pivot() {
    assert_eq!(date("1-Jan-21").year, 2021);
    assert_eq!(date("1-Jan-49").year, 2049);
    assert_eq!(date("1-Jan-50").year, 1950);
    assert_eq!(date("1-Jan-99").year, 1999);
}

#[test]
fn weekday_prefix_is_skipped() {
    let d = date("Fri,1-Jan-2021");
    assert_eq!((d.year, d.month, d.day), (2021, 1, 1));
}

#[test]
fn leap_days() {
    assert!(parse_date(b"29-Feb-2024").is_some());
    assert!(parse_date(b"29-Feb-2023").is_none());
    assert!(parse_date(b"29-Feb-1900").is_none());
    assert!(parse_date(b"29-Feb-2000").is_some());
}

#[test]
fn date_with_time_and_zone() {
    let d = date("1-Jan-2021/10:00");
    assert_eq!(d.time, Some(hms(10, 0, 0)));
    let d = date("1-Jan-2021/10:00-5:00");
    assert_eq!(d.zone, Zone::from_minutes(-300));
    let d = date("1-Jan-2021/10:00:30+0530");
    assert_eq!(d.time, Some(hms(10, 0, 30)));
    assert_eq!(d.zone, Zone::from_minutes(330));
    let d = date("1-Jan-2021+5");
    assert_eq!(d.zone, Zone::from_minutes(300));
}

#[test]
fn date_rejects() {
    assert!(parse_date(b"1-Jan/2021").is_none(), "mixed separators");
    assert!(parse_date(b"1-Ja-2021").is_none(), "short month name");
    assert!(parse_date(b"1-Foo-2021").is_none());
    assert!(parse_date(b"32-Jan-2021").is_none());
    assert!(parse_date(b"1-13-2021").is_none());
    assert!(parse_date(b"1-Jan-2021/24:00").is_none(), "time of day past midnight");
    assert!(parse_date(b"1-Jan-2021+5:10").is_none(), "zone not on 15 minutes");
    assert!(parse_date(b"1-Jan-2021+16:00").is_none());
    assert!(parse_date(b"1-Jan-2021x").is_none());
}
