//! Time-of-day, duration, and calendar date payloads.

use std::fmt;

pub const NANOS_PER_SEC: i64 = 1_000_000_000;
pub const NANOS_PER_MIN: i64 = 60 * NANOS_PER_SEC;
pub const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MIN;
pub const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Signed duration in nanoseconds. Also used for a date's time of day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(pub i64);

impl Time {
    pub fn from_hms_nanos(hours: i64, minutes: i64, seconds: i64, nanos: i64) -> Self {
        Time(hours * NANOS_PER_HOUR + minutes * NANOS_PER_MIN + seconds * NANOS_PER_SEC + nanos)
    }

    #[inline]
    pub fn nanos(self) -> i64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn negate(self) -> Self {
        Time(-self.0)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total = self.0.unsigned_abs();
        let hours = total / NANOS_PER_HOUR.unsigned_abs();
        let minutes = (total / NANOS_PER_MIN.unsigned_abs()) % 60;
        let seconds = (total / NANOS_PER_SEC.unsigned_abs()) % 60;
        let frac = total % NANOS_PER_SEC.unsigned_abs();
        write!(f, "{sign}{hours}:{minutes:02}:{seconds:02}")?;
        if frac != 0 {
            let digits = format!("{frac:09}");
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

/// UTC offset in minutes, a multiple of 15 within +/-15 hours.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zone(pub i16);

impl Zone {
    pub const MAX_MINUTES: i16 = 15 * 60;

    /// Zone for an offset, if representable.
    pub fn from_minutes(minutes: i32) -> Option<Self> {
        let minutes = i16::try_from(minutes).ok()?;
        (minutes.abs() <= Self::MAX_MINUTES && minutes % 15 == 0).then_some(Zone(minutes))
    }

    #[inline]
    pub fn minutes(self) -> i16 {
        self.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}:{:02}", abs / 60, abs % 60)
    }
}

/// Calendar date with optional time of day and zone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: i32,
    /// 1-based month.
    pub month: u8,
    /// 1-based day of month.
    pub day: u8,
    pub time: Option<Time>,
    pub zone: Option<Zone>,
}

impl Date {
    /// A validated date without time or zone.
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        let max_day = days_in_month(year, month)?;
        (day >= 1 && day <= max_day).then_some(Date {
            year,
            month,
            day,
            time: None,
            zone: None,
        })
    }
}

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = MONTH_NAMES
            .get(usize::from(self.month).wrapping_sub(1))
            .map_or("???", |name| &name[..3]);
        write!(f, "{}-{}-{}", self.day, month, self.year)?;
        if let Some(time) = self.time {
            write!(f, "/{time}")?;
        }
        if let Some(zone) = self.zone {
            write!(f, "{zone}")?;
        }
        Ok(())
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` (1-based) of `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u8) -> Option<u8> {
    const DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let days = *DAYS.get(usize::from(month).checked_sub(1)?)?;
    Some(if month == 2 && is_leap_year(year) { 29 } else { days })
}
