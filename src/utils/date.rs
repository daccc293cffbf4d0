//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct used as the canonical value
//! for frontmatter dates (`pubDate`, `updatedDate`).
//!
//! # Accepted inputs
//!
//! | Input                         | Example                        |
//! |-------------------------------|--------------------------------|
//! | ISO date                      | `2024-06-15`                   |
//! | ISO datetime (`T` or space)   | `2024-06-15T14:30:45Z`         |
//! | ISO datetime with offset      | `2024-06-15 14:30+02:00`       |
//! | Month name                    | `Jul 08 2022`, `July 8, 2022`  |
//! | Epoch milliseconds (number)   | `1718461845000`                |
//!
//! Offsets are folded into UTC, so every accepted input has exactly one
//! canonical form (`to_rfc3339`).

use anyhow::{Result, bail};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

const SECONDS_PER_DAY: i64 = 86_400;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse ISO 8601 forms: `YYYY-MM-DD` with an optional time part
    /// `[T ]HH:MM[:SS[.fff]][Z|±HH:MM]`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let bytes = s.as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        let rest = &s[10..];
        if rest.is_empty() {
            let dt = Self::from_ymd(year, month, day);
            dt.validate().ok()?;
            return Some(dt);
        }

        let rest = rest.strip_prefix(['T', 't', ' '])?;
        let (hour, minute, second, offset) = parse_time(rest)?;

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;

        if offset == 0 {
            Some(dt)
        } else {
            Self::from_unix_seconds(dt.to_unix_seconds() - offset)
        }
    }

    /// Parse month-name forms: `Jul 08 2022`, `July 8, 2022`, `8 Jul 2022`,
    /// optionally preceded by a weekday (`Fri Jul 08 2022`).
    pub fn parse_month_name(s: &str) -> Option<Self> {
        let mut tokens: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.len() == 4 && weekday_from_name(tokens[0]) {
            tokens.remove(0);
        }
        let [first, second, third] = tokens.as_slice() else {
            return None;
        };

        let (month, day) = match month_from_name(first) {
            Some(month) => (month, parse_day(second)?),
            None => (month_from_name(second)?, parse_day(first)?),
        };
        let year = parse_u16(third.as_bytes())?;

        let dt = Self::from_ymd(year, month, day);
        dt.validate().ok()?;
        Some(dt)
    }

    /// Build from seconds since the Unix epoch.
    ///
    /// Returns `None` outside the four-digit year range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Ranges checked below
    pub fn from_unix_seconds(secs: i64) -> Option<Self> {
        let days = secs.div_euclid(SECONDS_PER_DAY);
        let time = secs.rem_euclid(SECONDS_PER_DAY);

        let (year, month, day) = civil_from_days(days);
        if !(0..=9999).contains(&year) {
            return None;
        }

        Some(Self::new(
            year as u16,
            month,
            day,
            (time / 3600) as u8,
            ((time / 60) % 60) as u8,
            (time % 60) as u8,
        ))
    }

    /// Seconds since the Unix epoch.
    pub fn to_unix_seconds(self) -> i64 {
        let days = days_from_civil(i64::from(self.year), self.month, self.day);
        days * SECONDS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as RFC 3339: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for DateTimeUtc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

/// Coerce a frontmatter value into a date.
///
/// Strings go through [`DateTimeUtc::parse`] then
/// [`DateTimeUtc::parse_month_name`]; numbers are epoch milliseconds.
/// Anything else is rejected.
#[allow(clippy::cast_possible_truncation)] // Out-of-range values fail in from_unix_seconds
pub fn coerce(value: &JsonValue) -> Option<DateTimeUtc> {
    match value {
        JsonValue::String(s) => {
            DateTimeUtc::parse(s).or_else(|| DateTimeUtc::parse_month_name(s))
        }
        JsonValue::Number(n) => {
            let millis = match n.as_i64() {
                Some(millis) => millis,
                None => n.as_f64().filter(|f| f.is_finite())?.floor() as i64,
            };
            DateTimeUtc::from_unix_seconds(millis.div_euclid(1000))
        }
        _ => None,
    }
}

/// Parse `HH:MM[:SS[.fff]][Z|±HH:MM]`, returning the UTC offset in seconds.
fn parse_time(s: &str) -> Option<(u8, u8, u8, i64)> {
    let bytes = s.as_bytes();
    if bytes.len() < 5 || bytes[2] != b':' {
        return None;
    }

    let hour = parse_u8(&bytes[0..2])?;
    let minute = parse_u8(&bytes[3..5])?;
    let mut second = 0;
    let mut i = 5;

    if bytes.len() >= 8 && bytes[5] == b':' {
        second = parse_u8(&bytes[6..8])?;
        i = 8;

        // Fractional seconds are accepted and truncated
        if bytes.get(i) == Some(&b'.') {
            i += 1;
            let start = i;
            while bytes.get(i).is_some_and(u8::is_ascii_digit) {
                i += 1;
            }
            if i == start {
                return None;
            }
        }
    }

    let offset = match &s[i..] {
        "" | "Z" | "z" => 0,
        tz => parse_offset(tz)?,
    };

    Some((hour, minute, second, offset))
}

/// Parse `±HH:MM`, `±HHMM` or `±HH` into seconds east of UTC.
fn parse_offset(s: &str) -> Option<i64> {
    let bytes = s.as_bytes();
    let sign = match bytes.first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };

    let (hours, minutes) = match bytes.len() {
        3 => (parse_u8(&bytes[1..3])?, 0),
        5 => (parse_u8(&bytes[1..3])?, parse_u8(&bytes[3..5])?),
        6 if bytes[3] == b':' => (parse_u8(&bytes[1..3])?, parse_u8(&bytes[4..6])?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(sign * (i64::from(hours) * 3600 + i64::from(minutes) * 60))
}

/// Match a full or abbreviated (3+ letters) English month name.
#[allow(clippy::cast_possible_truncation)] // index < 12
fn month_from_name(token: &str) -> Option<u8> {
    let lower = token.trim_end_matches('.').to_ascii_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(&lower))
        .map(|i| i as u8 + 1)
}

fn weekday_from_name(token: &str) -> bool {
    let lower = token.trim_end_matches(['.', ',']).to_ascii_lowercase();
    lower.len() >= 3 && WEEKDAY_NAMES.iter().any(|name| name.starts_with(&lower))
}

/// Parse a 1 or 2 digit day of month
fn parse_day(token: &str) -> Option<u8> {
    match token.len() {
        1 => parse_u8(&[b'0', token.as_bytes()[0]]),
        2 => parse_u8(token.as_bytes()),
        _ => None,
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let (month, day) = (i64::from(month), i64::from(day));
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // month/day are small
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
