//! Date and time values.
//!
//! Four node kinds mirror the four date/time literal forms:
//!
//! - [`LocalDate`]: `1979-05-27`
//! - [`LocalTime`]: `07:32:00.999`
//! - [`LocalDateTime`]: `1979-05-27T07:32:00`
//! - [`OffsetDateTime`]: `1979-05-27T07:32:00-08:00`, with an [`Offset`]
//!
//! Every constructor validates its components and fails with a range error.
//! Sub-second fractions keep their written precision (up to nanoseconds), so
//! `00:00:00.500` and `00:00:00.5` are distinct values that print back as
//! written. No time zone is ever assumed for the local kinds.
//!
//! Conversions to and from the [`chrono`] equivalents are provided.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlet::{LocalDate, OffsetDateTime};
//!
//! let date: LocalDate = "2024-02-29".parse().unwrap();
//! assert_eq!(date.day(), 29);
//! assert!(LocalDate::new(2023, 2, 29).is_err());
//!
//! let odt: OffsetDateTime = "1979-05-27T00:32:00.999999-07:00".parse().unwrap();
//! assert_eq!(odt.to_string(), "1979-05-27T00:32:00.999999-07:00");
//! ```

use crate::error::{Error, Result};
use crate::scan::digits_value;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// A calendar date without time or offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDate {
    year: u16,
    month: u8,
    day: u8,
}

impl LocalDate {
    /// Creates a date, checking the day against the month and leap years.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] for a year above 9999 or an impossible date.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        if year > 9999 || !is_valid_date(year, month, day) {
            return Err(Error::range(&format!(
                "invalid date {:04}-{:02}-{:02}",
                year, month, day
            )));
        }
        Ok(LocalDate { year, month, day })
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }
}

fn is_valid_date(year: u16, month: u8, day: u8) -> bool {
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day)).is_some()
}

/// A wall-clock time without date or offset.
///
/// `precision` is the number of fractional-second digits (0 to 9) the time
/// was written with; it takes part in equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime {
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
    precision: u8,
}

impl LocalTime {
    /// Creates a time. The precision is the fewest digits that show
    /// `nanosecond` exactly.
    ///
    /// `second` may be 60 to represent a leap second.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] if any field is out of range.
    pub fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Result<Self> {
        if hour > 23 || minute > 59 || second > 60 || nanosecond >= NANOS_PER_SECOND {
            return Err(Error::range(&format!(
                "invalid time {:02}:{:02}:{:02}.{:09}",
                hour, minute, second, nanosecond
            )));
        }
        Ok(LocalTime {
            hour,
            minute,
            second,
            nanosecond,
            precision: minimal_precision(nanosecond),
        })
    }

    /// Sets how many fractional digits are printed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] if `precision` exceeds 9 or is too small to
    /// show the nanosecond field exactly.
    pub fn with_precision(mut self, precision: u8) -> Result<Self> {
        if precision > 9 || precision < minimal_precision(self.nanosecond) {
            return Err(Error::range(&format!(
                "precision {} cannot represent {} ns",
                precision, self.nanosecond
            )));
        }
        self.precision = precision;
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    #[inline]
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }
}

fn minimal_precision(nanosecond: u32) -> u8 {
    if nanosecond == 0 {
        return 0;
    }
    let mut precision = 9;
    let mut n = nanosecond;
    while n % 10 == 0 {
        n /= 10;
        precision -= 1;
    }
    precision
}

/// A date and a time without offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateTime {
    pub date: LocalDate,
    pub time: LocalTime,
}

impl LocalDateTime {
    #[must_use]
    pub const fn new(date: LocalDate, time: LocalTime) -> Self {
        LocalDateTime { date, time }
    }
}

/// Offset from UTC of an [`OffsetDateTime`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Offset {
    /// Written as `Z`.
    Utc,
    /// Written as `-00:00`: the instant is in UTC but the local offset is
    /// unknown.
    UnknownLocal,
    /// Written as `+HH:MM` or `-HH:MM`; signed minutes east of UTC.
    Custom { minutes: i16 },
}

impl Offset {
    /// Creates a numeric offset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Range`] unless the offset lies strictly within ±24 hours.
    pub fn custom(minutes: i16) -> Result<Self> {
        if minutes.unsigned_abs() >= 24 * 60 {
            return Err(Error::range(&format!("offset of {} minutes", minutes)));
        }
        Ok(Offset::Custom { minutes })
    }

    /// Signed minutes east of UTC.
    #[must_use]
    pub const fn minutes(&self) -> i16 {
        match self {
            Offset::Utc | Offset::UnknownLocal => 0,
            Offset::Custom { minutes } => *minutes,
        }
    }
}

/// A date-time anchored to UTC by an offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetDateTime {
    pub datetime: LocalDateTime,
    pub offset: Offset,
}

impl OffsetDateTime {
    #[must_use]
    pub const fn new(datetime: LocalDateTime, offset: Offset) -> Self {
        OffsetDateTime { datetime, offset }
    }
}

// ---------------------------------------------------------------------------
// Decoding from accepted input
// ---------------------------------------------------------------------------

/// Decodes an accepted `YYYY-MM-DD` at `pos`.
pub(crate) fn decode_date(src: &[u8], pos: usize) -> LocalDate {
    LocalDate {
        year: digits_value(src, pos, 4) as u16,
        month: digits_value(src, pos + 5, 2) as u8,
        day: digits_value(src, pos + 8, 2) as u8,
    }
}

/// Decodes an accepted time spanning `pos..end`. Fraction digits beyond
/// nanoseconds are truncated.
pub(crate) fn decode_time(src: &[u8], pos: usize, end: usize) -> LocalTime {
    let mut time = LocalTime {
        hour: digits_value(src, pos, 2) as u8,
        minute: digits_value(src, pos + 3, 2) as u8,
        second: digits_value(src, pos + 6, 2) as u8,
        nanosecond: 0,
        precision: 0,
    };
    let fraction_start = pos + 9;
    if end > fraction_start {
        let digits = (end - fraction_start).min(9);
        let value = digits_value(src, fraction_start, digits);
        time.nanosecond = value * 10u32.pow(9 - digits as u32);
        time.precision = digits as u8;
    }
    time
}

/// Decodes an accepted offset (`Z` or `±HH:MM`) at `pos`.
pub(crate) fn decode_offset(src: &[u8], pos: usize) -> Offset {
    match src[pos] {
        b'+' | b'-' => {
            let magnitude = digits_value(src, pos + 1, 2) * 60 + digits_value(src, pos + 4, 2);
            let minutes = magnitude as i16;
            match (src[pos], minutes) {
                (b'-', 0) => Offset::UnknownLocal,
                (b'-', _) => Offset::Custom { minutes: -minutes },
                _ => Offset::Custom { minutes },
            }
        }
        _ => Offset::Utc,
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.precision > 0 {
            let scaled = self.nanosecond / 10u32.pow(9 - u32::from(self.precision));
            write!(f, ".{:0width$}", scaled, width = usize::from(self.precision))?;
        }
        Ok(())
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Utc => f.write_str("Z"),
            Offset::UnknownLocal => f.write_str("-00:00"),
            Offset::Custom { minutes } => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.datetime, self.offset)
    }
}

// ---------------------------------------------------------------------------
// Parsing standalone literals
// ---------------------------------------------------------------------------

fn parse_whole<T>(s: &str, parser: fn(&str, usize) -> crate::parse::Parsed<T>) -> Result<T> {
    let (result, end) = parser(s, 0);
    let value = result?;
    if end != s.len() {
        return Err(Error::syntax(s, end, "end of input"));
    }
    Ok(value)
}

impl FromStr for LocalDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_whole(s, crate::parse::local_date)
    }
}

impl FromStr for LocalTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_whole(s, crate::parse::local_time)
    }
}

impl FromStr for LocalDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_whole(s, crate::parse::local_date_time)
    }
}

impl FromStr for OffsetDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_whole(s, crate::parse::offset_date_time)
    }
}

// ---------------------------------------------------------------------------
// chrono conversions
// ---------------------------------------------------------------------------

impl From<LocalDate> for NaiveDate {
    fn from(date: LocalDate) -> Self {
        NaiveDate::from_ymd_opt(
            i32::from(date.year),
            u32::from(date.month),
            u32::from(date.day),
        )
        .unwrap_or_default()
    }
}

impl TryFrom<NaiveDate> for LocalDate {
    type Error = Error;

    fn try_from(date: NaiveDate) -> Result<Self> {
        let year = u16::try_from(date.year())
            .map_err(|_| Error::range(&format!("year {} outside 0..=9999", date.year())))?;
        LocalDate::new(year, date.month() as u8, date.day() as u8)
    }
}

impl From<LocalTime> for NaiveTime {
    fn from(time: LocalTime) -> Self {
        // chrono encodes a leap second as second 59 with an overflowing fraction.
        let (second, nano) = if time.second == 60 {
            (59, time.nanosecond + NANOS_PER_SECOND)
        } else {
            (u32::from(time.second), time.nanosecond)
        };
        NaiveTime::from_hms_nano_opt(u32::from(time.hour), u32::from(time.minute), second, nano)
            .unwrap_or_default()
    }
}

impl From<NaiveTime> for LocalTime {
    fn from(time: NaiveTime) -> Self {
        let (second, nanosecond) = if time.nanosecond() >= NANOS_PER_SECOND {
            (60, time.nanosecond() - NANOS_PER_SECOND)
        } else {
            (time.second() as u8, time.nanosecond())
        };
        LocalTime {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second,
            nanosecond,
            precision: minimal_precision(nanosecond),
        }
    }
}

impl From<LocalDateTime> for NaiveDateTime {
    fn from(dt: LocalDateTime) -> Self {
        NaiveDateTime::new(dt.date.into(), dt.time.into())
    }
}

impl TryFrom<NaiveDateTime> for LocalDateTime {
    type Error = Error;

    fn try_from(dt: NaiveDateTime) -> Result<Self> {
        Ok(LocalDateTime {
            date: dt.date().try_into()?,
            time: dt.time().into(),
        })
    }
}

impl TryFrom<OffsetDateTime> for DateTime<FixedOffset> {
    type Error = Error;

    fn try_from(odt: OffsetDateTime) -> Result<Self> {
        let offset = FixedOffset::east_opt(i32::from(odt.offset.minutes()) * 60)
            .ok_or_else(|| Error::range(&format!("offset {}", odt.offset)))?;
        NaiveDateTime::from(odt.datetime)
            .and_local_timezone(offset)
            .single()
            .ok_or_else(|| Error::range(&format!("{} has no unique instant", odt)))
    }
}

impl TryFrom<DateTime<FixedOffset>> for OffsetDateTime {
    type Error = Error;

    fn try_from(dt: DateTime<FixedOffset>) -> Result<Self> {
        let seconds = dt.offset().local_minus_utc();
        if seconds % 60 != 0 {
            return Err(Error::range("offset is not a whole number of minutes"));
        }
        Ok(OffsetDateTime {
            datetime: dt.naive_local().try_into()?,
            offset: Offset::custom((seconds / 60) as i16)?,
        })
    }
}

// ---------------------------------------------------------------------------
// serde: canonical text
// ---------------------------------------------------------------------------

macro_rules! impl_serde_via_text {
    ($($ty:ident => $what:literal),* $(,)?) => {$(
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_newtype_struct(crate::ser::DATETIME_NAME, &self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct TextVisitor;

                impl<'de> serde::de::Visitor<'de> for TextVisitor {
                    type Value = $ty;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str($what)
                    }

                    fn visit_str<E>(self, value: &str) -> std::result::Result<$ty, E>
                    where
                        E: serde::de::Error,
                    {
                        value.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(TextVisitor)
            }
        }
    )*};
}

impl_serde_via_text! {
    LocalDate => "a local date",
    LocalTime => "a local time",
    LocalDateTime => "a local date-time",
    OffsetDateTime => "an offset date-time",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_validation() {
        assert!(LocalDate::new(2000, 2, 29).is_ok());
        assert!(LocalDate::new(1900, 2, 29).is_err());
        assert!(LocalDate::new(2024, 4, 31).is_err());
        assert!(LocalDate::new(2024, 0, 1).is_err());
        assert!(LocalDate::new(10000, 1, 1).is_err());
    }

    #[test]
    fn test_time_validation() {
        assert!(LocalTime::new(23, 59, 60, 0).is_ok());
        assert!(LocalTime::new(24, 0, 0, 0).is_err());
        assert!(LocalTime::new(0, 60, 0, 0).is_err());
        assert!(LocalTime::new(0, 0, 0, 1_000_000_000).is_err());
    }

    #[test]
    fn test_precision_is_kept() {
        let short: LocalTime = "00:00:00.5".parse().unwrap();
        let long: LocalTime = "00:00:00.500".parse().unwrap();
        assert_eq!(short.nanosecond(), long.nanosecond());
        assert_ne!(short, long);
        assert_eq!(long.to_string(), "00:00:00.500");
        assert_eq!(LocalTime::new(1, 2, 3, 120_000_000).unwrap().to_string(), "01:02:03.12");
    }

    #[test]
    fn test_fraction_truncated_to_nanoseconds() {
        let time: LocalTime = "07:32:00.1234567891".parse().unwrap();
        assert_eq!(time.nanosecond(), 123_456_789);
        assert_eq!(time.precision(), 9);
    }

    #[test]
    fn test_with_precision() {
        let time = LocalTime::new(1, 0, 0, 500_000_000).unwrap();
        assert_eq!(time.with_precision(3).unwrap().to_string(), "01:00:00.500");
        assert!(time.with_precision(0).is_err());
        assert!(time.with_precision(10).is_err());
    }

    #[test]
    fn test_offset_display() {
        assert_eq!(Offset::Utc.to_string(), "Z");
        assert_eq!(Offset::custom(-420).unwrap().to_string(), "-07:00");
        assert_eq!(Offset::custom(330).unwrap().to_string(), "+05:30");
        assert_eq!(Offset::custom(0).unwrap().to_string(), "+00:00");
        assert!(Offset::custom(24 * 60).is_err());
    }

    #[test]
    fn test_negative_zero_offset_is_kept() {
        let odt: OffsetDateTime = "1979-05-27T07:32:00-00:00".parse().unwrap();
        assert_eq!(odt.offset, Offset::UnknownLocal);
        assert_eq!(odt.offset.minutes(), 0);
        assert_eq!(odt.to_string(), "1979-05-27T07:32:00-00:00");

        let plus: OffsetDateTime = "1979-05-27T07:32:00+00:00".parse().unwrap();
        assert_eq!(plus.offset, Offset::Custom { minutes: 0 });
        assert_eq!(plus.to_string(), "1979-05-27T07:32:00+00:00");
    }

    #[test]
    fn test_offset_date_time_parse() {
        let odt: OffsetDateTime = "1979-05-27 07:32:00z".parse().unwrap();
        assert_eq!(odt.offset, Offset::Utc);
        assert_eq!(odt.to_string(), "1979-05-27T07:32:00Z");
        assert!("1979-05-27T07:32:00".parse::<OffsetDateTime>().is_err());
        assert!("1979-05-27T07:32:00Z trailing".parse::<OffsetDateTime>().is_err());
    }

    #[test]
    fn test_chrono_round_trip() {
        let odt: OffsetDateTime = "1979-05-27T00:32:00.999-07:00".parse().unwrap();
        let chrono_dt: DateTime<FixedOffset> = odt.try_into().unwrap();
        assert_eq!(chrono_dt.to_rfc3339(), "1979-05-27T00:32:00.999-07:00");
        let back = OffsetDateTime::try_from(chrono_dt).unwrap();
        assert_eq!(back, odt);
    }

    #[test]
    fn test_leap_second_to_chrono() {
        let time = LocalTime::new(23, 59, 60, 0).unwrap();
        let naive = NaiveTime::from(time);
        assert_eq!(LocalTime::from(naive), time);
    }

    #[test]
    fn test_serde_as_text() {
        let date = LocalDate::new(1979, 5, 27).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"1979-05-27\"");
        let back: LocalDate = serde_json::from_str("\"1979-05-27\"").unwrap();
        assert_eq!(back, date);
    }
}
