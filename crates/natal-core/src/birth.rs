//! Typed birth data.
//!
//! Raw strings from callers are parsed here, once, into values the sign
//! calculator can consume without further checks. A `BirthTime` that exists
//! is always a valid time of day.

use crate::error::{NatalError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// BirthDate
// ---------------------------------------------------------------------------

/// Calendar date of birth. No time-of-day or zone component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                NatalError::InvalidInput(format!("{year:04}-{month:02}-{day:02} is not a calendar date"))
            })
    }

    /// Parse an ISO date (`1990-06-15`) or an ISO date-time
    /// (`1990-06-15T08:30:00Z`, `1990-06-15T08:30:00`). For date-times the
    /// calendar date as written is kept; no zone conversion is applied.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.naive_local().date()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self(dt.date()));
            }
        }
        Err(NatalError::InvalidInput(format!(
            "'{s}' is not a valid date string"
        )))
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Whole days since Dec 31 of the previous year: Jan 1 is 1, Dec 31 is 365 or 366.
    pub fn day_of_year(self) -> u32 {
        self.0.ordinal()
    }

    /// `YYYY-MM-DD`, the shape the profile row stores.
    pub fn to_iso(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl std::str::FromStr for BirthDate {
    type Err = NatalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

// ---------------------------------------------------------------------------
// BirthTime
// ---------------------------------------------------------------------------

static TIME_RE: OnceLock<Regex> = OnceLock::new();

pub(crate) fn time_re() -> &'static Regex {
    TIME_RE.get_or_init(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap())
}

/// 24-hour time of day, `00:00` through `23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BirthTime {
    hour: u8,
    minute: u8,
}

impl BirthTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(NatalError::InvalidInput(format!(
                "{hour:02}:{minute:02} is not a time of day"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Parse strict `HH:mm`. Single-digit hours, seconds, and surrounding
    /// whitespace are all rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let caps = time_re().captures(s).ok_or_else(|| {
            NatalError::InvalidInput(format!("birth time '{s}' is not in HH:mm format"))
        })?;
        // Both groups are two ASCII digits in range, so these cannot fail.
        let hour: u8 = caps[1].parse().map_err(|_| NatalError::InvalidInput(s.to_string()))?;
        let minute: u8 = caps[2].parse().map_err(|_| NatalError::InvalidInput(s.to_string()))?;
        Self::new(hour, minute)
    }

    pub fn total_minutes(self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl fmt::Display for BirthTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for BirthTime {
    type Err = NatalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for BirthTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BirthTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// BirthLocation
// ---------------------------------------------------------------------------

/// Which end of a length range a value fell outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthError {
    TooShort,
    TooLong,
}

/// Free-text place of birth. Carried through to the profile but never used
/// in sign calculation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirthLocation(String);

impl BirthLocation {
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = 200;

    /// Accepts a trimmed length within `min..=max` characters. Surrounding
    /// whitespace does not count towards `min`.
    pub fn within(s: &str, min: usize, max: usize) -> std::result::Result<Self, LengthError> {
        let trimmed = s.trim();
        let len = trimmed.chars().count();
        if len < min {
            return Err(LengthError::TooShort);
        }
        if len > max {
            return Err(LengthError::TooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn with_bounds(s: &str, min: usize, max: usize) -> Result<Self> {
        Self::within(s, min, max).map_err(|_| {
            NatalError::InvalidInput(format!(
                "birth location must be {min}-{max} characters, got {}",
                s.trim().chars().count()
            ))
        })
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::with_bounds(s, Self::MIN_LEN, Self::MAX_LEN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BirthLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
