//! Sun, moon and rising sign calculation.
//!
//! Moon and rising signs are fixed-cycle approximations, not ephemeris
//! positions. Their constants (2.5-day moon transit, 2-hour rising shift,
//! 30-day rising offset) must stay as they are: stored profiles were computed
//! with them.

use crate::birth::{BirthDate, BirthTime};
use crate::error::Result;
use crate::zodiac::{ZodiacSign, SIGNS};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AstrologyResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstrologyResult {
    pub sun_sign: ZodiacSign,
    pub moon_sign: ZodiacSign,
    pub rising_sign: ZodiacSign,
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

pub fn sun_sign(date: BirthDate) -> ZodiacSign {
    let (month, day) = (date.month(), date.day());
    let in_range = |start_month: u32, start_day: u32, end_month: u32, end_day: u32| {
        (month == start_month && day >= start_day) || (month == end_month && day <= end_day)
    };

    if in_range(3, 21, 4, 19) {
        ZodiacSign::Aries
    } else if in_range(4, 20, 5, 20) {
        ZodiacSign::Taurus
    } else if in_range(5, 21, 6, 20) {
        ZodiacSign::Gemini
    } else if in_range(6, 21, 7, 22) {
        ZodiacSign::Cancer
    } else if in_range(7, 23, 8, 22) {
        ZodiacSign::Leo
    } else if in_range(8, 23, 9, 22) {
        ZodiacSign::Virgo
    } else if in_range(9, 23, 10, 22) {
        ZodiacSign::Libra
    } else if in_range(10, 23, 11, 21) {
        ZodiacSign::Scorpio
    } else if in_range(11, 22, 12, 21) {
        ZodiacSign::Sagittarius
    } else if in_range(12, 22, 1, 19) {
        ZodiacSign::Capricorn
    } else if in_range(1, 20, 2, 18) {
        ZodiacSign::Aquarius
    } else {
        ZodiacSign::Pisces
    }
}

/// Days elapsed since Dec 31 of the previous year (Jan 1 is day 1).
pub fn day_of_year(date: BirthDate) -> u32 {
    date.day_of_year()
}

/// `floor(day_of_year / 2.5) mod 12`, as an index into [`SIGNS`].
pub fn moon_cycle(date: BirthDate) -> usize {
    // floor(d / 2.5) == floor(2d / 5) for non-negative integers.
    let d = day_of_year(date) as usize;
    (d * 2 / 5) % SIGNS.len()
}

pub fn moon_sign(date: BirthDate) -> ZodiacSign {
    let cycle = moon_cycle(date);
    tracing::debug!(day_of_year = day_of_year(date), cycle, "moon sign");
    ZodiacSign::from_index(cycle)
}

/// `location` is accepted for interface compatibility and does not affect
/// the result.
pub fn rising_sign(date: BirthDate, time: BirthTime, location: Option<&str>) -> ZodiacSign {
    let _ = location;
    let rising_index = (time.total_minutes() / 120) as usize % SIGNS.len();
    let offset = (day_of_year(date) / 30) as usize;
    let index = (rising_index + offset) % SIGNS.len();
    tracing::debug!(
        total_minutes = time.total_minutes(),
        rising_index,
        offset,
        index,
        "rising sign"
    );
    ZodiacSign::from_index(index)
}

pub fn astrology_data(date: BirthDate, time: BirthTime, location: Option<&str>) -> AstrologyResult {
    AstrologyResult {
        sun_sign: sun_sign(date),
        moon_sign: moon_sign(date),
        rising_sign: rising_sign(date, time, location),
    }
}

/// Parse raw strings and compute. Both inputs are checked before any sign is
/// computed, so a malformed time never yields a partial or wrong result.
pub fn astrology_data_from_strs(
    date: &str,
    time: &str,
    location: Option<&str>,
) -> Result<AstrologyResult> {
    let date = BirthDate::parse(date)?;
    let time = BirthTime::parse(time)?;
    Ok(astrology_data(date, time, location))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
