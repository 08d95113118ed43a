//! Validation of onboarding input, computed signs, and the profile update
//! built from them.
//!
//! Every check runs and every failure is reported, so a caller can surface
//! all problems with a submission at once.

use crate::birth::{time_re, BirthDate, BirthLocation, BirthTime, LengthError};
use crate::config::ValidationConfig;
use crate::error::{FieldError, NatalError, Result};
use crate::signs::{self, AstrologyResult};
use crate::zodiac::ZodiacSign;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Onboarding params
// ---------------------------------------------------------------------------

/// Raw params as handed over by the onboarding flow. Any of them may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingParams {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub birth_time: Option<String>,
    #[serde(default)]
    pub birth_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedOnboarding {
    pub display_name: String,
    pub birth_date: BirthDate,
    pub birth_time: BirthTime,
    pub birth_location: BirthLocation,
}

pub fn validate_onboarding_params(
    params: &OnboardingParams,
    bounds: &ValidationConfig,
    today: NaiveDate,
) -> Result<ValidatedOnboarding> {
    let mut errors = Vec::new();

    let display_name = check_display_name(params.display_name.as_deref(), bounds, &mut errors);
    let birth_date = check_birth_date(params.birth_date.as_deref(), bounds, today, &mut errors);
    let birth_time = match BirthTime::parse(params.birth_time.as_deref().unwrap_or_default()) {
        Ok(t) => Some(t),
        Err(_) => {
            errors.push(FieldError::new(
                "birthTime",
                "Birth time must be in HH:mm format (00:00 – 23:59)",
            ));
            None
        }
    };
    let birth_location =
        check_birth_location(params.birth_location.as_deref(), bounds, &mut errors);

    match (display_name, birth_date, birth_time, birth_location) {
        (Some(display_name), Some(birth_date), Some(birth_time), Some(birth_location)) => {
            Ok(ValidatedOnboarding {
                display_name,
                birth_date,
                birth_time,
                birth_location,
            })
        }
        _ => {
            tracing::warn!(failures = errors.len(), "onboarding params rejected");
            Err(NatalError::Validation(errors))
        }
    }
}

fn check_display_name(
    raw: Option<&str>,
    bounds: &ValidationConfig,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let name = raw.unwrap_or_default().trim();
    let len = name.chars().count();
    if len == 0 {
        errors.push(FieldError::new("displayName", "Name is required"));
        return None;
    }
    if len > bounds.max_display_name {
        errors.push(FieldError::new(
            "displayName",
            format!(
                "Name must be {} characters or fewer",
                bounds.max_display_name
            ),
        ));
        return None;
    }
    Some(name.to_string())
}

fn check_birth_date(
    raw: Option<&str>,
    bounds: &ValidationConfig,
    today: NaiveDate,
    errors: &mut Vec<FieldError>,
) -> Option<BirthDate> {
    let raw = raw.unwrap_or_default();
    if raw.is_empty() {
        errors.push(FieldError::new("birthDate", "Birth date is required"));
        return None;
    }
    let Ok(date) = BirthDate::parse(raw) else {
        errors.push(FieldError::new(
            "birthDate",
            "Birth date is not a valid date string",
        ));
        return None;
    };
    if date.date() < bounds.min_birth_date || date.date() > today {
        errors.push(FieldError::new(
            "birthDate",
            format!(
                "Birth date must be between {} and today",
                bounds.min_birth_date.format("%-d %B %Y")
            ),
        ));
        return None;
    }
    Some(date)
}

/// Length is measured after trimming, so `" X "` is one character and too
/// short even though its raw length would pass.
fn check_birth_location(
    raw: Option<&str>,
    bounds: &ValidationConfig,
    errors: &mut Vec<FieldError>,
) -> Option<BirthLocation> {
    let raw = raw.unwrap_or_default();
    let message = match BirthLocation::within(raw, bounds.min_location, bounds.max_location) {
        Ok(location) => return Some(location),
        Err(LengthError::TooShort) => format!(
            "Birth location must be at least {} characters",
            bounds.min_location
        ),
        Err(LengthError::TooLong) => format!(
            "Birth location must be {} characters or fewer",
            bounds.max_location
        ),
    };
    errors.push(FieldError::new("birthLocation", message));
    None
}

// ---------------------------------------------------------------------------
// Astrology data
// ---------------------------------------------------------------------------

/// Sign labels as they arrive from an untyped source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAstrologyData {
    pub sun_sign: String,
    pub moon_sign: String,
    pub rising_sign: String,
}

impl From<AstrologyResult> for RawAstrologyData {
    fn from(r: AstrologyResult) -> Self {
        Self {
            sun_sign: r.sun_sign.to_string(),
            moon_sign: r.moon_sign.to_string(),
            rising_sign: r.rising_sign.to_string(),
        }
    }
}

pub fn validate_astrology_data(raw: &RawAstrologyData) -> Result<AstrologyResult> {
    let mut errors = Vec::new();
    let mut check = |field: &str, label: &str, value: &str| {
        value.parse::<ZodiacSign>().map_err(|_| {
            errors.push(FieldError::new(
                field,
                format!("{label} sign must be a valid zodiac sign"),
            ));
        })
    };
    let sun = check("sunSign", "Sun", &raw.sun_sign);
    let moon = check("moonSign", "Moon", &raw.moon_sign);
    let rising = check("risingSign", "Rising", &raw.rising_sign);

    match (sun, moon, rising) {
        (Ok(sun_sign), Ok(moon_sign), Ok(rising_sign)) => Ok(AstrologyResult {
            sun_sign,
            moon_sign,
            rising_sign,
        }),
        _ => Err(NatalError::Validation(errors)),
    }
}

// ---------------------------------------------------------------------------
// UserOnboardingUpdate
// ---------------------------------------------------------------------------

static ISO_DATE_RE: OnceLock<Regex> = OnceLock::new();

fn iso_date_re() -> &'static Regex {
    ISO_DATE_RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap())
}

/// Profile row update that completes onboarding, keyed by user id so that
/// writing it twice leaves the same row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOnboardingUpdate {
    pub id: Uuid,
    pub display_name: String,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_location: String,
    pub sun_sign: ZodiacSign,
    pub moon_sign: ZodiacSign,
    pub rising_sign: ZodiacSign,
    pub onboarding_completed: bool,
}

impl UserOnboardingUpdate {
    pub fn build(user_id: Uuid, input: &ValidatedOnboarding, signs: AstrologyResult) -> Self {
        Self {
            id: user_id,
            display_name: input.display_name.clone(),
            birth_date: input.birth_date.to_iso(),
            birth_time: input.birth_time.to_string(),
            birth_location: input.birth_location.as_str().to_string(),
            sun_sign: signs.sun_sign,
            moon_sign: signs.moon_sign,
            rising_sign: signs.rising_sign,
            onboarding_completed: true,
        }
    }

    /// Check the persisted shape. Sign fields are already closed by type.
    pub fn validate(&self, bounds: &ValidationConfig) -> Result<()> {
        let mut errors = Vec::new();

        let name_len = self.display_name.chars().count();
        if name_len == 0 || name_len > bounds.max_display_name {
            errors.push(FieldError::new(
                "display_name",
                format!("must be 1-{} characters", bounds.max_display_name),
            ));
        }
        if !iso_date_re().is_match(&self.birth_date) {
            errors.push(FieldError::new(
                "birth_date",
                "Formatted birth date must be in YYYY-MM-DD format",
            ));
        }
        if !time_re().is_match(&self.birth_time) {
            errors.push(FieldError::new(
                "birth_time",
                "Birth time must be in HH:mm format",
            ));
        }
        let loc_len = self.birth_location.chars().count();
        if loc_len < bounds.min_location || loc_len > bounds.max_location {
            errors.push(FieldError::new(
                "birth_location",
                format!(
                    "must be {}-{} characters",
                    bounds.min_location, bounds.max_location
                ),
            ));
        }
        if !self.onboarding_completed {
            errors.push(FieldError::new("onboarding_completed", "must be true"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(NatalError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Validate params, compute signs, re-validate the signs, then build and
/// check the profile update. Nothing is returned unless every stage passes.
pub fn complete_onboarding(
    params: &OnboardingParams,
    user_id: Uuid,
    bounds: &ValidationConfig,
    today: NaiveDate,
) -> Result<UserOnboardingUpdate> {
    let input = validate_onboarding_params(params, bounds, today)?;
    tracing::info!(%user_id, birth_date = %input.birth_date, "calculating signs");

    let computed = signs::astrology_data(
        input.birth_date,
        input.birth_time,
        Some(input.birth_location.as_str()),
    );
    let checked = validate_astrology_data(&RawAstrologyData::from(computed))?;

    let update = UserOnboardingUpdate::build(user_id, &input, checked);
    update.validate(bounds)?;
    tracing::info!(
        %user_id,
        sun = %update.sun_sign,
        moon = %update.moon_sign,
        rising = %update.rising_sign,
        "onboarding payload ready"
    );
    Ok(update)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
