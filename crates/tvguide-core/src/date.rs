//! Schedule date and its validation
//!
//! The remote guide is queried one day at a time. A [`ScheduleDate`] is only
//! ever built through [`DateValidator`], so holding one means the triple has
//! passed the year/month/day checks.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DateField, GuideError, Result};

/// Reported in place of a value that was not supplied at all.
const UNDEFINED: &str = "undefined";

/// Validated (year, month, day) triple
///
/// No month-length check is made, so `31/02/2024` is a valid schedule date.
/// Deserializing goes through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateParts")]
pub struct ScheduleDate {
    year: u16,
    month: u8,
    day: u8,
}

impl ScheduleDate {
    /// Build a date from numeric components.
    ///
    /// # Errors
    /// `GuideError::InvalidDate` naming the first offending component.
    ///
    /// # Example
    /// ```
    /// use tvguide_core::ScheduleDate;
    ///
    /// let date = ScheduleDate::new(2024, 2, 31).unwrap();
    /// assert_eq!(date.to_string(), "31_02_2024");
    /// assert!(ScheduleDate::new(999, 1, 1).is_err());
    /// ```
    pub fn new(year: i64, month: i64, day: i64) -> Result<Self> {
        DateValidator::validate(
            Some(year.to_string().as_str()),
            Some(month.to_string().as_str()),
            Some(day.to_string().as_str()),
        )
    }

    /// Today's date in the local time zone.
    ///
    /// # Errors
    /// Only if the system clock reports a year outside 1000..=9999.
    pub fn today() -> Result<Self> {
        let now = Local::now().date_naive();
        Self::new(now.year().into(), now.month().into(), now.day().into())
    }

    /// Build a date from an optional `{"yyyy", "mm", "dd"}` mapping.
    ///
    /// All three keys or none: an absent, null or empty mapping means today.
    /// Values may be JSON numbers or numeric strings.
    ///
    /// # Errors
    /// - `GuideError::InvalidArgument` if `options` is not a mapping
    /// - `GuideError::InvalidConfiguration` if it has fewer than three keys
    /// - `GuideError::InvalidDate` if a component fails validation
    pub fn from_options(options: Option<&Value>) -> Result<Self> {
        let map = match options {
            None | Some(Value::Null) => return Self::today(),
            Some(Value::Object(map)) => map,
            Some(other) => return Err(GuideError::InvalidArgument(json_kind(other).to_string())),
        };

        if map.is_empty() {
            return Self::today();
        }
        if map.len() < 3 {
            return Err(GuideError::InvalidConfiguration(map.len()));
        }

        let field = |key: &str| map.get(key).map(value_text);
        DateValidator::validate(
            field("yyyy").as_deref(),
            field("mm").as_deref(),
            field("dd").as_deref(),
        )
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

/// Unvalidated components as they appear in serialized form
#[derive(Deserialize)]
struct DateParts {
    year: i64,
    month: i64,
    day: i64,
}

impl TryFrom<DateParts> for ScheduleDate {
    type Error = GuideError;

    fn try_from(parts: DateParts) -> Result<Self> {
        Self::new(parts.year, parts.month, parts.day)
    }
}

/// Formats as `DD_MM_YYYY`, the form the guide's `ddDate` field expects.
impl std::fmt::Display for ScheduleDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}_{:02}_{:04}", self.day, self.month, self.year)
    }
}

/// Validates raw date components
///
/// Components arrive as text so that the digit-count rules apply to what the
/// caller actually wrote.
pub struct DateValidator;

impl DateValidator {
    /// Validate a (year, month, day) triple.
    ///
    /// Checks run year, then month, then day; the first failure is returned.
    ///
    /// # Errors
    /// `GuideError::InvalidDate` carrying the offending value, or
    /// `undefined` when a component is missing.
    pub fn validate(year: Option<&str>, month: Option<&str>, day: Option<&str>) -> Result<ScheduleDate> {
        let year = check(DateField::Year, year, 4, 4, 1..=9999)?;
        let month = check(DateField::Month, month, 1, 2, 1..=12)?;
        let day = check(DateField::Day, day, 1, 2, 1..=31)?;

        Ok(ScheduleDate {
            year: year as u16,
            month: month as u8,
            day: day as u8,
        })
    }
}

/// Check one component: all ASCII digits, `min_len..=max_len` long, in `range`.
fn check(
    field: DateField,
    value: Option<&str>,
    min_len: usize,
    max_len: usize,
    range: std::ops::RangeInclusive<u32>,
) -> Result<u32> {
    let invalid = |value: &str| GuideError::InvalidDate {
        field,
        value: value.to_string(),
    };

    let value = value.ok_or_else(|| invalid(UNDEFINED))?;
    if value.len() < min_len || value.len() > max_len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(value));
    }

    let number: u32 = value.parse().map_err(|_| invalid(value))?;
    if !range.contains(&number) {
        return Err(invalid(value));
    }

    Ok(number)
}

/// Text of a mapping value as the caller wrote it.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
