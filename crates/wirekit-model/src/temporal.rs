//! Temporal value shapes and their lexical patterns

use crate::error::{MarshalError, MarshalResult};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

/// `hh:mm:ss[.f+]`
pub static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(concat!(
		r"^(?P<hr>[0-9]{2}):(?P<min>[0-9]{2}):(?P<sec>[0-9]{2})",
		r"(?P<sec_frac>\.[0-9]+)?$",
	))
	.unwrap()
});

/// `[-]P[nY][nM][nD][T[nH][nM][n[.f]S]]`
pub static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(concat!(
		r"^(?P<sign>-?)P",
		r"(?:(?P<years>[0-9]+)Y)?",
		r"(?:(?P<months>[0-9]+)M)?",
		r"(?:(?P<days>[0-9]+)D)?",
		r"(?:T(?:(?P<hours>[0-9]+)H)?(?:(?P<minutes>[0-9]+)M)?(?:(?P<seconds>[0-9]+(?:\.[0-9]+)?)S)?)?$",
	))
	.unwrap()
});

/// Days per year and per month used by the duration grammar.
///
/// Calendar units are approximated; they are not calendar arithmetic.
pub const DAYS_PER_YEAR: i64 = 365;
pub const DAYS_PER_MONTH: i64 = 30;

/// A datetime that may or may not carry zone information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeValue {
	Naive(NaiveDateTime),
	Aware(DateTime<FixedOffset>),
}

impl DateTimeValue {
	pub fn is_aware(&self) -> bool {
		matches!(self, DateTimeValue::Aware(_))
	}

	/// Wall-clock reading of the value, ignoring any zone.
	pub fn naive_local(&self) -> NaiveDateTime {
		match self {
			DateTimeValue::Naive(dt) => *dt,
			DateTimeValue::Aware(dt) => dt.naive_local(),
		}
	}

	/// Converts an aware value into `zone` and drops the zone tag.
	///
	/// Naive values, and any value when `zone` is `None`, are returned as-is.
	///
	/// # Examples
	///
	/// ```
	/// use chrono::DateTime;
	/// use wirekit_model::DateTimeValue;
	///
	/// let utc = DateTime::parse_from_rfc3339("2024-06-01T12:00:00+00:00").unwrap();
	/// let local = DateTimeValue::Aware(utc).normalize_to(Some(&chrono_tz::Europe::Paris));
	///
	/// assert!(!local.is_aware());
	/// assert_eq!(local.naive_local().to_string(), "2024-06-01 14:00:00");
	/// ```
	pub fn normalize_to(self, zone: Option<&Tz>) -> Self {
		match (self, zone) {
			(DateTimeValue::Aware(dt), Some(zone)) => {
				DateTimeValue::Naive(dt.with_timezone(zone).naive_local())
			}
			(value, _) => value,
		}
	}
}

impl From<NaiveDateTime> for DateTimeValue {
	fn from(value: NaiveDateTime) -> Self {
		DateTimeValue::Naive(value)
	}
}

impl From<DateTime<FixedOffset>> for DateTimeValue {
	fn from(value: DateTime<FixedOffset>) -> Self {
		DateTimeValue::Aware(value)
	}
}

impl From<DateTime<Utc>> for DateTimeValue {
	fn from(value: DateTime<Utc>) -> Self {
		DateTimeValue::Aware(value.fixed_offset())
	}
}

/// Fallback datetime parser used when a type has no explicit `format`.
pub type DefaultParse = fn(&str) -> MarshalResult<DateTimeValue>;

const AWARE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const NAIVE_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M",
];

/// Parses ISO-8601 datetime text, with or without a zone designator.
///
/// # Examples
///
/// ```
/// use wirekit_model::{DateTimeValue, parse_iso_datetime};
///
/// assert!(parse_iso_datetime("2024-01-02T03:04:05Z").unwrap().is_aware());
/// assert!(!parse_iso_datetime("2024-01-02T03:04:05.25").unwrap().is_aware());
/// assert!(parse_iso_datetime("yesterday").is_err());
/// ```
pub fn parse_iso_datetime(string: &str) -> MarshalResult<DateTimeValue> {
	let s = string.trim();

	if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
		return Ok(DateTimeValue::Aware(dt));
	}
	for fmt in AWARE_FORMATS {
		if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
			return Ok(DateTimeValue::Aware(dt));
		}
	}
	for fmt in NAIVE_FORMATS {
		if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
			return Ok(DateTimeValue::Naive(dt));
		}
	}

	Err(MarshalError::validation(
		string,
		format!("{:?} is not a valid ISO-8601 datetime", string),
	))
}
