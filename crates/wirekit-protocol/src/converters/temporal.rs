//! Time, datetime, date and duration converters

use crate::format::{FormatArg, percent_format};
use crate::nillable::{nillable_from_string, nillable_string};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use std::fmt::{self, Write};
use wirekit_model::{
	DAYS_PER_MONTH, DAYS_PER_YEAR, DURATION_PATTERN, DateTimeValue, MarshalError, MarshalResult,
	ModelType, TIME_PATTERN,
};

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
const MICROS_PER_SECOND: u32 = 1_000_000;

/// Renders a chrono delayed format, turning a bad pattern into a
/// configuration error instead of a panic.
fn render_pattern(delayed: impl fmt::Display, pattern: &str) -> MarshalResult<String> {
	let mut out = String::new();
	write!(out, "{}", delayed).map_err(|_| {
		MarshalError::configuration(format!("Invalid or inapplicable strftime pattern {:?}", pattern))
	})?;
	Ok(out)
}

/// `HH:MM:SS`, plus `.ffffff` when the microseconds are non-zero.
fn iso_time(value: &NaiveTime) -> String {
	let micros = (value.nanosecond() / 1_000) % MICROS_PER_SECOND;
	let mut out = format!("{:02}:{:02}:{:02}", value.hour(), value.minute(), value.second());
	if micros != 0 {
		let _ = write!(out, ".{:06}", micros);
	}
	out
}

fn iso_datetime(value: &DateTimeValue) -> String {
	let naive = value.naive_local();
	let mut out = format!("{}T{}", naive.date().format(DEFAULT_DATE_FORMAT), iso_time(&naive.time()));
	if let DateTimeValue::Aware(dt) = value {
		let _ = write!(out, "{}", dt.offset());
	}
	out
}

/// Digits after the decimal point as microseconds, truncated past six places.
fn fraction_to_micros(string: &str, digits: &str) -> MarshalResult<u32> {
	digits
		.chars()
		.chain(std::iter::repeat('0'))
		.take(6)
		.try_fold(0, |acc, ch| match ch {
			'0'..='9' => Ok(acc * 10 + u32::from(ch) - u32::from('0')),
			_ => Err(MarshalError::validation(
				string,
				format!("{:?}: {:?} is not an ASCII digit", string, ch),
			)),
		})
}

fn render_time(_cls: &ModelType, value: &NaiveTime) -> MarshalResult<String> {
	Ok(iso_time(value))
}

fn parse_time(_cls: &ModelType, string: &str) -> MarshalResult<NaiveTime> {
	let caps = TIME_PATTERN.captures(string).ok_or_else(|| {
		MarshalError::validation(
			string,
			format!("{:?} does not match regex {:?}", string, TIME_PATTERN.as_str()),
		)
	})?;

	let field = |name: &str| -> MarshalResult<u32> {
		caps[name]
			.parse()
			.map_err(|e| MarshalError::validation(string, format!("{:?}: {}", string, e)))
	};
	let micros = match caps.name("sec_frac") {
		Some(m) => fraction_to_micros(string, &m.as_str()[1..])?,
		None => 0,
	};

	NaiveTime::from_hms_micro_opt(field("hr")?, field("min")?, field("sec")?, micros).ok_or_else(
		|| MarshalError::validation(string, format!("{:?} is not a valid time of day", string)),
	)
}

fn render_datetime(cls: &ModelType, value: &DateTimeValue) -> MarshalResult<String> {
	let attrs = cls.attributes();
	let value = value.normalize_to(attrs.as_time_zone.as_ref());

	let rendered = match (&attrs.format, &value) {
		(None, _) => iso_datetime(&value),
		(Some(pattern), DateTimeValue::Naive(dt)) => render_pattern(dt.format(pattern), pattern)?,
		(Some(pattern), DateTimeValue::Aware(dt)) => render_pattern(dt.format(pattern), pattern)?,
	};

	match &attrs.string_format {
		Some(pattern) => percent_format(pattern, FormatArg::Str(&rendered)),
		None => Ok(rendered),
	}
}

/// strptime-style parse: aware when the pattern carries an offset, naive
/// otherwise, midnight when it carries no time of day.
fn parse_with_pattern(string: &str, pattern: &str) -> MarshalResult<DateTimeValue> {
	if let Ok(dt) = DateTime::parse_from_str(string, pattern) {
		return Ok(DateTimeValue::Aware(dt));
	}
	match NaiveDateTime::parse_from_str(string, pattern) {
		Ok(dt) => Ok(DateTimeValue::Naive(dt)),
		Err(err) => NaiveDate::parse_from_str(string, pattern)
			.map(|date| DateTimeValue::Naive(date.and_time(NaiveTime::MIN)))
			.map_err(|_| {
				MarshalError::validation(
					string,
					format!("{:?} does not match format {:?}: {}", string, pattern, err),
				)
			}),
	}
}

fn parse_datetime(cls: &ModelType, string: &str) -> MarshalResult<DateTimeValue> {
	let attrs = cls.attributes();
	let value = match &attrs.format {
		Some(pattern) => parse_with_pattern(string, pattern)?,
		None => (attrs.default_parse)(string)?,
	};
	Ok(value.normalize_to(attrs.as_time_zone.as_ref()))
}

fn render_date(cls: &ModelType, value: &NaiveDate) -> MarshalResult<String> {
	let pattern = cls.attributes().format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
	render_pattern(value.and_time(NaiveTime::MIN).format(pattern), pattern)
}

fn parse_date(cls: &ModelType, string: &str) -> MarshalResult<NaiveDate> {
	let pattern = cls.attributes().format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
	match NaiveDate::parse_from_str(string, pattern) {
		Ok(date) => Ok(date),
		Err(err) => NaiveDateTime::parse_from_str(string, pattern)
			.map(|dt| dt.date())
			.map_err(|_| {
				MarshalError::validation(
					string,
					format!("{:?} does not match format {:?}: {}", string, pattern, err),
				)
			}),
	}
}

fn render_duration(_cls: &ModelType, value: &TimeDelta) -> MarshalResult<String> {
	let negative = *value < TimeDelta::zero();
	let magnitude = value.abs();

	let total_seconds = magnitude.num_seconds();
	let micros = magnitude.subsec_nanos().unsigned_abs() / 1_000;
	let days = total_seconds / 86_400;
	let hours = total_seconds % 86_400 / 3_600;
	let minutes = total_seconds % 3_600 / 60;
	let seconds = total_seconds % 60;

	let mut out = String::from(if negative { "-P" } else { "P" });
	if days > 0 {
		let _ = write!(out, "{}D", days);
	}
	if hours > 0 || minutes > 0 || seconds > 0 || micros > 0 {
		out.push('T');
		if hours > 0 {
			let _ = write!(out, "{}H", hours);
		}
		if minutes > 0 {
			let _ = write!(out, "{}M", minutes);
		}
		if seconds > 0 || micros > 0 {
			if micros > 0 {
				let fraction = format!("{:06}", micros);
				let _ = write!(out, "{}.{}S", seconds, fraction.trim_end_matches('0'));
			} else {
				let _ = write!(out, "{}S", seconds);
			}
		}
	} else if days == 0 {
		out.push_str("T0S");
	}
	Ok(out)
}

fn parse_duration(_cls: &ModelType, string: &str) -> MarshalResult<TimeDelta> {
	let caps = DURATION_PATTERN.captures(string).ok_or_else(|| {
		MarshalError::validation(
			string,
			format!("{:?} does not match regex {:?}", string, DURATION_PATTERN.as_str()),
		)
	})?;
	let out_of_range =
		|| MarshalError::validation(string, format!("{:?} is out of the duration range", string));

	let number = |name: &str| -> MarshalResult<i64> {
		match caps.name(name) {
			Some(m) => m.as_str().parse().map_err(|_| out_of_range()),
			None => Ok(0),
		}
	};

	let (days, months, years) = (number("days")?, number("months")?, number("years")?);
	let days = months
		.checked_mul(DAYS_PER_MONTH)
		.zip(years.checked_mul(DAYS_PER_YEAR))
		.and_then(|(months, years)| days.checked_add(months)?.checked_add(years))
		.ok_or_else(out_of_range)?;

	let (whole_seconds, micros) = match caps.name("seconds") {
		Some(m) => {
			let (whole, fraction) = m.as_str().split_once('.').unwrap_or((m.as_str(), ""));
			let whole: i64 = whole.parse().map_err(|_| out_of_range())?;
			(whole, fraction_to_micros(string, fraction)?)
		}
		None => (0, 0),
	};

	let parts = [
		TimeDelta::try_days(days),
		TimeDelta::try_hours(number("hours")?),
		TimeDelta::try_minutes(number("minutes")?),
		TimeDelta::try_seconds(whole_seconds),
		Some(TimeDelta::microseconds(i64::from(micros))),
	];
	let mut delta = TimeDelta::zero();
	for part in parts {
		delta = part
			.and_then(|part| delta.checked_add(&part))
			.ok_or_else(out_of_range)?;
	}

	Ok(if &caps["sign"] == "-" { -delta } else { delta })
}

/// Renders a time of day as `HH:MM:SS[.ffffff]`.
pub fn time_to_string(cls: &ModelType, value: Option<&NaiveTime>) -> MarshalResult<String> {
	nillable_string(render_time)(cls, value)
}

/// Parses `hh:mm:ss[.f+]`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use wirekit_model::ModelType;
/// use wirekit_protocol::time_from_string;
///
/// let cls = ModelType::new("time");
/// assert_eq!(
///     time_from_string(&cls, Some("10:20:30.5")).unwrap(),
///     NaiveTime::from_hms_micro_opt(10, 20, 30, 500_000)
/// );
/// assert!(time_from_string(&cls, Some("10:20")).unwrap_err().is_validation());
/// ```
pub fn time_from_string(cls: &ModelType, string: Option<&str>) -> MarshalResult<Option<NaiveTime>> {
	nillable_from_string(parse_time)(cls, string)
}

/// Renders a datetime.
///
/// Aware values are first moved into `as_time_zone` (when configured) and
/// made naive. The result is rendered through `format`, or as ISO-8601 text,
/// and finally wrapped in `string_format`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use wirekit_model::{Attributes, DateTimeValue, ModelType};
/// use wirekit_protocol::datetime_to_string;
///
/// let value = DateTimeValue::from(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
///
/// let iso = ModelType::new("dateTime");
/// assert_eq!(datetime_to_string(&iso, Some(&value)).unwrap(), "2024-01-02T03:04:05+00:00");
///
/// let tokyo = ModelType::new("dateTime").with_attributes(
///     Attributes::new()
///         .with_time_zone(chrono_tz::Asia::Tokyo)
///         .with_format("%Y/%m/%d %H:%M")
///         .with_string_format("[%s]"),
/// );
/// assert_eq!(datetime_to_string(&tokyo, Some(&value)).unwrap(), "[2024/01/02 12:04]");
/// ```
pub fn datetime_to_string(cls: &ModelType, value: Option<&DateTimeValue>) -> MarshalResult<String> {
	nillable_string(render_datetime)(cls, value)
}

/// Parses a datetime through `format`, or the type's `default_parse` when no
/// format is configured, then applies the same zone normalization as
/// [`datetime_to_string`].
pub fn datetime_from_string(
	cls: &ModelType,
	string: Option<&str>,
) -> MarshalResult<Option<DateTimeValue>> {
	nillable_from_string(parse_datetime)(cls, string)
}

pub fn date_to_string(cls: &ModelType, value: Option<&NaiveDate>) -> MarshalResult<String> {
	nillable_string(render_date)(cls, value)
}

/// Parses a calendar date, discarding any time of day the pattern reads.
pub fn date_from_string(cls: &ModelType, string: Option<&str>) -> MarshalResult<Option<NaiveDate>> {
	nillable_from_string(parse_date)(cls, string)
}

/// Renders a duration as `[-]P[nD][T[nH][nM][n[.f]S]]`.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use wirekit_model::ModelType;
/// use wirekit_protocol::duration_to_string;
///
/// let cls = ModelType::new("duration");
/// let value = TimeDelta::days(1) + TimeDelta::hours(2) + TimeDelta::seconds(30);
///
/// assert_eq!(duration_to_string(&cls, Some(&value)).unwrap(), "P1DT2H30S");
/// assert_eq!(duration_to_string(&cls, Some(&-value)).unwrap(), "-P1DT2H30S");
/// assert_eq!(duration_to_string(&cls, Some(&TimeDelta::zero())).unwrap(), "PT0S");
/// ```
pub fn duration_to_string(cls: &ModelType, value: Option<&TimeDelta>) -> MarshalResult<String> {
	nillable_string(render_duration)(cls, value)
}

/// Parses `[-]P[nY][nM][nD][T[nH][nM][n[.f]S]]`, counting a year as 365 days
/// and a month as 30.
pub fn duration_from_string(
	cls: &ModelType,
	string: Option<&str>,
) -> MarshalResult<Option<TimeDelta>> {
	nillable_from_string(parse_duration)(cls, string)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{FixedOffset, TimeZone};
	use rstest::rstest;
	use wirekit_model::Attributes;

	fn typed(name: &str, attributes: Attributes) -> ModelType {
		ModelType::new(name).with_attributes(attributes)
	}

	fn hms_micro(h: u32, m: u32, s: u32, us: u32) -> NaiveTime {
		NaiveTime::from_hms_micro_opt(h, m, s, us).unwrap()
	}

	#[rstest]
	#[case("00:00:00", hms_micro(0, 0, 0, 0))]
	#[case("23:59:59.000", hms_micro(23, 59, 59, 0))]
	#[case("12:30:15.25", hms_micro(12, 30, 15, 250_000))]
	#[case("12:30:15.123456789", hms_micro(12, 30, 15, 123_456))]
	fn test_time_from_string(#[case] input: &str, #[case] expected: NaiveTime) {
		let cls = ModelType::new("time");
		assert_eq!(time_from_string(&cls, Some(input)).unwrap(), Some(expected));
	}

	#[rstest]
	#[case("1:02:03")]
	#[case("12:30:15Z")]
	#[case("24:00:00")]
	#[case("12:61:00")]
	#[case("")]
	#[case("12:30:45.\u{0665}")]
	#[case("\u{0661}2:30:45")]
	fn test_time_from_string_rejects(#[case] input: &str) {
		let cls = ModelType::new("time");
		let err = time_from_string(&cls, Some(input)).unwrap_err();
		assert_eq!(err.as_validation().unwrap().input, input);
	}

	#[rstest]
	#[case(hms_micro(8, 5, 3, 0), "08:05:03")]
	#[case(hms_micro(8, 5, 3, 120), "08:05:03.000120")]
	fn test_time_to_string(#[case] value: NaiveTime, #[case] expected: &str) {
		let cls = ModelType::new("time");
		assert_eq!(time_to_string(&cls, Some(&value)).unwrap(), expected);
	}

	#[rstest]
	fn test_datetime_naive_iso() {
		// Arrange
		let cls = ModelType::new("dateTime");
		let value = DateTimeValue::Naive(
			NaiveDate::from_ymd_opt(2024, 2, 29)
				.unwrap()
				.and_hms_micro_opt(23, 0, 1, 500)
				.unwrap(),
		);

		// Act
		let text = datetime_to_string(&cls, Some(&value)).unwrap();
		let back = datetime_from_string(&cls, Some(&text)).unwrap();

		// Assert
		assert_eq!(text, "2024-02-29T23:00:01.000500");
		assert_eq!(back, Some(value));
	}

	#[rstest]
	fn test_datetime_aware_keeps_offset_without_target_zone() {
		let cls = ModelType::new("dateTime");
		let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
		let value = DateTimeValue::Aware(offset.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());

		let text = datetime_to_string(&cls, Some(&value)).unwrap();

		assert_eq!(text, "2024-06-01T09:00:00+05:30");
		assert_eq!(datetime_from_string(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[rstest]
	fn test_datetime_from_string_normalizes_zone() {
		// Arrange
		let cls = typed(
			"dateTime",
			Attributes::new().with_time_zone(chrono_tz::America::New_York),
		);

		// Act
		let parsed = datetime_from_string(&cls, Some("2024-01-15T17:00:00Z"))
			.unwrap()
			.unwrap();

		// Assert
		assert!(!parsed.is_aware());
		assert_eq!(parsed.naive_local().to_string(), "2024-01-15 12:00:00");
		assert_eq!(
			datetime_to_string(&cls, Some(&parsed)).unwrap(),
			"2024-01-15T12:00:00"
		);
	}

	#[rstest]
	#[case("%d/%m/%Y %H:%M", "05/03/2024 14:30", "2024-03-05T14:30:00")]
	#[case("%d/%m/%Y", "05/03/2024", "2024-03-05T00:00:00")]
	#[case("%Y-%m-%d %H:%M %z", "2024-03-05 14:30 +0100", "2024-03-05T14:30:00+01:00")]
	fn test_datetime_with_format(#[case] pattern: &str, #[case] input: &str, #[case] iso: &str) {
		let parse_cls = typed("dateTime", Attributes::new().with_format(pattern));
		let iso_cls = ModelType::new("dateTime");

		let parsed = datetime_from_string(&parse_cls, Some(input)).unwrap();

		assert_eq!(datetime_to_string(&iso_cls, parsed.as_ref()).unwrap(), iso);
	}

	#[rstest]
	fn test_datetime_format_mismatch_is_validation_error() {
		let cls = typed("dateTime", Attributes::new().with_format("%d/%m/%Y"));
		assert!(datetime_from_string(&cls, Some("2024-03-05")).unwrap_err().is_validation());
	}

	#[rstest]
	fn test_datetime_offset_pattern_on_naive_value_is_configuration_error() {
		let cls = typed("dateTime", Attributes::new().with_format("%H:%M %z"));
		let value = DateTimeValue::Naive(NaiveDateTime::default());

		let err = datetime_to_string(&cls, Some(&value)).unwrap_err();
		assert!(matches!(err, MarshalError::Configuration(_)));
	}

	#[rstest]
	fn test_datetime_custom_default_parse() {
		fn epoch_seconds(string: &str) -> MarshalResult<DateTimeValue> {
			let seconds: i64 = string
				.parse()
				.map_err(|_| MarshalError::validation(string, "not an epoch"))?;
			DateTime::from_timestamp(seconds, 0)
				.map(DateTimeValue::from)
				.ok_or_else(|| MarshalError::validation(string, "out of range"))
		}
		let cls = typed("dateTime", Attributes::new().with_default_parse(epoch_seconds));

		let parsed = datetime_from_string(&cls, Some("86400")).unwrap().unwrap();

		assert_eq!(parsed.naive_local().to_string(), "1970-01-02 00:00:00");
	}

	#[rstest]
	#[case(None, "2024-07-04", "2024-07-04")]
	#[case(Some("%d.%m.%Y"), "04.07.2024", "04.07.2024")]
	#[case(Some("%Y-%m-%d %H:%M"), "2024-07-04 18:45", "2024-07-04 00:00")]
	fn test_date_round_trip(#[case] pattern: Option<&str>, #[case] input: &str, #[case] rendered: &str) {
		let mut attributes = Attributes::new();
		attributes.format = pattern.map(str::to_string);
		let cls = typed("date", attributes);

		let date = date_from_string(&cls, Some(input)).unwrap();

		assert_eq!(date, NaiveDate::from_ymd_opt(2024, 7, 4));
		assert_eq!(date_to_string(&cls, date.as_ref()).unwrap(), rendered);
	}

	#[rstest]
	#[case("2023-02-29")]
	#[case("2024/07/04")]
	#[case("")]
	fn test_date_from_string_rejects(#[case] input: &str) {
		let cls = ModelType::new("date");
		assert!(date_from_string(&cls, Some(input)).unwrap_err().is_validation());
	}

	#[rstest]
	#[case(TimeDelta::zero(), "PT0S")]
	#[case(TimeDelta::days(3), "P3D")]
	#[case(TimeDelta::hours(1) + TimeDelta::seconds(30), "PT1H30S")]
	#[case(TimeDelta::minutes(90), "PT1H30M")]
	#[case(TimeDelta::milliseconds(1500), "PT1.5S")]
	#[case(TimeDelta::microseconds(1), "PT0.000001S")]
	#[case(TimeDelta::days(-2) - TimeDelta::hours(5), "-P2DT5H")]
	fn test_duration_to_string(#[case] value: TimeDelta, #[case] expected: &str) {
		let cls = ModelType::new("duration");
		assert_eq!(duration_to_string(&cls, Some(&value)).unwrap(), expected);
	}

	#[rstest]
	#[case("P1Y", TimeDelta::days(365))]
	#[case("P2M", TimeDelta::days(60))]
	#[case("P1Y1M1D", TimeDelta::days(396))]
	#[case("PT36H", TimeDelta::hours(36))]
	#[case("PT0.25S", TimeDelta::milliseconds(250))]
	#[case("-P1DT1S", -(TimeDelta::days(1) + TimeDelta::seconds(1)))]
	#[case("P", TimeDelta::zero())]
	fn test_duration_from_string(#[case] input: &str, #[case] expected: TimeDelta) {
		let cls = ModelType::new("duration");
		assert_eq!(duration_from_string(&cls, Some(input)).unwrap(), Some(expected));
	}

	#[rstest]
	#[case("1D")]
	#[case("P1H")]
	#[case("PT1D")]
	#[case("P1D garbage")]
	#[case("P99999999999999999999D")]
	#[case("PT1.\u{0665}S")]
	#[case("P\u{0661}D")]
	fn test_duration_from_string_rejects(#[case] input: &str) {
		let cls = ModelType::new("duration");
		let err = duration_from_string(&cls, Some(input)).unwrap_err();
		assert_eq!(err.as_validation().unwrap().input, input);
	}

	#[rstest]
	fn test_temporal_nils() {
		let cls = typed("any", Attributes::new().with_nil_string("nil"));

		assert_eq!(time_to_string(&cls, None).unwrap(), "nil");
		assert_eq!(datetime_to_string(&cls, None).unwrap(), "nil");
		assert_eq!(date_to_string(&cls, None).unwrap(), "nil");
		assert_eq!(duration_to_string(&cls, None).unwrap(), "nil");
		assert_eq!(time_from_string(&cls, None).unwrap(), None);
		assert_eq!(datetime_from_string(&cls, None).unwrap(), None);
		assert_eq!(date_from_string(&cls, None).unwrap(), None);
		assert_eq!(duration_from_string(&cls, None).unwrap(), None);
	}
}
