//! Round-trip properties of the primitive converters
//!
//! For every in-domain value `v`, `from_string(to_string(v)) == v`.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use proptest::prelude::*;
use rust_decimal::Decimal;
use wirekit_model::{Attributes, DateTimeValue, ModelType};
use wirekit_protocol::{
	boolean_from_string, boolean_to_string, date_from_string, date_to_string,
	datetime_from_string, datetime_to_string, decimal_from_string, decimal_to_string,
	double_from_string, double_to_string, duration_from_string, duration_to_string,
	integer_from_string, integer_to_string, time_from_string, time_to_string,
};

fn decimals() -> impl Strategy<Value = Decimal> {
	(any::<i64>(), 0u32..=12).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn times() -> impl Strategy<Value = NaiveTime> {
	(0u32..24, 0u32..60, 0u32..60, 0u32..1_000_000).prop_map(|(h, m, s, us)| {
		NaiveTime::from_hms_micro_opt(h, m, s, us).expect("components are in range")
	})
}

fn dates() -> impl Strategy<Value = NaiveDate> {
	(1i32..=9999, 1u32..=12, 1u32..=28)
		.prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("components are in range"))
}

fn durations() -> impl Strategy<Value = TimeDelta> {
	(0i64..1_000_000, 0i64..24, 0i64..60, 0i64..60, 0i64..1_000_000).prop_map(
		|(days, hours, minutes, seconds, micros)| {
			TimeDelta::days(days)
				+ TimeDelta::hours(hours)
				+ TimeDelta::minutes(minutes)
				+ TimeDelta::seconds(seconds)
				+ TimeDelta::microseconds(micros)
		},
	)
}

// ============================================================================
// Property-Based Tests: string form round trips
// ============================================================================

proptest! {
	#[test]
	fn prop_decimal_round_trips(value in decimals()) {
		let cls = ModelType::new("decimal");
		let text = decimal_to_string(&cls, Some(&value)).unwrap();
		prop_assert_eq!(decimal_from_string(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[test]
	fn prop_double_round_trips(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
		let cls = ModelType::new("double");
		let text = double_to_string(&cls, Some(&value)).unwrap();
		prop_assert_eq!(double_from_string(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[test]
	fn prop_signed_integer_round_trips(value in any::<i64>()) {
		let cls = ModelType::new("long");
		let text = integer_to_string(&cls, Some(&value)).unwrap();
		prop_assert_eq!(integer_from_string::<i64>(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[test]
	fn prop_unsigned_integer_round_trips(value in any::<u128>()) {
		let cls = ModelType::new("unsignedLong");
		let text = integer_to_string(&cls, Some(&value)).unwrap();
		prop_assert_eq!(integer_from_string::<u128>(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[test]
	fn prop_boolean_round_trips(value in any::<bool>()) {
		let cls = ModelType::new("boolean");
		let text = boolean_to_string(&cls, Some(&value)).unwrap();
		prop_assert_eq!(boolean_from_string(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[test]
	fn prop_time_round_trips(value in times()) {
		let cls = ModelType::new("time");
		let text = time_to_string(&cls, Some(&value)).unwrap();
		prop_assert_eq!(time_from_string(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[test]
	fn prop_date_round_trips(value in dates()) {
		let cls = ModelType::new("date");
		let text = date_to_string(&cls, Some(&value)).unwrap();
		prop_assert_eq!(date_from_string(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[test]
	fn prop_naive_datetime_round_trips(date in dates(), time in times()) {
		let cls = ModelType::new("dateTime");
		let value = DateTimeValue::Naive(date.and_time(time));
		let text = datetime_to_string(&cls, Some(&value)).unwrap();
		prop_assert_eq!(datetime_from_string(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[test]
	fn prop_duration_round_trips(value in durations()) {
		let cls = ModelType::new("duration");
		let text = duration_to_string(&cls, Some(&value)).unwrap();
		prop_assert!(text.starts_with('P'));
		prop_assert_eq!(duration_from_string(&cls, Some(&text)).unwrap(), Some(value));
	}

	#[test]
	fn prop_negative_duration_round_trips(value in durations()) {
		let cls = ModelType::new("duration");
		let negative = -value;
		let text = duration_to_string(&cls, Some(&negative)).unwrap();
		prop_assert_eq!(duration_from_string(&cls, Some(&text)).unwrap(), Some(negative));
	}
}

// ============================================================================
// Property-Based Tests: length bound
// ============================================================================

proptest! {
	#[test]
	fn prop_max_str_len_rejects_any_longer_integer(value in 1_000i64..i64::MAX) {
		let cls = ModelType::new("integer")
			.with_attributes(Attributes::new().with_max_str_len(3));
		let err = integer_from_string::<i64>(&cls, Some(&value.to_string())).unwrap_err();
		prop_assert!(err.is_validation());
		prop_assert!(err.to_string().contains("max_str_len=3"));
	}
}
