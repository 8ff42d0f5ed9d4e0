//! Decimal, double, integer and boolean converters

use crate::format::{FormatArg, float_repr, percent_format};
use crate::nillable::{nillable_from_string, nillable_string};
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;
use wirekit_model::{MarshalError, MarshalResult, ModelType};

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with digits on at least one side
/// of the point.
static DECIMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(concat!(
		r"^(?P<sign>[+-]?)(?P<int>[0-9]*)(?:\.(?P<frac>[0-9]*))?",
		r"(?:[eE](?P<exp>[+-]?[0-9]+))?$",
	))
	.unwrap()
});

/// Digit count any `i128` coefficient can hold.
const MAX_COEFFICIENT_DIGITS: usize = 38;

/// Rejects input longer than the type's `max_str_len`, before any parsing.
fn check_max_str_len(cls: &ModelType, string: &str) -> MarshalResult<()> {
	if let Some(max_str_len) = cls.attributes().max_str_len {
		if string.chars().count() > max_str_len {
			return Err(MarshalError::validation(
				string,
				format!("String longer than max_str_len={}", max_str_len),
			));
		}
	}
	Ok(())
}

fn render_decimal(cls: &ModelType, value: &Decimal) -> MarshalResult<String> {
	match &cls.attributes().format {
		Some(pattern) => percent_format(pattern, FormatArg::Decimal(*value)),
		None => Ok(value.to_string()),
	}
}

/// Builds `digits * 10^-scale` exactly, or `None` when the value does not
/// fit a 96-bit coefficient with at most 28 fractional digits.
fn exact_decimal(negative: bool, digits: &str, scale: i64) -> Option<Decimal> {
	let (mut digits, mut scale) = (digits.to_owned(), scale);
	if scale < 0 {
		let zeros = usize::try_from(scale.unsigned_abs()).ok()?;
		if digits.len() + zeros > MAX_COEFFICIENT_DIGITS {
			return None;
		}
		digits.push_str(&"0".repeat(zeros));
		scale = 0;
	}
	if digits.len() > MAX_COEFFICIENT_DIGITS {
		return None;
	}

	let coefficient: i128 = if digits.is_empty() { 0 } else { digits.parse().ok()? };
	let coefficient = if negative { -coefficient } else { coefficient };
	Decimal::try_from_i128_with_scale(coefficient, u32::try_from(scale).ok()?).ok()
}

/// Parses decimal lexical text without rounding: input the decimal type
/// cannot hold exactly is rejected.
fn parse_decimal(cls: &ModelType, string: &str) -> MarshalResult<Decimal> {
	check_max_str_len(cls, string)?;

	let trimmed = string.trim();
	let caps = DECIMAL_PATTERN
		.captures(trimmed)
		.filter(|caps| !caps["int"].is_empty() || caps.name("frac").is_some_and(|m| !m.is_empty()))
		.ok_or_else(|| {
			MarshalError::validation(string, format!("{:?} is not a decimal number", string))
		})?;
	let unrepresentable = || {
		MarshalError::validation(
			string,
			format!("{:?} cannot be held exactly by a 28-digit decimal", string),
		)
	};

	let fraction = caps.name("frac").map_or("", |m| m.as_str());
	let exponent: i64 = match caps.name("exp") {
		Some(m) => m.as_str().parse().map_err(|_| unrepresentable())?,
		None => 0,
	};
	let negative = &caps["sign"] == "-";

	let digits = format!("{}{}", &caps["int"], fraction);
	let digits = digits.trim_start_matches('0');
	let scale = i64::try_from(fraction.len())
		.ok()
		.and_then(|len| len.checked_sub(exponent))
		.ok_or_else(unrepresentable)?;

	// Trailing zeros carry no value; drop them only when the written scale does not fit.
	let significant = digits.trim_end_matches('0');
	let folded_scale = if significant.is_empty() {
		0
	} else {
		scale.saturating_sub(i64::try_from(digits.len() - significant.len()).unwrap_or(i64::MAX))
	};

	exact_decimal(negative, digits, scale)
		.or_else(|| exact_decimal(negative, significant, folded_scale))
		.ok_or_else(unrepresentable)
}

fn render_double(cls: &ModelType, value: &f64) -> MarshalResult<String> {
	match &cls.attributes().format {
		Some(pattern) => percent_format(pattern, FormatArg::Float(*value)),
		None => Ok(float_repr(*value)),
	}
}

fn parse_double(cls: &ModelType, string: &str) -> MarshalResult<f64> {
	check_max_str_len(cls, string)?;

	string
		.trim()
		.parse::<f64>()
		.map_err(|e| MarshalError::validation(string, format!("{:?}: {}", string, e)))
}

/// Renders a decimal, through `format` when one is configured.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use wirekit_model::{Attributes, ModelType};
/// use wirekit_protocol::decimal_to_string;
///
/// let plain = ModelType::new("decimal");
/// assert_eq!(decimal_to_string(&plain, Some(&Decimal::new(1250, 2))).unwrap(), "12.50");
///
/// let money = ModelType::new("decimal")
///     .with_attributes(Attributes::new().with_format("%.1f"));
/// assert_eq!(decimal_to_string(&money, Some(&Decimal::new(1250, 2))).unwrap(), "12.5");
/// ```
pub fn decimal_to_string(cls: &ModelType, value: Option<&Decimal>) -> MarshalResult<String> {
	nillable_string(render_decimal)(cls, value)
}

/// Parses decimal text, in plain or scientific notation.
///
/// Values are held with a 96-bit coefficient and at most 28 fractional
/// digits. Text outside that range is a validation failure, never rounded.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use wirekit_model::ModelType;
/// use wirekit_protocol::decimal_from_string;
///
/// let cls = ModelType::new("decimal");
/// assert_eq!(decimal_from_string(&cls, Some("12.5")).unwrap(), Some(Decimal::new(125, 1)));
/// assert!(decimal_from_string(&cls, Some("abc")).unwrap_err().is_validation());
/// assert!(decimal_from_string(&cls, Some("1e100")).unwrap_err().is_validation());
/// ```
pub fn decimal_from_string(cls: &ModelType, string: Option<&str>) -> MarshalResult<Option<Decimal>> {
	nillable_from_string(parse_decimal)(cls, string)
}

/// Renders a double as the shortest text that reads back to the same value,
/// with `INF`, `-INF` and `NaN` for the special values.
pub fn double_to_string(cls: &ModelType, value: Option<&f64>) -> MarshalResult<String> {
	nillable_string(render_double)(cls, value)
}

pub fn double_from_string(cls: &ModelType, string: Option<&str>) -> MarshalResult<Option<f64>> {
	nillable_from_string(parse_double)(cls, string)
}

/// Renders an integer of any width as decimal text.
pub fn integer_to_string<T>(cls: &ModelType, value: Option<&T>) -> MarshalResult<String>
where
	T: Display,
{
	nillable_string(|_: &ModelType, value: &T| Ok(value.to_string()))(cls, value)
}

/// Parses decimal integer text into `T`; out-of-range values are validation
/// failures.
///
/// # Examples
///
/// ```
/// use wirekit_model::{Attributes, ModelType};
/// use wirekit_protocol::integer_from_string;
///
/// let byte = ModelType::new("unsignedByte");
/// assert_eq!(integer_from_string::<u8>(&byte, Some("255")).unwrap(), Some(255));
/// assert!(integer_from_string::<u8>(&byte, Some("256")).is_err());
///
/// let short = ModelType::new("integer")
///     .with_attributes(Attributes::new().with_max_str_len(3));
/// let err = integer_from_string::<i64>(&short, Some("1234")).unwrap_err();
/// assert!(err.to_string().contains("max_str_len=3"));
/// ```
pub fn integer_from_string<T>(cls: &ModelType, string: Option<&str>) -> MarshalResult<Option<T>>
where
	T: FromStr,
	T::Err: Display,
{
	nillable_from_string(|cls: &ModelType, string: &str| {
		check_max_str_len(cls, string)?;
		string
			.trim()
			.parse::<T>()
			.map_err(|e| MarshalError::validation(string, format!("{:?}: {}", string, e)))
	})(cls, string)
}

pub fn boolean_to_string(cls: &ModelType, value: Option<&bool>) -> MarshalResult<String> {
	nillable_string(|_: &ModelType, value: &bool| Ok(value.to_string()))(cls, value)
}

/// `"true"` and `"1"` (any case) read as true; any other text reads as false.
pub fn boolean_from_string(cls: &ModelType, string: Option<&str>) -> MarshalResult<Option<bool>> {
	nillable_from_string(|_: &ModelType, string: &str| {
		Ok(matches!(string.to_lowercase().as_str(), "true" | "1"))
	})(cls, string)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use wirekit_model::Attributes;

	fn typed(name: &str, attributes: Attributes) -> ModelType {
		ModelType::new(name).with_attributes(attributes)
	}

	#[rstest]
	#[case("12.5", Decimal::new(125, 1))]
	#[case(" -0.001 ", Decimal::new(-1, 3))]
	#[case("1.5E+3", Decimal::new(1500, 0))]
	#[case("2e-2", Decimal::new(2, 2))]
	#[case(".5", Decimal::new(5, 1))]
	#[case("7.", Decimal::new(7, 0))]
	#[case("+0.10", Decimal::new(10, 2))]
	#[case("0.1000000000000000000000000000000", Decimal::new(1, 1))]
	#[case("0e100", Decimal::ZERO)]
	#[case("79228162514264337593543950335", Decimal::MAX)]
	fn test_decimal_from_string(#[case] input: &str, #[case] expected: Decimal) {
		let cls = ModelType::new("decimal");
		assert_eq!(decimal_from_string(&cls, Some(input)).unwrap(), Some(expected));
	}

	#[rstest]
	#[case("abc")]
	#[case("")]
	#[case("1.2.3")]
	#[case(".")]
	#[case("1_000")]
	#[case("1e")]
	#[case("0.12345678901234567890123456789012")]
	#[case("123456789012345678901234567890")]
	#[case("1e100")]
	#[case("1e-40")]
	fn test_decimal_from_string_rejects(#[case] input: &str) {
		// Arrange
		let cls = ModelType::new("decimal");

		// Act
		let err = decimal_from_string(&cls, Some(input)).unwrap_err();

		// Assert
		assert_eq!(err.as_validation().unwrap().input, input);
	}

	#[rstest]
	fn test_decimal_keeps_every_written_digit() {
		let cls = ModelType::new("decimal");
		let text = "0.1234567890123456789012345678";

		let value = decimal_from_string(&cls, Some(text)).unwrap().unwrap();

		assert_eq!(decimal_to_string(&cls, Some(&value)).unwrap(), text);
	}

	#[rstest]
	fn test_max_str_len_checked_before_parse() {
		let cls = typed("decimal", Attributes::new().with_max_str_len(4));

		let err = decimal_from_string(&cls, Some("12345")).unwrap_err();
		assert!(err.to_string().contains("max_str_len=4"));
		assert!(decimal_from_string(&cls, Some("1234")).is_ok());
		assert!(double_from_string(&cls, Some("1.2345")).unwrap_err().is_validation());
	}

	#[rstest]
	#[case(1.0, "1.0")]
	#[case(-0.5, "-0.5")]
	#[case(f64::INFINITY, "INF")]
	#[case(f64::NEG_INFINITY, "-INF")]
	fn test_double_to_string(#[case] value: f64, #[case] expected: &str) {
		let cls = ModelType::new("double");
		assert_eq!(double_to_string(&cls, Some(&value)).unwrap(), expected);
	}

	#[rstest]
	fn test_double_with_format() {
		let cls = typed("double", Attributes::new().with_format("%.3e"));
		assert_eq!(double_to_string(&cls, Some(&1234.56)).unwrap(), "1.235e+03");
	}

	#[rstest]
	#[case("INF", f64::INFINITY)]
	#[case("-INF", f64::NEG_INFINITY)]
	#[case("1e3", 1000.0)]
	#[case(" 0.25", 0.25)]
	fn test_double_from_string(#[case] input: &str, #[case] expected: f64) {
		let cls = ModelType::new("double");
		assert_eq!(double_from_string(&cls, Some(input)).unwrap(), Some(expected));
	}

	#[rstest]
	fn test_double_nan_reads_back() {
		let cls = ModelType::new("double");
		assert!(double_from_string(&cls, Some("NaN")).unwrap().unwrap().is_nan());
		assert!(double_from_string(&cls, Some("one")).unwrap_err().is_validation());
	}

	#[rstest]
	fn test_integer_widths() {
		let cls = ModelType::new("integer");

		assert_eq!(integer_to_string(&cls, Some(&-42i64)).unwrap(), "-42");
		assert_eq!(integer_to_string(&cls, Some(&u128::MAX)).unwrap(), u128::MAX.to_string());
		assert_eq!(integer_from_string::<i16>(&cls, Some("+7")).unwrap(), Some(7));
		assert!(integer_from_string::<i32>(&cls, Some("1.5")).unwrap_err().is_validation());
	}

	#[rstest]
	fn test_integer_max_str_len_applies_to_valid_numbers() {
		let cls = typed("integer", Attributes::new().with_max_str_len(2));
		let err = integer_from_string::<i64>(&cls, Some("123")).unwrap_err();
		assert_eq!(err.as_validation().unwrap().input, "123");
	}

	#[rstest]
	#[case("true", true)]
	#[case("TRUE", true)]
	#[case("1", true)]
	#[case("false", false)]
	#[case("no", false)]
	#[case("", false)]
	fn test_boolean_from_string(#[case] input: &str, #[case] expected: bool) {
		let cls = ModelType::new("boolean");
		assert_eq!(boolean_from_string(&cls, Some(input)).unwrap(), Some(expected));
	}

	#[rstest]
	fn test_boolean_to_string() {
		let cls = ModelType::new("boolean");
		assert_eq!(boolean_to_string(&cls, Some(&true)).unwrap(), "true");
		assert_eq!(boolean_to_string(&cls, Some(&false)).unwrap(), "false");
		assert_eq!(boolean_to_string(&cls, None).unwrap(), "");
	}
}
