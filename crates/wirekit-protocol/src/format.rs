//! printf-style pattern substitution for `format` and `string_format`
//!
//! A pattern holds exactly one conversion, e.g. `"%.2f"`, `"<%s>"` or
//! `"%08d"`. Supported conversions are `s r d i u f F e E g G x X o` with the
//! flags `- + 0 #` and space, an optional width and an optional precision.
//! `%%` produces a literal percent sign.

use rust_decimal::{Decimal, RoundingStrategy};
use wirekit_model::{MarshalError, MarshalResult};

/// The single value substituted into a pattern.
#[derive(Debug, Clone, Copy)]
pub enum FormatArg<'a> {
	Str(&'a str),
	Int(i128),
	Float(f64),
	Decimal(Decimal),
}

#[derive(Debug, Default)]
struct Directive {
	left: bool,
	zero: bool,
	plus: bool,
	space: bool,
	alternate: bool,
	width: usize,
	precision: Option<usize>,
	conversion: char,
}

/// Substitutes `arg` into `pattern`.
///
/// A pattern with no conversion, more than one conversion, or a conversion
/// that cannot take `arg` is a configuration error of the declaring type.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use wirekit_protocol::format::{FormatArg, percent_format};
///
/// assert_eq!(percent_format("%.2f", FormatArg::Float(3.14159)).unwrap(), "3.14");
/// assert_eq!(percent_format("%05d", FormatArg::Int(-42)).unwrap(), "-0042");
/// assert_eq!(percent_format("[%s]", FormatArg::Str("x")).unwrap(), "[x]");
/// assert_eq!(
///     percent_format("%.1f%%", FormatArg::Decimal(Decimal::new(125, 1))).unwrap(),
///     "12.5%"
/// );
/// assert!(percent_format("no conversion", FormatArg::Int(1)).is_err());
/// ```
pub fn percent_format(pattern: &str, arg: FormatArg<'_>) -> MarshalResult<String> {
	let mut out = String::with_capacity(pattern.len() + 16);
	let mut chars = pattern.chars().peekable();
	let mut consumed = false;

	while let Some(ch) = chars.next() {
		if ch != '%' {
			out.push(ch);
			continue;
		}
		if chars.peek() == Some(&'%') {
			chars.next();
			out.push('%');
			continue;
		}

		let mut directive = Directive::default();
		while let Some(&flag) = chars.peek() {
			match flag {
				'-' => directive.left = true,
				'0' => directive.zero = true,
				'+' => directive.plus = true,
				' ' => directive.space = true,
				'#' => directive.alternate = true,
				_ => break,
			}
			chars.next();
		}
		directive.width = read_number(&mut chars).unwrap_or(0);
		if chars.peek() == Some(&'.') {
			chars.next();
			directive.precision = Some(read_number(&mut chars).unwrap_or(0));
		}
		directive.conversion = chars.next().ok_or_else(|| {
			MarshalError::configuration(format!("Incomplete format in pattern {:?}", pattern))
		})?;

		if consumed {
			return Err(MarshalError::configuration(format!(
				"Not enough arguments for pattern {:?}",
				pattern
			)));
		}
		consumed = true;
		out.push_str(&convert(&directive, arg, pattern)?);
	}

	if !consumed {
		return Err(MarshalError::configuration(format!(
			"Not all arguments converted by pattern {:?}",
			pattern
		)));
	}
	Ok(out)
}

fn read_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
	let mut value: Option<usize> = None;
	while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
		value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
		chars.next();
	}
	value
}

fn convert(directive: &Directive, arg: FormatArg<'_>, pattern: &str) -> MarshalResult<String> {
	let number_required = || {
		MarshalError::configuration(format!(
			"%{} in pattern {:?} requires a number, not a string",
			directive.conversion, pattern
		))
	};

	match directive.conversion {
		's' | 'r' => {
			let mut text = match arg {
				FormatArg::Str(s) if directive.conversion == 'r' => format!("'{}'", s),
				FormatArg::Str(s) => s.to_string(),
				FormatArg::Int(i) => i.to_string(),
				FormatArg::Float(f) => float_repr(f),
				FormatArg::Decimal(d) => d.to_string(),
			};
			if let Some(precision) = directive.precision {
				text = text.chars().take(precision).collect();
			}
			Ok(pad(directive, "", &text, false))
		}
		'd' | 'i' | 'u' => {
			let value = match arg {
				FormatArg::Int(i) => i,
				FormatArg::Float(f) if f.is_finite() => f.trunc() as i128,
				FormatArg::Float(f) => {
					return Err(MarshalError::configuration(format!(
						"Cannot convert {} to an integer for pattern {:?}",
						f, pattern
					)));
				}
				FormatArg::Decimal(d) => d.trunc().mantissa(),
				FormatArg::Str(_) => return Err(number_required()),
			};
			let sign = sign_of(directive, value < 0);
			Ok(pad(directive, sign, &value.unsigned_abs().to_string(), true))
		}
		'x' | 'X' | 'o' => {
			let value = match arg {
				FormatArg::Int(i) => i,
				_ => {
					return Err(MarshalError::configuration(format!(
						"%{} in pattern {:?} requires an integer",
						directive.conversion, pattern
					)));
				}
			};
			let magnitude = value.unsigned_abs();
			let body = match directive.conversion {
				'x' if directive.alternate => format!("0x{:x}", magnitude),
				'x' => format!("{:x}", magnitude),
				'X' if directive.alternate => format!("0X{:X}", magnitude),
				'X' => format!("{:X}", magnitude),
				_ if directive.alternate => format!("0o{:o}", magnitude),
				_ => format!("{:o}", magnitude),
			};
			Ok(pad(directive, sign_of(directive, value < 0), &body, true))
		}
		'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
			let precision = directive.precision.unwrap_or(6);
			if let (FormatArg::Decimal(d), 'f' | 'F') = (arg, directive.conversion) {
				let rounded = d.round_dp_with_strategy(
					precision.min(28) as u32,
					RoundingStrategy::MidpointNearestEven,
				);
				let body = format!("{:.*}", precision, rounded.abs());
				let negative = d.is_sign_negative() && !rounded.is_zero();
				return Ok(pad(directive, sign_of(directive, negative), &body, true));
			}
			let value = match arg {
				FormatArg::Float(f) => f,
				FormatArg::Int(i) => i as f64,
				FormatArg::Decimal(d) => d.to_string().parse::<f64>().unwrap_or(f64::NAN),
				FormatArg::Str(_) => return Err(number_required()),
			};
			let upper = directive.conversion.is_ascii_uppercase();
			let negative = value.is_sign_negative() && !value.is_nan();
			let magnitude = value.abs();
			let body = if !magnitude.is_finite() {
				let text = if magnitude.is_nan() { "nan" } else { "inf" };
				let text = if upper { text.to_ascii_uppercase() } else { text.to_string() };
				return Ok(pad(directive, sign_of(directive, negative), &text, false));
			} else {
				match directive.conversion.to_ascii_lowercase() {
					'f' => format!("{:.*}", precision, magnitude),
					'e' => exponent_form(magnitude, precision),
					_ => general_form(magnitude, precision, directive.alternate),
				}
			};
			let body = if upper { body.to_ascii_uppercase() } else { body };
			Ok(pad(directive, sign_of(directive, negative), &body, true))
		}
		other => Err(MarshalError::configuration(format!(
			"Unsupported format character '{}' in pattern {:?}",
			other, pattern
		))),
	}
}

fn sign_of(directive: &Directive, negative: bool) -> &'static str {
	if negative {
		"-"
	} else if directive.plus {
		"+"
	} else if directive.space {
		" "
	} else {
		""
	}
}

fn pad(directive: &Directive, sign: &str, body: &str, numeric: bool) -> String {
	let len = sign.chars().count() + body.chars().count();
	if len >= directive.width {
		return format!("{}{}", sign, body);
	}
	let fill = directive.width - len;
	if directive.left {
		format!("{}{}{}", sign, body, " ".repeat(fill))
	} else if directive.zero && numeric {
		format!("{}{}{}", sign, "0".repeat(fill), body)
	} else {
		format!("{}{}{}", " ".repeat(fill), sign, body)
	}
}

/// `d.dddddde+XX`, with at least two exponent digits.
fn exponent_form(magnitude: f64, precision: usize) -> String {
	let raw = format!("{:.*e}", precision, magnitude);
	let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
	let exponent: i32 = exponent.parse().unwrap_or(0);
	let sign = if exponent < 0 { '-' } else { '+' };
	format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

fn general_form(magnitude: f64, precision: usize, alternate: bool) -> String {
	let significant = precision.max(1);
	if magnitude == 0.0 {
		return if alternate {
			format!("{:.*}", significant - 1, 0.0)
		} else {
			"0".to_string()
		};
	}
	let probe = format!("{:.*e}", significant - 1, magnitude);
	let exponent: i64 = probe
		.split_once('e')
		.and_then(|(_, e)| e.parse().ok())
		.unwrap_or(0);

	let text = if exponent < -4 || exponent >= significant as i64 {
		exponent_form(magnitude, significant - 1)
	} else {
		let decimals = (significant as i64 - 1 - exponent).max(0) as usize;
		format!("{:.*}", decimals, magnitude)
	};
	if alternate {
		return text;
	}
	match text.split_once('e') {
		Some((mantissa, exponent)) => format!("{}e{}", trim_fraction(mantissa), exponent),
		None => trim_fraction(&text).to_string(),
	}
}

fn trim_fraction(text: &str) -> &str {
	if text.contains('.') {
		text.trim_end_matches('0').trim_end_matches('.')
	} else {
		text
	}
}

/// Shortest text that reads back to the same double.
pub(crate) fn float_repr(value: f64) -> String {
	if value.is_nan() {
		"NaN".to_string()
	} else if value.is_infinite() {
		if value > 0.0 { "INF" } else { "-INF" }.to_string()
	} else {
		format!("{:?}", value)
	}
}
