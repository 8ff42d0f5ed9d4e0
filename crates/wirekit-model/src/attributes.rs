//! Per-type marshaling configuration

use crate::encoding::{TextEncoding, UnicodeErrors};
use crate::error::MarshalResult;
use crate::temporal::{DefaultParse, parse_iso_datetime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Marshaling options recognized by the converters.
///
/// An `Attributes` value is built once when a type is declared and is only
/// read afterwards. It can be loaded from settings files through serde; the
/// `default_parse` hook is code and is never (de)serialized.
///
/// # Examples
///
/// ```
/// use wirekit_model::Attributes;
///
/// let attrs: Attributes = serde_json::from_str(
///     r#"{"max_str_len": 8, "as_time_zone": "Europe/Berlin"}"#,
/// ).unwrap();
/// assert_eq!(attrs.max_str_len, Some(8));
/// assert_eq!(attrs.as_time_zone, Some(chrono_tz::Europe::Berlin));
/// assert!(attrs.encoding.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
	/// Text encoding name, or the byte-array codec name for binary types.
	pub encoding: Option<String>,
	/// printf-style pattern for numbers and text, strftime-style for dates.
	pub format: Option<String>,
	/// printf-style pattern applied to the already rendered string.
	pub string_format: Option<String>,
	/// Longest input string accepted by numeric parsers.
	pub max_str_len: Option<usize>,
	/// Zone aware datetimes are converted into this zone and made naive.
	pub as_time_zone: Option<Tz>,
	pub unicode_errors: UnicodeErrors,
	/// Text produced for a nil value in the string form.
	pub nil_string: String,
	#[serde(skip, default = "default_parse")]
	pub default_parse: DefaultParse,
}

fn default_parse() -> DefaultParse {
	parse_iso_datetime
}

impl Default for Attributes {
	fn default() -> Self {
		Self {
			encoding: None,
			format: None,
			string_format: None,
			max_str_len: None,
			as_time_zone: None,
			unicode_errors: UnicodeErrors::Strict,
			nil_string: String::new(),
			default_parse: parse_iso_datetime,
		}
	}
}

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
		self.encoding = Some(encoding.into());
		self
	}

	/// Sets the primary rendering pattern.
	///
	/// # Examples
	///
	/// ```
	/// use wirekit_model::Attributes;
	///
	/// let attrs = Attributes::new().with_format("%.2f");
	/// assert_eq!(attrs.format.as_deref(), Some("%.2f"));
	/// ```
	pub fn with_format(mut self, format: impl Into<String>) -> Self {
		self.format = Some(format.into());
		self
	}

	pub fn with_string_format(mut self, string_format: impl Into<String>) -> Self {
		self.string_format = Some(string_format.into());
		self
	}

	pub fn with_max_str_len(mut self, max_str_len: usize) -> Self {
		self.max_str_len = Some(max_str_len);
		self
	}

	pub fn with_time_zone(mut self, zone: Tz) -> Self {
		self.as_time_zone = Some(zone);
		self
	}

	pub fn with_unicode_errors(mut self, policy: UnicodeErrors) -> Self {
		self.unicode_errors = policy;
		self
	}

	pub fn with_nil_string(mut self, nil_string: impl Into<String>) -> Self {
		self.nil_string = nil_string.into();
		self
	}

	pub fn with_default_parse(mut self, parse: DefaultParse) -> Self {
		self.default_parse = parse;
		self
	}

	/// Resolves `encoding` as a text encoding.
	///
	/// Returns `Ok(None)` when no encoding is configured.
	pub fn text_encoding(&self) -> MarshalResult<Option<TextEncoding>> {
		self.encoding.as_deref().map(str::parse).transpose()
	}
}
