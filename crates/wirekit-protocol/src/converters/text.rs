//! Text, opaque byte-string and null converters

use crate::format::{FormatArg, percent_format};
use crate::nillable::{nillable_from_string, nillable_string};
use crate::wire::{StringForm, WireInput};
use wirekit_model::{MarshalError, MarshalResult, ModelType, TextEncoding};

fn render_unicode(cls: &ModelType, value: &str) -> MarshalResult<StringForm> {
	let attrs = cls.attributes();
	let text = match &attrs.format {
		Some(pattern) => percent_format(pattern, FormatArg::Str(value))?,
		None => value.to_string(),
	};
	match attrs.text_encoding()? {
		Some(encoding) => Ok(StringForm::Bytes(encoding.encode(&text, attrs.unicode_errors)?)),
		None => Ok(StringForm::Text(text)),
	}
}

fn read_unicode(cls: &ModelType, value: &WireInput<'_>) -> MarshalResult<String> {
	match value {
		WireInput::Text(text) => Ok(text.to_string()),
		WireInput::Bytes(bytes) => {
			let attrs = cls.attributes();
			let encoding = attrs.text_encoding()?.unwrap_or(TextEncoding::Utf8);
			encoding.decode(bytes, attrs.unicode_errors)
		}
	}
}

fn read_string(cls: &ModelType, value: &WireInput<'_>) -> MarshalResult<Vec<u8>> {
	match value {
		WireInput::Bytes(bytes) => Ok(bytes.to_vec()),
		WireInput::Text(text) => {
			let attrs = cls.attributes();
			let encoding = attrs.text_encoding()?.ok_or_else(|| {
				MarshalError::configuration(format!(
					"Type '{}' needs an encoding to turn text into bytes",
					cls.type_name()
				))
			})?;
			encoding.encode(text, attrs.unicode_errors)
		}
	}
}

/// Renders text, substituted into `format` and then encoded with `encoding`
/// when those are configured.
///
/// The pattern is applied to the text before encoding, and the whole
/// substituted result is encoded, so pattern characters use the same
/// encoding as the value.
///
/// # Examples
///
/// ```
/// use wirekit_model::{Attributes, ModelType};
/// use wirekit_protocol::{StringForm, unicode_to_string};
///
/// let plain = ModelType::new("string");
/// assert_eq!(unicode_to_string(&plain, Some("héllo")).unwrap(), "héllo");
///
/// let latin = ModelType::new("string")
///     .with_attributes(Attributes::new().with_encoding("latin-1"));
/// assert_eq!(
///     unicode_to_string(&latin, Some("é")).unwrap(),
///     StringForm::Bytes(vec![0xe9])
/// );
/// ```
pub fn unicode_to_string(cls: &ModelType, value: Option<&str>) -> MarshalResult<StringForm> {
	nillable_string(render_unicode)(cls, value)
}

/// Reads text; raw bytes are decoded with the configured encoding (UTF-8 when
/// none is set) under the configured `unicode_errors` policy.
pub fn unicode_from_string(
	cls: &ModelType,
	value: Option<WireInput<'_>>,
) -> MarshalResult<Option<String>> {
	nillable_from_string(read_unicode)(cls, value.as_ref())
}

/// Reads an opaque byte string.
///
/// Text input is encoded with the configured encoding; a type without one is a
/// configuration error, not a validation failure.
pub fn string_from_string(
	cls: &ModelType,
	value: Option<WireInput<'_>>,
) -> MarshalResult<Option<Vec<u8>>> {
	nillable_from_string(read_string)(cls, value.as_ref())
}

/// The null type always renders as the empty string.
pub fn null_to_string(_cls: &ModelType, _value: Option<&()>) -> MarshalResult<String> {
	Ok(String::new())
}

/// The null type always reads back as nil, whatever the wire text.
pub fn null_from_string(_cls: &ModelType, _value: Option<&str>) -> MarshalResult<Option<()>> {
	Ok(None)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use wirekit_model::{Attributes, UnicodeErrors};

	fn typed(attributes: Attributes) -> ModelType {
		ModelType::new("string").with_attributes(attributes)
	}

	#[rstest]
	fn test_format_then_encode() {
		// Arrange
		let cls = typed(Attributes::new().with_format("<%s>").with_encoding("utf-16le"));

		// Act
		let rendered = unicode_to_string(&cls, Some("a")).unwrap();

		// Assert
		assert_eq!(rendered, StringForm::Bytes(vec![b'<', 0, b'a', 0, b'>', 0]));
	}

	#[rstest]
	fn test_format_without_encoding() {
		let cls = typed(Attributes::new().with_format("[%5s]"));
		assert_eq!(unicode_to_string(&cls, Some("ab")).unwrap(), "[   ab]");
	}

	#[rstest]
	fn test_unencodable_text_is_validation_error() {
		let cls = typed(Attributes::new().with_encoding("ascii"));
		assert!(unicode_to_string(&cls, Some("é")).unwrap_err().is_validation());
	}

	#[rstest]
	#[case(WireInput::Text("plain"), "plain")]
	#[case(WireInput::Bytes("héllo".as_bytes()), "héllo")]
	fn test_unicode_from_string_default_encoding(#[case] input: WireInput<'_>, #[case] expected: &str) {
		let cls = typed(Attributes::new());
		assert_eq!(unicode_from_string(&cls, Some(input)).unwrap().as_deref(), Some(expected));
	}

	#[rstest]
	fn test_unicode_from_string_uses_configured_encoding() {
		let cls = typed(Attributes::new().with_encoding("latin-1"));
		let decoded = unicode_from_string(&cls, Some(WireInput::Bytes(&[0x63, 0x61, 0x66, 0xe9])));
		assert_eq!(decoded.unwrap().as_deref(), Some("café"));
	}

	#[rstest]
	#[case(UnicodeErrors::Strict, None)]
	#[case(UnicodeErrors::Replace, Some("a\u{fffd}b"))]
	#[case(UnicodeErrors::Ignore, Some("ab"))]
	fn test_unicode_errors_policy(#[case] policy: UnicodeErrors, #[case] expected: Option<&str>) {
		let cls = typed(Attributes::new().with_unicode_errors(policy));
		let result = unicode_from_string(&cls, Some(WireInput::Bytes(b"a\xffb")));

		match expected {
			Some(text) => assert_eq!(result.unwrap().as_deref(), Some(text)),
			None => assert!(result.unwrap_err().is_validation()),
		}
	}

	#[rstest]
	fn test_string_from_string_passes_bytes_through() {
		let cls = typed(Attributes::new());
		let read = string_from_string(&cls, Some(WireInput::Bytes(b"\x00\x01"))).unwrap();
		assert_eq!(read, Some(vec![0, 1]));
	}

	#[rstest]
	fn test_string_from_string_text_needs_encoding() {
		// Arrange
		let bare = typed(Attributes::new());
		let encoded = typed(Attributes::new().with_encoding("utf-8"));

		// Act
		let missing = string_from_string(&bare, Some(WireInput::Text("x"))).unwrap_err();
		let read = string_from_string(&encoded, Some(WireInput::Text("é"))).unwrap();

		// Assert
		assert!(matches!(missing, MarshalError::Configuration(_)));
		assert_eq!(read, Some("é".as_bytes().to_vec()));
	}

	#[rstest]
	fn test_nil_handling() {
		let cls = typed(Attributes::new().with_nil_string("NULL"));

		assert_eq!(unicode_to_string(&cls, None).unwrap(), "NULL");
		assert_eq!(unicode_from_string(&cls, None).unwrap(), None);
		assert_eq!(string_from_string(&cls, None).unwrap(), None);
	}

	#[rstest]
	fn test_null_type() {
		let cls = ModelType::new("null");

		assert_eq!(null_to_string(&cls, Some(&())).unwrap(), "");
		assert_eq!(null_from_string(&cls, Some("anything")).unwrap(), None);
	}
}
