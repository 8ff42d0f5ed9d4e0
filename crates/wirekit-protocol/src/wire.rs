//! String-form values that may be text or raw bytes

use wirekit_model::{MarshalError, MarshalResult};

/// Output of a to-string converter that may produce encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringForm {
	Text(String),
	Bytes(Vec<u8>),
}

impl StringForm {
	pub fn as_bytes(&self) -> &[u8] {
		match self {
			StringForm::Text(text) => text.as_bytes(),
			StringForm::Bytes(bytes) => bytes,
		}
	}

	pub fn into_bytes(self) -> Vec<u8> {
		match self {
			StringForm::Text(text) => text.into_bytes(),
			StringForm::Bytes(bytes) => bytes,
		}
	}

	/// Text view of the value; encoded bytes must be valid UTF-8.
	pub fn into_text(self) -> MarshalResult<String> {
		match self {
			StringForm::Text(text) => Ok(text),
			StringForm::Bytes(bytes) => String::from_utf8(bytes).map_err(|e| {
				let input = String::from_utf8_lossy(e.as_bytes()).into_owned();
				MarshalError::validation(input, format!("Encoded value is not text: {}", e))
			}),
		}
	}
}

impl From<String> for StringForm {
	fn from(text: String) -> Self {
		StringForm::Text(text)
	}
}

impl From<Vec<u8>> for StringForm {
	fn from(bytes: Vec<u8>) -> Self {
		StringForm::Bytes(bytes)
	}
}

impl PartialEq<str> for StringForm {
	fn eq(&self, other: &str) -> bool {
		matches!(self, StringForm::Text(text) if text == other)
	}
}

impl PartialEq<&str> for StringForm {
	fn eq(&self, other: &&str) -> bool {
		self == *other
	}
}

/// Input of a from-string converter that accepts either text or raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireInput<'a> {
	Text(&'a str),
	Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for WireInput<'a> {
	fn from(text: &'a str) -> Self {
		WireInput::Text(text)
	}
}

impl<'a> From<&'a String> for WireInput<'a> {
	fn from(text: &'a String) -> Self {
		WireInput::Text(text)
	}
}

impl<'a> From<&'a [u8]> for WireInput<'a> {
	fn from(bytes: &'a [u8]) -> Self {
		WireInput::Bytes(bytes)
	}
}

impl<'a> From<&'a Vec<u8>> for WireInput<'a> {
	fn from(bytes: &'a Vec<u8>) -> Self {
		WireInput::Bytes(bytes)
	}
}
