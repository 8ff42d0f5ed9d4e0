//! Text encodings used when text crosses the text/bytes boundary

use crate::error::{MarshalError, MarshalResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Policy applied when bytes cannot be decoded (or text cannot be encoded)
/// with the configured encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnicodeErrors {
	/// Fail with a validation error.
	#[default]
	Strict,
	/// Substitute U+FFFD when decoding and `?` when encoding.
	Replace,
	/// Drop the offending bytes or characters.
	Ignore,
}

/// A named byte encoding for text values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
	Utf8,
	Ascii,
	Latin1,
	Utf16Le,
	Utf16Be,
}

impl FromStr for TextEncoding {
	type Err = MarshalError;

	/// Resolves an encoding by name, accepting the usual aliases.
	///
	/// # Examples
	///
	/// ```
	/// use wirekit_model::TextEncoding;
	///
	/// assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
	/// assert_eq!("iso-8859-1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
	/// assert!("ebcdic".parse::<TextEncoding>().is_err());
	/// ```
	fn from_str(name: &str) -> Result<Self, Self::Err> {
		let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
		match normalized.as_str() {
			"utf-8" | "utf8" => Ok(TextEncoding::Utf8),
			"ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
			"latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
			"utf-16le" | "utf16le" => Ok(TextEncoding::Utf16Le),
			"utf-16be" | "utf16be" => Ok(TextEncoding::Utf16Be),
			_ => Err(MarshalError::configuration(format!(
				"Unknown text encoding '{}'",
				name
			))),
		}
	}
}

impl TextEncoding {
	pub fn name(&self) -> &'static str {
		match self {
			TextEncoding::Utf8 => "utf-8",
			TextEncoding::Ascii => "ascii",
			TextEncoding::Latin1 => "latin-1",
			TextEncoding::Utf16Le => "utf-16le",
			TextEncoding::Utf16Be => "utf-16be",
		}
	}

	/// Encodes `text` into bytes.
	///
	/// # Examples
	///
	/// ```
	/// use wirekit_model::{TextEncoding, UnicodeErrors};
	///
	/// let bytes = TextEncoding::Latin1.encode("café", UnicodeErrors::Strict).unwrap();
	/// assert_eq!(bytes, b"caf\xe9");
	///
	/// let lossy = TextEncoding::Ascii.encode("café", UnicodeErrors::Replace).unwrap();
	/// assert_eq!(lossy, b"caf?");
	/// ```
	pub fn encode(&self, text: &str, errors: UnicodeErrors) -> MarshalResult<Vec<u8>> {
		match self {
			TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
			TextEncoding::Ascii => self.encode_single_byte(text, 0x7f, errors),
			TextEncoding::Latin1 => self.encode_single_byte(text, 0xff, errors),
			TextEncoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
			TextEncoding::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
		}
	}

	fn encode_single_byte(
		&self,
		text: &str,
		max: u32,
		errors: UnicodeErrors,
	) -> MarshalResult<Vec<u8>> {
		let mut out = Vec::with_capacity(text.len());
		let mut lossy = false;
		for (position, ch) in text.chars().enumerate() {
			let code = ch as u32;
			if code <= max {
				out.push(code as u8);
				continue;
			}
			match errors {
				UnicodeErrors::Strict => {
					return Err(MarshalError::validation(
						text,
						format!(
							"'{}' codec can't encode character {:?} in position {}",
							self.name(),
							ch,
							position
						),
					));
				}
				UnicodeErrors::Replace => out.push(b'?'),
				UnicodeErrors::Ignore => {}
			}
			lossy = true;
		}
		if lossy {
			tracing::warn!(encoding = self.name(), "replaced or dropped unencodable characters");
		}
		Ok(out)
	}

	/// Decodes `bytes` into text.
	///
	/// # Examples
	///
	/// ```
	/// use wirekit_model::{TextEncoding, UnicodeErrors};
	///
	/// assert_eq!(
	///     TextEncoding::Utf8.decode(b"ok\xff", UnicodeErrors::Replace).unwrap(),
	///     "ok\u{fffd}"
	/// );
	/// assert!(TextEncoding::Utf8.decode(b"ok\xff", UnicodeErrors::Strict).is_err());
	/// ```
	pub fn decode(&self, bytes: &[u8], errors: UnicodeErrors) -> MarshalResult<String> {
		match self {
			TextEncoding::Utf8 => decode_utf8(bytes, errors),
			TextEncoding::Ascii => {
				let mut out = String::with_capacity(bytes.len());
				for (position, &b) in bytes.iter().enumerate() {
					if b.is_ascii() {
						out.push(b as char);
						continue;
					}
					match errors {
						UnicodeErrors::Strict => {
							return Err(MarshalError::validation(
								String::from_utf8_lossy(bytes),
								format!(
									"'ascii' codec can't decode byte 0x{:02x} in position {}",
									b, position
								),
							));
						}
						UnicodeErrors::Replace => out.push(char::REPLACEMENT_CHARACTER),
						UnicodeErrors::Ignore => {}
					}
					tracing::warn!(encoding = "ascii", position, "undecodable byte");
				}
				Ok(out)
			}
			TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
			TextEncoding::Utf16Le | TextEncoding::Utf16Be => self.decode_utf16(bytes, errors),
		}
	}

	fn decode_utf16(&self, bytes: &[u8], errors: UnicodeErrors) -> MarshalResult<String> {
		let units = bytes.chunks_exact(2).map(|pair| match self {
			TextEncoding::Utf16Be => u16::from_be_bytes([pair[0], pair[1]]),
			_ => u16::from_le_bytes([pair[0], pair[1]]),
		});

		let mut out = String::with_capacity(bytes.len() / 2);
		let mut failures = 0usize;
		for unit in char::decode_utf16(units) {
			match unit {
				Ok(ch) => out.push(ch),
				Err(e) => {
					failures += 1;
					match errors {
						UnicodeErrors::Strict => {
							return Err(MarshalError::validation(
								String::from_utf8_lossy(bytes),
								format!(
									"'{}' codec can't decode unpaired surrogate 0x{:04x}",
									self.name(),
									e.unpaired_surrogate()
								),
							));
						}
						UnicodeErrors::Replace => out.push(char::REPLACEMENT_CHARACTER),
						UnicodeErrors::Ignore => {}
					}
				}
			}
		}

		if bytes.len() % 2 == 1 {
			failures += 1;
			match errors {
				UnicodeErrors::Strict => {
					return Err(MarshalError::validation(
						String::from_utf8_lossy(bytes),
						format!("'{}' codec can't decode truncated data", self.name()),
					));
				}
				UnicodeErrors::Replace => out.push(char::REPLACEMENT_CHARACTER),
				UnicodeErrors::Ignore => {}
			}
		}

		if failures > 0 {
			tracing::warn!(encoding = self.name(), failures, "lossy text decode");
		}
		Ok(out)
	}
}

fn decode_utf8(bytes: &[u8], errors: UnicodeErrors) -> MarshalResult<String> {
	let mut out = String::with_capacity(bytes.len());
	let mut rest = bytes;
	let mut offset = 0usize;
	loop {
		match std::str::from_utf8(rest) {
			Ok(valid) => {
				out.push_str(valid);
				return Ok(out);
			}
			Err(e) => {
				let (valid, after) = rest.split_at(e.valid_up_to());
				// The prefix up to `valid_up_to` is guaranteed to be UTF-8.
				out.push_str(&String::from_utf8_lossy(valid));
				match errors {
					UnicodeErrors::Strict => {
						return Err(MarshalError::validation(
							String::from_utf8_lossy(bytes),
							format!(
								"'utf-8' codec can't decode byte 0x{:02x} in position {}",
								after[0],
								offset + e.valid_up_to()
							),
						));
					}
					UnicodeErrors::Replace => out.push(char::REPLACEMENT_CHARACTER),
					UnicodeErrors::Ignore => {}
				}
				tracing::warn!(
					encoding = "utf-8",
					position = offset + e.valid_up_to(),
					"undecodable byte sequence"
				);
				let skip = e.error_len().unwrap_or(after.len());
				offset += e.valid_up_to() + skip;
				rest = &after[skip..];
			}
		}
	}
}
