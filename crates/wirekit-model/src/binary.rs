//! Binary payloads: byte-array codecs, attachments and uploaded files

use crate::error::{MarshalError, MarshalResult};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use std::collections::HashMap;
use std::path::PathBuf;

pub const BINARY_ENCODING_BASE64: &str = "base64";
pub const BINARY_ENCODING_URLSAFE_BASE64: &str = "urlsafe_base64";
pub const BINARY_ENCODING_HEX: &str = "hex";

/// Encoding used by byte-array types that do not configure one.
pub const DEFAULT_BINARY_ENCODING: &str = BINARY_ENCODING_BASE64;

pub type EncodeHandler = fn(&[Vec<u8>]) -> String;
pub type DecodeHandler = fn(&str) -> MarshalResult<Vec<Vec<u8>>>;

/// A named pair of byte-array encode/decode handlers.
#[derive(Debug, Clone, Copy)]
pub struct ByteArrayCodec {
	pub name: &'static str,
	pub encode: EncodeHandler,
	pub decode: DecodeHandler,
}

fn join_chunks(chunks: &[Vec<u8>]) -> Vec<u8> {
	chunks.concat()
}

fn base64_encode(chunks: &[Vec<u8>]) -> String {
	STANDARD.encode(join_chunks(chunks))
}

fn base64_decode(string: &str) -> MarshalResult<Vec<Vec<u8>>> {
	STANDARD
		.decode(string.trim())
		.map(|data| vec![data])
		.map_err(|e| MarshalError::validation(string, format!("{:?}: {}", string, e)))
}

fn urlsafe_base64_encode(chunks: &[Vec<u8>]) -> String {
	URL_SAFE.encode(join_chunks(chunks))
}

fn urlsafe_base64_decode(string: &str) -> MarshalResult<Vec<Vec<u8>>> {
	URL_SAFE
		.decode(string.trim())
		.map(|data| vec![data])
		.map_err(|e| MarshalError::validation(string, format!("{:?}: {}", string, e)))
}

fn hex_encode(chunks: &[Vec<u8>]) -> String {
	hex::encode(join_chunks(chunks))
}

fn hex_decode(string: &str) -> MarshalResult<Vec<Vec<u8>>> {
	hex::decode(string.trim())
		.map(|data| vec![data])
		.map_err(|e| MarshalError::validation(string, format!("{:?}: {}", string, e)))
}

/// Byte-array codecs keyed by encoding name.
///
/// Codecs are looked up once, when a byte-array type is declared.
///
/// # Examples
///
/// ```
/// use wirekit_model::CodecRegistry;
///
/// let registry = CodecRegistry::default();
/// let hex = registry.resolve(Some("hex")).unwrap();
/// assert_eq!((hex.encode)(&[b"\x01\xff".to_vec()]), "01ff");
/// assert!(registry.resolve(Some("rot13")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CodecRegistry {
	codecs: HashMap<String, ByteArrayCodec>,
}

impl Default for CodecRegistry {
	fn default() -> Self {
		let mut registry = Self::empty();
		registry.register(ByteArrayCodec {
			name: BINARY_ENCODING_BASE64,
			encode: base64_encode,
			decode: base64_decode,
		});
		registry.register(ByteArrayCodec {
			name: BINARY_ENCODING_URLSAFE_BASE64,
			encode: urlsafe_base64_encode,
			decode: urlsafe_base64_decode,
		});
		registry.register(ByteArrayCodec {
			name: BINARY_ENCODING_HEX,
			encode: hex_encode,
			decode: hex_decode,
		});
		registry
	}
}

impl CodecRegistry {
	pub fn empty() -> Self {
		Self {
			codecs: HashMap::new(),
		}
	}

	/// Adds or replaces a codec under its own name.
	pub fn register(&mut self, codec: ByteArrayCodec) {
		self.codecs.insert(codec.name.to_string(), codec);
	}

	/// Looks up the codec for `encoding`, falling back to
	/// [`DEFAULT_BINARY_ENCODING`] when none is given.
	pub fn resolve(&self, encoding: Option<&str>) -> MarshalResult<ByteArrayCodec> {
		let name = encoding.unwrap_or(DEFAULT_BINARY_ENCODING);
		let codec = self.codecs.get(name).copied().ok_or_else(|| {
			MarshalError::configuration(format!("No byte array codec registered for '{}'", name))
		})?;
		tracing::debug!(encoding = name, "resolved byte array codec");
		Ok(codec)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.codecs.keys().map(String::as_str)
	}
}

/// A binary attachment, either loaded in memory or referencing a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
	pub data: Option<Vec<u8>>,
	pub file_name: Option<PathBuf>,
}

impl Attachment {
	pub fn from_data(data: impl Into<Vec<u8>>) -> Self {
		Self {
			data: Some(data.into()),
			file_name: None,
		}
	}

	pub fn from_file(file_name: impl Into<PathBuf>) -> Self {
		Self {
			data: None,
			file_name: Some(file_name.into()),
		}
	}
}

/// An uploaded file held as a sequence of data chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileValue {
	pub name: Option<String>,
	pub path: Option<PathBuf>,
	pub content_type: Option<String>,
	pub data: Vec<Vec<u8>>,
}

impl FileValue {
	/// Wraps `data` as the single chunk of an anonymous file.
	///
	/// # Examples
	///
	/// ```
	/// use wirekit_model::FileValue;
	///
	/// let file = FileValue::from_chunk(b"hello".to_vec());
	/// assert_eq!(file.data.len(), 1);
	/// assert_eq!(file.len(), 5);
	/// ```
	pub fn from_chunk(data: Vec<u8>) -> Self {
		Self {
			data: vec![data],
			..Self::default()
		}
	}

	/// Total number of bytes across all chunks.
	pub fn len(&self) -> usize {
		self.data.iter().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
