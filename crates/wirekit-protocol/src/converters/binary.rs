//! Byte-array, file and attachment converters

use crate::nillable::{nillable_from_string, nillable_string};
use wirekit_model::{Attachment, FileValue, MarshalError, MarshalResult, ModelType};

fn encode_byte_array(cls: &ModelType, value: &[Vec<u8>]) -> MarshalResult<String> {
	let codec = cls.codec()?;
	Ok((codec.encode)(value))
}

fn decode_byte_array(cls: &ModelType, string: &str) -> MarshalResult<Vec<Vec<u8>>> {
	let codec = cls.codec()?;
	(codec.decode)(string)
}

fn load_attachment(_cls: &ModelType, value: &Attachment) -> MarshalResult<Vec<u8>> {
	if let Some(data) = &value.data {
		return Ok(data.clone());
	}
	let path = value.file_name.as_ref().ok_or_else(|| {
		MarshalError::configuration("Attachment has neither data nor a file name")
	})?;

	let data = std::fs::read(path).map_err(|source| MarshalError::Io {
		path: path.clone(),
		source,
	})?;
	tracing::debug!(path = %path.display(), bytes = data.len(), "read attachment from file");
	Ok(data)
}

/// Encodes the chunks of a byte array with the codec the type resolved at
/// declaration time.
///
/// # Examples
///
/// ```
/// use wirekit_model::{Attributes, CodecRegistry, ModelType};
/// use wirekit_protocol::{byte_array_from_string, byte_array_to_string};
///
/// let registry = CodecRegistry::default();
/// let cls = ModelType::byte_array("hexBinary", Attributes::new().with_encoding("hex"), &registry)
///     .unwrap();
///
/// let chunks = vec![b"ab".to_vec(), b"c".to_vec()];
/// assert_eq!(byte_array_to_string(&cls, Some(&chunks)).unwrap(), "616263");
/// assert_eq!(
///     byte_array_from_string(&cls, Some("616263")).unwrap(),
///     Some(vec![b"abc".to_vec()])
/// );
/// ```
pub fn byte_array_to_string(cls: &ModelType, value: Option<&[Vec<u8>]>) -> MarshalResult<String> {
	nillable_string(encode_byte_array)(cls, value)
}

pub fn byte_array_from_string(
	cls: &ModelType,
	string: Option<&str>,
) -> MarshalResult<Option<Vec<Vec<u8>>>> {
	nillable_from_string(decode_byte_array)(cls, string)
}

/// Wraps raw bytes as a file holding a single chunk.
pub fn file_from_string(cls: &ModelType, value: Option<&[u8]>) -> MarshalResult<Option<FileValue>> {
	nillable_from_string(|_: &ModelType, value: &[u8]| Ok(FileValue::from_chunk(value.to_vec())))(
		cls, value,
	)
}

/// Returns the attachment's bytes, reading the referenced file when the data
/// is not loaded.
///
/// An attachment with neither data nor a file name is a configuration error;
/// a failed read is reported as [`MarshalError::Io`].
pub fn attachment_to_string(cls: &ModelType, value: Option<&Attachment>) -> MarshalResult<Vec<u8>> {
	nillable_string(load_attachment)(cls, value)
}

pub fn attachment_from_string(
	cls: &ModelType,
	value: Option<&[u8]>,
) -> MarshalResult<Option<Attachment>> {
	nillable_from_string(|_: &ModelType, value: &[u8]| Ok(Attachment::from_data(value)))(cls, value)
}
