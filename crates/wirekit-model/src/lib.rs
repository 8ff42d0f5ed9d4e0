//! # wirekit-model
//!
//! Type descriptors and native value shapes for the wirekit marshaling layer.
//!
//! This crate holds everything the converters in `wirekit-protocol` read but
//! never mutate:
//!
//! - **Configuration**: [`Attributes`], the per-type record of marshaling options
//! - **Type descriptors**: [`ModelType`] and the [`ComplexModelType`] contract
//! - **Errors**: [`ValidationError`] for bad input, [`MarshalError`] for everything
//! - **Value shapes**: datetimes with optional zones, attachments, files,
//!   byte-array chunks, XML trees, HTML documents, composite values and faults
//! - **Lexical patterns**: the time and duration grammars
//!
//! ## Examples
//!
//! ```rust
//! use wirekit_model::{Attributes, CodecRegistry, ModelType};
//!
//! let registry = CodecRegistry::default();
//! let payload = ModelType::byte_array(
//!     "payload",
//!     Attributes::new().with_encoding("urlsafe_base64"),
//!     &registry,
//! ).unwrap();
//!
//! let codec = payload.codec().unwrap();
//! assert_eq!((codec.encode)(&[b"\xfb\xff".to_vec()]), "-_8=");
//! ```

pub mod attributes;
pub mod binary;
pub mod complex;
pub mod encoding;
pub mod error;
pub mod fault;
pub mod markup;
pub mod model;
pub mod temporal;

pub use attributes::Attributes;
pub use binary::{
	Attachment, BINARY_ENCODING_BASE64, BINARY_ENCODING_HEX, BINARY_ENCODING_URLSAFE_BASE64,
	ByteArrayCodec, CodecRegistry, DEFAULT_BINARY_ENCODING, FileValue,
};
pub use complex::{AnyValue, ComplexModelType, ComplexValue};
pub use encoding::{TextEncoding, UnicodeErrors};
pub use error::{MarshalError, MarshalResult, ValidationError};
pub use fault::Fault;
pub use markup::{HtmlDocument, XmlElement, XmlError, XmlNode, html_to_string, parse_html};
pub use model::ModelType;
pub use temporal::{
	DAYS_PER_MONTH, DAYS_PER_YEAR, DURATION_PATTERN, DateTimeValue, DefaultParse, TIME_PATTERN,
	parse_iso_datetime,
};
