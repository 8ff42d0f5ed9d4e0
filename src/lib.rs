//! # Wirekit
//!
//! Primitive-value marshaling for schema-typed remote procedure calls.
//!
//! Wirekit converts between in-memory values and the two textual wire forms
//! protocol encoders work with:
//!
//! - **String form**: the text embedded in an element, attribute, path or query
//! - **Mapping form**: the name-to-value structure used by dict-oriented protocols
//!
//! Every converter receives a type descriptor ([`ModelType`]) whose
//! [`Attributes`] drive encoding, formatting, length bounds and time zones, and
//! every converter shares the same nil semantics through the
//! [`nillable`](protocol::nillable) wrappers.
//!
//! ## Crates
//!
//! - [`model`]: type descriptors, configuration, errors and native value shapes
//! - [`protocol`]: the converters, the pattern formatter and [`ComplexModel`]
//!
//! ## Errors
//!
//! Converters fail in two ways. Bad wire input is a
//! [`MarshalError::Validation`] carrying the offending text; a defect in how a
//! type or value was declared is a configuration, type or I/O error. Use
//! [`MarshalError::is_validation`] to tell them apart.
//!
//! ## Quick Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use wirekit::prelude::*;
//!
//! let price = ModelType::new("decimal")
//!     .with_attributes(Attributes::new().with_max_str_len(16).with_nil_string("NULL"));
//!
//! assert_eq!(decimal_to_string(&price, Some(&Decimal::new(1999, 2))).unwrap(), "19.99");
//! assert_eq!(decimal_to_string(&price, None).unwrap(), "NULL");
//! assert_eq!(decimal_from_string(&price, Some("19.99")).unwrap(), Some(Decimal::new(1999, 2)));
//!
//! let err = decimal_from_string(&price, Some("nineteen")).unwrap_err();
//! assert!(err.is_validation());
//! ```

pub use wirekit_model as model;
pub use wirekit_protocol as protocol;

pub use wirekit_model::{
	AnyValue, Attachment, Attributes, ByteArrayCodec, CodecRegistry, ComplexModelType,
	ComplexValue, DateTimeValue, Fault, FileValue, HtmlDocument, MarshalError, MarshalResult,
	ModelType, TextEncoding, UnicodeErrors, ValidationError, XmlElement,
};
pub use wirekit_protocol::{ComplexModel, Member, MemberKind, StringForm, WireInput};

/// Everything needed to declare types and call the converters.
pub mod prelude {
	pub use crate::{
		AnyValue, Attachment, Attributes, ByteArrayCodec, CodecRegistry, ComplexModel,
		ComplexModelType, ComplexValue, DateTimeValue, Fault, FileValue, HtmlDocument,
		MarshalError, MarshalResult, MemberKind, ModelType, StringForm, UnicodeErrors,
		ValidationError, WireInput, XmlElement,
	};

	pub use wirekit_protocol::converters::*;
}
