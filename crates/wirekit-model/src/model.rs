//! Type descriptors
//!
//! A [`ModelType`] is the `cls` every converter receives: it names the type and
//! owns the [`Attributes`] that drive marshaling. Descriptors are built once,
//! at declaration time, and are read-only afterwards, so they can be shared
//! freely between threads.

use crate::attributes::Attributes;
use crate::binary::{ByteArrayCodec, CodecRegistry};
use crate::error::{MarshalError, MarshalResult};

#[derive(Debug, Clone)]
pub struct ModelType {
	type_name: String,
	namespace: Option<String>,
	attributes: Attributes,
	codec: Option<ByteArrayCodec>,
}

impl ModelType {
	/// Declares a type with default attributes.
	///
	/// # Examples
	///
	/// ```
	/// use wirekit_model::{Attributes, ModelType};
	///
	/// let decimal = ModelType::new("decimal")
	///     .with_namespace("http://www.w3.org/2001/XMLSchema")
	///     .with_attributes(Attributes::new().with_max_str_len(32));
	///
	/// assert_eq!(decimal.type_name(), "decimal");
	/// assert_eq!(decimal.attributes().max_str_len, Some(32));
	/// assert_eq!(
	///     decimal.qualified_name(),
	///     "{http://www.w3.org/2001/XMLSchema}decimal"
	/// );
	/// ```
	pub fn new(type_name: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			namespace: None,
			attributes: Attributes::default(),
			codec: None,
		}
	}

	/// Declares a byte-array type, resolving its codec from `registry` using
	/// the configured `encoding`.
	///
	/// An unknown encoding name is reported here, not on first use.
	///
	/// # Examples
	///
	/// ```
	/// use wirekit_model::{Attributes, CodecRegistry, ModelType};
	///
	/// let registry = CodecRegistry::default();
	/// let blob = ModelType::byte_array(
	///     "blob",
	///     Attributes::new().with_encoding("hex"),
	///     &registry,
	/// ).unwrap();
	/// assert_eq!(blob.codec().unwrap().name, "hex");
	///
	/// assert!(ModelType::byte_array(
	///     "blob",
	///     Attributes::new().with_encoding("uuencode"),
	///     &registry,
	/// ).is_err());
	/// ```
	pub fn byte_array(
		type_name: impl Into<String>,
		attributes: Attributes,
		registry: &CodecRegistry,
	) -> MarshalResult<Self> {
		let codec = registry.resolve(attributes.encoding.as_deref())?;
		Ok(Self {
			type_name: type_name.into(),
			namespace: None,
			attributes,
			codec: Some(codec),
		})
	}

	pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = Some(namespace.into());
		self
	}

	pub fn with_attributes(mut self, attributes: Attributes) -> Self {
		self.attributes = attributes;
		self
	}

	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	pub fn namespace(&self) -> Option<&str> {
		self.namespace.as_deref()
	}

	/// Clark notation name, `{namespace}name`, or the bare name.
	pub fn qualified_name(&self) -> String {
		match &self.namespace {
			Some(ns) => format!("{{{}}}{}", ns, self.type_name),
			None => self.type_name.clone(),
		}
	}

	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	/// The byte-array codec resolved at declaration.
	pub fn codec(&self) -> MarshalResult<&ByteArrayCodec> {
		self.codec.as_ref().ok_or_else(|| {
			MarshalError::configuration(format!(
				"Type '{}' was not declared as a byte array",
				self.type_name
			))
		})
	}
}
