//! Composite values and the descriptor contract composite types implement

use crate::binary::Attachment;
use crate::error::MarshalResult;
use crate::markup::XmlElement;
use crate::model::ModelType;
use crate::temporal::DateTimeValue;
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// A member value of a composite, in its native shape.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyValue {
	Unicode(String),
	Bytes(Vec<u8>),
	Decimal(Decimal),
	Double(f64),
	Integer(i64),
	Boolean(bool),
	Time(NaiveTime),
	DateTime(DateTimeValue),
	Date(NaiveDate),
	Duration(TimeDelta),
	ByteArray(Vec<Vec<u8>>),
	Attachment(Attachment),
	Xml(XmlElement),
	Complex(ComplexValue),
}

impl AnyValue {
	/// Short name of the native shape, used in diagnostics.
	pub fn shape(&self) -> &'static str {
		match self {
			AnyValue::Unicode(_) => "unicode",
			AnyValue::Bytes(_) => "bytes",
			AnyValue::Decimal(_) => "decimal",
			AnyValue::Double(_) => "double",
			AnyValue::Integer(_) => "integer",
			AnyValue::Boolean(_) => "boolean",
			AnyValue::Time(_) => "time",
			AnyValue::DateTime(_) => "datetime",
			AnyValue::Date(_) => "date",
			AnyValue::Duration(_) => "duration",
			AnyValue::ByteArray(_) => "byte array",
			AnyValue::Attachment(_) => "attachment",
			AnyValue::Xml(_) => "xml",
			AnyValue::Complex(_) => "complex",
		}
	}
}

macro_rules! any_value_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for AnyValue {
				fn from(value: $ty) -> Self {
					AnyValue::$variant(value)
				}
			}
		)*
	};
}

any_value_from! {
	String => Unicode,
	Vec<u8> => Bytes,
	Vec<Vec<u8>> => ByteArray,
	Decimal => Decimal,
	f64 => Double,
	i64 => Integer,
	bool => Boolean,
	NaiveTime => Time,
	DateTimeValue => DateTime,
	NaiveDate => Date,
	TimeDelta => Duration,
	Attachment => Attachment,
	XmlElement => Xml,
	ComplexValue => Complex,
}

impl From<&str> for AnyValue {
	fn from(value: &str) -> Self {
		AnyValue::Unicode(value.to_string())
	}
}

impl From<i32> for AnyValue {
	fn from(value: i32) -> Self {
		AnyValue::Integer(value.into())
	}
}

/// An instance of a composite type: member name to value, in insertion order.
///
/// Absent members are simply not present.
///
/// # Examples
///
/// ```
/// use wirekit_model::{AnyValue, ComplexValue};
///
/// let value = ComplexValue::new().with("a", 1).with("b", "x");
/// assert_eq!(value.get("a"), Some(&AnyValue::Integer(1)));
/// assert!(value.get("c").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexValue {
	fields: IndexMap<String, AnyValue>,
}

impl ComplexValue {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, name: impl Into<String>, value: impl Into<AnyValue>) -> Self {
		self.set(name, value);
		self
	}

	pub fn set(&mut self, name: impl Into<String>, value: impl Into<AnyValue>) {
		self.fields.insert(name.into(), value.into());
	}

	pub fn get(&self, name: &str) -> Option<&AnyValue> {
		self.fields.get(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &AnyValue)> {
		self.fields.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

/// Descriptor contract for composite (multi-field) types.
///
/// The mapping-form converter only asks the descriptor for the instance to
/// serialize and for its `(name, wire value)` member pairs; how each member is
/// marshaled is up to the implementor.
pub trait ComplexModelType {
	type Value;

	fn model(&self) -> &ModelType;

	/// The instance that actually backs `value` during serialization.
	fn get_serialization_instance<'a>(&self, value: &'a Self::Value) -> &'a Self::Value {
		value
	}

	/// Declared members of `instance` with their marshaled values, in a stable
	/// order.
	fn get_members_pairs(
		&self,
		instance: &Self::Value,
	) -> MarshalResult<Vec<(String, serde_json::Value)>>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_insertion_order_is_kept() {
		let value = ComplexValue::new()
			.with("z", true)
			.with("a", 1.5)
			.with("m", "text");

		let names: Vec<&str> = value.iter().map(|(name, _)| name).collect();
		assert_eq!(names, vec!["z", "a", "m"]);
		assert_eq!(value.len(), 3);
	}

	#[rstest]
	fn test_set_replaces_in_place() {
		let mut value = ComplexValue::new().with("a", 1).with("b", 2);
		value.set("a", 3);

		let names: Vec<&str> = value.iter().map(|(name, _)| name).collect();
		assert_eq!(names, vec!["a", "b"]);
		assert_eq!(value.get("a"), Some(&AnyValue::Integer(3)));
	}

	#[rstest]
	#[case(AnyValue::from("x"), "unicode")]
	#[case(AnyValue::from(vec![vec![1u8]]), "byte array")]
	#[case(AnyValue::from(ComplexValue::new()), "complex")]
	#[case(AnyValue::from(Attachment::from_data(b"x".to_vec())), "attachment")]
	#[case(AnyValue::from(XmlElement::new("a")), "xml")]
	fn test_shape_names(#[case] value: AnyValue, #[case] expected: &str) {
		assert_eq!(value.shape(), expected);
	}
}
