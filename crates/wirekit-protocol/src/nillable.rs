//! Null-guard wrappers
//!
//! Converters only implement the non-null path. These adapters take such a
//! converter and return one that accepts an optional value, so every
//! converter gets the same nil semantics:
//!
//! - string form, outbound: nil renders as the type's `nil_string`
//! - string form, inbound: a nil wire value reads back as `None`
//! - mapping form, outbound: nil renders as wire null

use serde_json::Value;
use wirekit_model::{MarshalResult, ModelType};

/// Wraps a to-string converter.
///
/// # Examples
///
/// ```
/// use wirekit_model::{Attributes, ModelType};
/// use wirekit_protocol::nillable::nillable_string;
///
/// let to_string = nillable_string(|_: &ModelType, value: &i32| Ok::<_, wirekit_model::MarshalError>(value.to_string()));
/// let cls = ModelType::new("int").with_attributes(Attributes::new().with_nil_string("NULL"));
///
/// assert_eq!(to_string(&cls, Some(&3)).unwrap(), "3");
/// assert_eq!(to_string(&cls, None).unwrap(), "NULL");
/// ```
pub fn nillable_string<T, W, F>(f: F) -> impl Fn(&ModelType, Option<&T>) -> MarshalResult<W>
where
	T: ?Sized,
	W: From<String>,
	F: Fn(&ModelType, &T) -> MarshalResult<W>,
{
	move |cls: &ModelType, value: Option<&T>| match value {
		Some(value) => f(cls, value),
		None => Ok(W::from(cls.attributes().nil_string.clone())),
	}
}

/// Wraps a from-string converter. `f` never sees a nil wire value.
pub fn nillable_from_string<I, T, F>(
	f: F,
) -> impl Fn(&ModelType, Option<&I>) -> MarshalResult<Option<T>>
where
	I: ?Sized,
	F: Fn(&ModelType, &I) -> MarshalResult<T>,
{
	move |cls: &ModelType, string: Option<&I>| string.map(|s| f(cls, s)).transpose()
}

/// Wraps a to-mapping converter; nil becomes [`Value::Null`].
pub fn nillable_dict<T, F>(f: F) -> impl Fn(&ModelType, Option<&T>) -> MarshalResult<Value>
where
	T: ?Sized,
	F: Fn(&ModelType, &T) -> MarshalResult<Value>,
{
	move |cls: &ModelType, value: Option<&T>| match value {
		Some(value) => f(cls, value),
		None => Ok(Value::Null),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;
	use wirekit_model::{Attributes, MarshalError};

	#[rstest]
	fn test_nil_string_skips_converter() {
		// Arrange
		let calls = Cell::new(0);
		let to_string = nillable_string(|_: &ModelType, value: &str| {
			calls.set(calls.get() + 1);
			Ok::<String, MarshalError>(value.to_uppercase())
		});
		let cls = ModelType::new("text");

		// Act
		let nil = to_string(&cls, None).unwrap();
		let some = to_string(&cls, Some("ab")).unwrap();

		// Assert
		assert_eq!(nil, "");
		assert_eq!(some, "AB");
		assert_eq!(calls.get(), 1);
	}

	#[rstest]
	fn test_configured_nil_string() {
		let to_string =
			nillable_string(|_: &ModelType, _: &u8| Ok::<String, MarshalError>("x".into()));
		let cls = ModelType::new("byte").with_attributes(Attributes::new().with_nil_string("~"));

		assert_eq!(to_string(&cls, None).unwrap(), "~");
	}

	#[rstest]
	fn test_nil_string_into_bytes() {
		let to_bytes =
			nillable_string(|_: &ModelType, v: &[u8]| Ok::<Vec<u8>, MarshalError>(v.to_vec()));
		let cls = ModelType::new("blob").with_attributes(Attributes::new().with_nil_string("-"));

		assert_eq!(to_bytes(&cls, None).unwrap(), b"-".to_vec());
	}

	#[rstest]
	fn test_from_string_nil_is_none() {
		let from_string = nillable_from_string(|_: &ModelType, s: &str| {
			s.parse::<i32>()
				.map_err(|e| MarshalError::validation(s, e.to_string()))
		});
		let cls = ModelType::new("int");

		assert_eq!(from_string(&cls, None).unwrap(), None);
		assert_eq!(from_string(&cls, Some("7")).unwrap(), Some(7));
		assert!(from_string(&cls, Some("x")).unwrap_err().is_validation());
	}

	#[rstest]
	fn test_dict_nil_is_null() {
		let to_dict = nillable_dict(|_: &ModelType, v: &i32| Ok(Value::from(*v)));
		let cls = ModelType::new("int");

		assert_eq!(to_dict(&cls, None).unwrap(), Value::Null);
		assert_eq!(to_dict(&cls, Some(&2)).unwrap(), Value::from(2));
	}
}
