//! Composite and fault converters

use crate::nillable::{nillable_dict, nillable_from_string, nillable_string};
use serde_json::{Map, Value};
use wirekit_model::{ComplexModelType, Fault, MarshalError, MarshalResult, ModelType};

const ONLY_PRIMITIVES: &str = "Only primitives can be serialized to string.";

/// Composite types have no string form; any non-nil value is a type error.
pub fn complex_model_base_to_string<C>(cls: &C, value: Option<&C::Value>) -> MarshalResult<String>
where
	C: ComplexModelType,
{
	nillable_string(|_: &ModelType, _: &C::Value| Err(MarshalError::Type(ONLY_PRIMITIVES.into())))(
		cls.model(),
		value,
	)
}

/// Composite types cannot be read from a string; any non-nil input is a type
/// error.
pub fn complex_model_base_from_string<C>(
	cls: &C,
	string: Option<&str>,
) -> MarshalResult<Option<C::Value>>
where
	C: ComplexModelType,
{
	nillable_from_string(|_: &ModelType, _: &str| -> MarshalResult<C::Value> {
		Err(MarshalError::Type(ONLY_PRIMITIVES.into()))
	})(cls.model(), string)
}

/// Maps each declared member of the value to its own wire form, in the
/// descriptor's member order.
pub fn complex_model_base_to_dict<C>(cls: &C, value: Option<&C::Value>) -> MarshalResult<Value>
where
	C: ComplexModelType,
{
	nillable_dict(|_: &ModelType, value: &C::Value| {
		let instance = cls.get_serialization_instance(value);
		let members = cls.get_members_pairs(instance)?;
		Ok(Value::Object(members.into_iter().collect()))
	})(cls.model(), value)
}

/// `{type_name: {faultcode, faultstring, detail}}`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wirekit_model::{Fault, ModelType};
/// use wirekit_protocol::fault_to_dict;
///
/// let cls = ModelType::new("Fault");
/// assert_eq!(
///     fault_to_dict(&cls, &Fault::server("boom")),
///     json!({"Fault": {"faultcode": "Server", "faultstring": "boom", "detail": null}})
/// );
/// ```
pub fn fault_to_dict(cls: &ModelType, value: &Fault) -> Value {
	let mut fields = Map::new();
	fields.insert("faultcode".into(), Value::String(value.faultcode.clone()));
	fields.insert("faultstring".into(), Value::String(value.faultstring.clone()));
	fields.insert("detail".into(), value.detail.clone().unwrap_or(Value::Null));

	let mut mapping = Map::new();
	mapping.insert(cls.type_name().to_string(), Value::Object(fields));
	Value::Object(mapping)
}
