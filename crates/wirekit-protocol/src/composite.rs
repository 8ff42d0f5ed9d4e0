//! Declarative composite descriptors
//!
//! A [`ComplexModel`] lists its members in declaration order. Each member
//! carries its own [`ModelType`] and a [`MemberKind`] that selects the
//! converter used for it, so the mapping form of a composite is the mapping
//! of each member's own wire form.

use crate::converters::{
	any_xml_to_string, attachment_to_string, boolean_to_string, byte_array_to_string,
	complex_model_base_to_dict, date_to_string, datetime_to_string, decimal_to_string,
	double_to_string, duration_to_string, integer_to_string, time_to_string, unicode_from_string,
	unicode_to_string,
};
use crate::wire::WireInput;
use serde_json::Value;
use wirekit_model::{
	AnyValue, ComplexModelType, ComplexValue, MarshalError, MarshalResult, ModelType,
};

/// Which converter marshals a member.
#[derive(Debug, Clone)]
pub enum MemberKind {
	Unicode,
	/// Opaque bytes, shown as text decoded with the member type's encoding.
	String,
	Decimal,
	Double,
	Integer,
	Boolean,
	Time,
	DateTime,
	Date,
	Duration,
	ByteArray,
	/// Attachment data, encoded with the member type's byte-array codec.
	Attachment,
	AnyXml,
	Complex(Box<ComplexModel>),
}

#[derive(Debug, Clone)]
pub struct Member {
	pub name: String,
	pub ty: ModelType,
	pub kind: MemberKind,
}

impl Member {
	fn to_wire(&self, value: Option<&AnyValue>) -> MarshalResult<Value> {
		let ty = &self.ty;
		if let MemberKind::Complex(model) = &self.kind {
			let nested = match value {
				None => None,
				Some(AnyValue::Complex(nested)) => Some(nested),
				Some(other) => return Err(self.mismatch(other)),
			};
			return complex_model_base_to_dict(model.as_ref(), nested);
		}
		let Some(value) = value else {
			return Ok(Value::Null);
		};

		let text = match (&self.kind, value) {
			(MemberKind::Unicode, AnyValue::Unicode(v)) => {
				unicode_to_string(ty, Some(v.as_str()))?.into_text()?
			}
			(MemberKind::String, AnyValue::Bytes(v)) => {
				unicode_from_string(ty, Some(WireInput::Bytes(v)))?.unwrap_or_default()
			}
			(MemberKind::Decimal, AnyValue::Decimal(v)) => decimal_to_string(ty, Some(v))?,
			(MemberKind::Double, AnyValue::Double(v)) => double_to_string(ty, Some(v))?,
			(MemberKind::Integer, AnyValue::Integer(v)) => integer_to_string(ty, Some(v))?,
			(MemberKind::Boolean, AnyValue::Boolean(v)) => boolean_to_string(ty, Some(v))?,
			(MemberKind::Time, AnyValue::Time(v)) => time_to_string(ty, Some(v))?,
			(MemberKind::DateTime, AnyValue::DateTime(v)) => datetime_to_string(ty, Some(v))?,
			(MemberKind::Date, AnyValue::Date(v)) => date_to_string(ty, Some(v))?,
			(MemberKind::Duration, AnyValue::Duration(v)) => duration_to_string(ty, Some(v))?,
			(MemberKind::ByteArray, AnyValue::ByteArray(v)) => {
				byte_array_to_string(ty, Some(v.as_slice()))?
			}
			(MemberKind::Attachment, AnyValue::Attachment(v)) => {
				let data = attachment_to_string(ty, Some(v))?;
				byte_array_to_string(ty, Some(std::slice::from_ref(&data)))?
			}
			(MemberKind::AnyXml, AnyValue::Xml(v)) => any_xml_to_string(ty, Some(v))?,
			(_, other) => return Err(self.mismatch(other)),
		};
		Ok(Value::String(text))
	}

	fn mismatch(&self, value: &AnyValue) -> MarshalError {
		MarshalError::configuration(format!(
			"Member '{}' is declared as {} but holds a {} value",
			self.name,
			self.kind_name(),
			value.shape()
		))
	}

	fn kind_name(&self) -> &str {
		match &self.kind {
			MemberKind::Unicode => "unicode",
			MemberKind::String => "string",
			MemberKind::Decimal => "decimal",
			MemberKind::Double => "double",
			MemberKind::Integer => "integer",
			MemberKind::Boolean => "boolean",
			MemberKind::Time => "time",
			MemberKind::DateTime => "datetime",
			MemberKind::Date => "date",
			MemberKind::Duration => "duration",
			MemberKind::ByteArray => "byte array",
			MemberKind::Attachment => "attachment",
			MemberKind::AnyXml => "xml",
			MemberKind::Complex(model) => model.model.type_name(),
		}
	}
}

/// A composite type declared as an ordered list of members.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wirekit_model::{ComplexValue, ModelType};
/// use wirekit_protocol::{ComplexModel, MemberKind, complex_model_base_to_dict};
///
/// let point = ComplexModel::new(ModelType::new("Point"))
///     .member("a", MemberKind::Integer, ModelType::new("integer"))
///     .member("b", MemberKind::Unicode, ModelType::new("string"));
///
/// let value = ComplexValue::new().with("a", 1).with("b", "x");
/// assert_eq!(
///     complex_model_base_to_dict(&point, Some(&value)).unwrap(),
///     json!({"a": "1", "b": "x"})
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ComplexModel {
	model: ModelType,
	members: Vec<Member>,
}

impl ComplexModel {
	pub fn new(model: ModelType) -> Self {
		Self {
			model,
			members: Vec::new(),
		}
	}

	/// Appends a member. Redeclaring a name replaces the earlier member in
	/// place.
	pub fn member(mut self, name: impl Into<String>, kind: MemberKind, ty: ModelType) -> Self {
		let member = Member {
			name: name.into(),
			ty,
			kind,
		};
		match self.members.iter_mut().find(|m| m.name == member.name) {
			Some(existing) => *existing = member,
			None => self.members.push(member),
		}
		self
	}

	/// Appends a nested composite member.
	pub fn complex_member(self, name: impl Into<String>, nested: ComplexModel) -> Self {
		let ty = nested.model.clone();
		self.member(name, MemberKind::Complex(Box::new(nested)), ty)
	}

	pub fn members(&self) -> &[Member] {
		&self.members
	}
}

impl ComplexModelType for ComplexModel {
	type Value = ComplexValue;

	fn model(&self) -> &ModelType {
		&self.model
	}

	/// Declared members only, in declaration order. Undeclared fields of the
	/// value are not emitted; absent members marshal to null.
	fn get_members_pairs(&self, instance: &ComplexValue) -> MarshalResult<Vec<(String, Value)>> {
		self.members
			.iter()
			.map(|member| Ok((member.name.clone(), member.to_wire(instance.get(&member.name))?)))
			.collect()
	}
}
