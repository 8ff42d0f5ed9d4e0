//! String-form and mapping-form converters
//!
//! Every public converter takes the type descriptor and an optional value and
//! is built from a non-null implementation passed through one of the
//! [`nillable`](crate::nillable) wrappers.

pub mod binary;
pub mod complex;
pub mod markup;
pub mod numeric;
pub mod temporal;
pub mod text;

pub use binary::{
	attachment_from_string, attachment_to_string, byte_array_from_string, byte_array_to_string,
	file_from_string,
};
pub use complex::{
	complex_model_base_from_string, complex_model_base_to_dict, complex_model_base_to_string,
	fault_to_dict,
};
pub use markup::{any_html_from_string, any_html_to_string, any_xml_from_string, any_xml_to_string};
pub use numeric::{
	boolean_from_string, boolean_to_string, decimal_from_string, decimal_to_string,
	double_from_string, double_to_string, integer_from_string, integer_to_string,
};
pub use temporal::{
	date_from_string, date_to_string, datetime_from_string, datetime_to_string,
	duration_from_string, duration_to_string, time_from_string, time_to_string,
};
pub use text::{
	null_from_string, null_to_string, string_from_string, unicode_from_string, unicode_to_string,
};
