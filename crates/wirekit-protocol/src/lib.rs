//! # wirekit-protocol
//!
//! Converters between native values and their wire forms.
//!
//! - **String form**: `*_to_string` / `*_from_string` pairs for text, numbers,
//!   booleans, temporal values, byte arrays, markup, files and attachments
//! - **Mapping form**: [`complex_model_base_to_dict`] and [`fault_to_dict`]
//! - **Null handling**: the [`nillable`] wrappers every converter is built on
//! - **Composites**: [`ComplexModel`], a declarative [`ComplexModelType`](wirekit_model::ComplexModelType)
//!
//! Choosing which converter applies to a field is left to the calling
//! protocol layer.
//!
//! ## Examples
//!
//! ```rust
//! use wirekit_model::{Attributes, ModelType};
//! use wirekit_protocol::{decimal_from_string, integer_from_string, integer_to_string};
//!
//! let int = ModelType::new("integer").with_attributes(Attributes::new().with_max_str_len(10));
//!
//! assert_eq!(integer_to_string(&int, Some(&42i64)).unwrap(), "42");
//! assert_eq!(integer_from_string::<i64>(&int, Some("42")).unwrap(), Some(42));
//! assert_eq!(integer_to_string::<i64>(&int, None).unwrap(), "");
//! assert!(decimal_from_string(&int, Some("not a number")).unwrap_err().is_validation());
//! ```

pub mod composite;
pub mod converters;
pub mod format;
pub mod nillable;
pub mod wire;

pub use composite::{ComplexModel, Member, MemberKind};
pub use converters::*;
pub use wire::{StringForm, WireInput};
