//! Error types shared by every converter
//!
//! Converters report exactly two kinds of failure: a [`ValidationError`] when the
//! incoming wire text violates the type's lexical grammar or policy, and a
//! programming error (configuration, type misuse, I/O on attachments) when the
//! type or value itself was declared or populated incorrectly.

use std::path::PathBuf;

/// Malformed or out-of-policy input.
///
/// Carries the offending input verbatim together with a human readable
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
	pub input: String,
	pub message: String,
}

impl ValidationError {
	/// Creates a new validation failure for `input`.
	///
	/// # Examples
	///
	/// ```
	/// use wirekit_model::ValidationError;
	///
	/// let err = ValidationError::new("abc", "'abc' is not a number");
	/// assert_eq!(err.input, "abc");
	/// assert_eq!(err.to_string(), "'abc' is not a number");
	/// ```
	pub fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
		let input = input.into();
		let message = message.into();
		tracing::debug!(input = %input, message = %message, "validation failed");
		Self { input, message }
	}
}

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum MarshalError {
	#[error("Validation error: {0}")]
	Validation(#[from] ValidationError),
	#[error("Configuration error: {0}")]
	Configuration(String),
	#[error("Type error: {0}")]
	Type(String),
	#[error("Could not read attachment {path:?}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

pub type MarshalResult<T> = Result<T, MarshalError>;

impl MarshalError {
	/// Shorthand for a [`MarshalError::Validation`] failure.
	pub fn validation(input: impl Into<String>, message: impl Into<String>) -> Self {
		MarshalError::Validation(ValidationError::new(input, message))
	}

	pub fn configuration(message: impl Into<String>) -> Self {
		MarshalError::Configuration(message.into())
	}

	/// Returns true when the failure was caused by bad wire input.
	pub fn is_validation(&self) -> bool {
		matches!(self, MarshalError::Validation(_))
	}

	/// Returns true when the failure is a defect in how a type or value was
	/// declared rather than in the incoming data.
	pub fn is_programming_error(&self) -> bool {
		matches!(
			self,
			MarshalError::Configuration(_) | MarshalError::Type(_) | MarshalError::Io { .. }
		)
	}

	/// Returns the validation failure, if this is one.
	pub fn as_validation(&self) -> Option<&ValidationError> {
		match self {
			MarshalError::Validation(e) => Some(e),
			_ => None,
		}
	}
}
