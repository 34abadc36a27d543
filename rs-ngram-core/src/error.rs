use std::{fmt, io};

use crate::model::generation_input::MAX_ORDER;

/// Errors raised by the language model and its boundary validation.
///
/// Generation itself never fails on valid input: every variant here is
/// produced either while loading the corpus or while validating what the
/// caller handed in.
#[derive(Debug)]
pub enum ModelError {
	/// `n` or `length` could not be parsed as a non-negative integer.
	InvalidNumericInput { field: &'static str, value: String },

	/// The prefix does not hold exactly `n - 1` words.
	InvalidPrefixLength { expected: usize, got: usize },

	/// The n-gram order is out of range (`n < 2` or above `MAX_ORDER` for
	/// generation, `k == 0` for counting).
	InvalidOrder(usize),

	/// The requested length exceeds what a request may ask for.
	LengthTooLarge { max: usize, got: usize },

	/// No (n-1)-gram is available to seed a random prefix.
	NoSeedAvailable(usize),

	/// Reading the corpus file or writing its cache failed.
	Io(io::Error),

	/// The binary corpus cache could not be encoded or decoded.
	Cache(postcard::Error),
}

impl ModelError {
	/// Message shown to an end user (HTML form, CLI).
	///
	/// Validation errors map to the wording of the form; anything else falls
	/// back to `Display`.
	pub fn user_message(&self) -> String {
		match self {
			ModelError::InvalidNumericInput { .. } => "Please ensure all fields are filled correctly.".to_owned(),
			ModelError::InvalidPrefixLength { expected, .. } => format!("Please enter exactly {expected} words."),
			ModelError::InvalidOrder(_) => format!("N-value must be between 2 and {MAX_ORDER}."),
			ModelError::LengthTooLarge { max, .. } => format!("Length must be at most {max} words."),
			other => other.to_string(),
		}
	}
}

impl fmt::Display for ModelError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ModelError::InvalidNumericInput { field, value } => {
				write!(f, "invalid value for {field}: '{value}' is not a non-negative integer")
			}
			ModelError::InvalidPrefixLength { expected, got } => {
				write!(f, "prefix must contain exactly {expected} words, got {got}")
			}
			ModelError::InvalidOrder(n) => write!(f, "invalid n-gram order {n}"),
			ModelError::LengthTooLarge { max, got } => write!(f, "length {got} exceeds the maximum of {max}"),
			ModelError::NoSeedAvailable(n) => write!(f, "no {n}-gram available to seed generation"),
			ModelError::Io(e) => write!(f, "corpus I/O error: {e}"),
			ModelError::Cache(e) => write!(f, "corpus cache error: {e}"),
		}
	}
}

impl std::error::Error for ModelError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			ModelError::Io(e) => Some(e),
			ModelError::Cache(e) => Some(e),
			_ => None,
		}
	}
}

impl From<io::Error> for ModelError {
	fn from(e: io::Error) -> Self {
		ModelError::Io(e)
	}
}

impl From<postcard::Error> for ModelError {
	fn from(e: postcard::Error) -> Self {
		ModelError::Cache(e)
	}
}
