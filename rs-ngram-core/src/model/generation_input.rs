use crate::error::ModelError;

/// Highest model order a request may ask for.
pub const MAX_ORDER: usize = 10;

/// Highest number of words a request may ask for.
pub const MAX_LENGTH: usize = 10_000;

/// Strategy used to pick the words generation starts from.
///
/// # Variants
/// - `Custom(String)`: the words typed by the user, split on whitespace.
///   Must hold exactly `n-1` words, so a blank prefix is rejected.
/// - `Random`: a random `n-1` word window of the corpus. Only chosen when
///   the caller leaves the prefix out altogether.
#[derive(Clone, Debug, PartialEq)]
pub enum StartSeed {
	Custom(String),
	Random,
}

impl StartSeed {
	/// Builds the seed from an optional raw prefix. `None` means `Random`.
	pub fn from_prefix(prefix: Option<&str>) -> Self {
		match prefix {
			Some(prefix) => StartSeed::Custom(prefix.trim().to_owned()),
			None => StartSeed::Random,
		}
	}
}

/// Validated parameters of a generation request.
///
/// Built at the boundary (HTML form, query string, command line) so the
/// generator itself only ever sees well-formed values.
///
/// # Invariants
/// - `2 <= n <= MAX_ORDER`
/// - `length <= MAX_LENGTH`
/// - A `Custom` seed is checked against `n - 1` when the request runs, since
///   a random seed always has the right size
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationInput {
	/// Order of the model.
	n: usize,

	/// Where generation starts.
	pub start_seed: StartSeed,

	/// Total number of words wanted, prefix included.
	length: usize,
}

impl GenerationInput {
	/// Creates an input from already typed values.
	///
	/// # Errors
	/// - `InvalidOrder` if `n` is outside `2..=MAX_ORDER`
	/// - `LengthTooLarge` if `length > MAX_LENGTH`
	pub fn new(n: usize, start_seed: StartSeed, length: usize) -> Result<Self, ModelError> {
		let mut input = Self { n: 2, start_seed, length: 0 };
		input.set_n(n)?;
		input.set_length(length)?;
		Ok(input)
	}

	/// Parses the raw fields of a form or query string.
	///
	/// A missing prefix asks for a random seed. A present one, even blank,
	/// is taken as typed.
	///
	/// # Errors
	/// - `InvalidNumericInput` if `n` or `length` is not a non-negative integer
	/// - `InvalidOrder` / `LengthTooLarge` as in `new`
	pub fn parse(n: &str, prefix: Option<&str>, length: &str) -> Result<Self, ModelError> {
		let n = parse_field("n", n)?;
		let length = parse_field("length", length)?;
		Self::new(n, StartSeed::from_prefix(prefix), length)
	}

	/// Returns the model order.
	pub fn n(&self) -> usize {
		self.n
	}

	/// Sets the model order.
	///
	/// # Errors
	/// Returns `InvalidOrder` if `n` is outside `2..=MAX_ORDER`.
	pub fn set_n(&mut self, n: usize) -> Result<(), ModelError> {
		if !(2..=MAX_ORDER).contains(&n) {
			return Err(ModelError::InvalidOrder(n));
		}
		self.n = n;
		Ok(())
	}

	/// Returns the requested number of words.
	pub fn length(&self) -> usize {
		self.length
	}

	/// Sets the requested number of words.
	///
	/// # Errors
	/// Returns `LengthTooLarge` if `length > MAX_LENGTH`.
	pub fn set_length(&mut self, length: usize) -> Result<(), ModelError> {
		if length > MAX_LENGTH {
			return Err(ModelError::LengthTooLarge { max: MAX_LENGTH, got: length });
		}
		self.length = length;
		Ok(())
	}

	/// Words of a custom seed, checked against `n - 1`.
	///
	/// Returns `Ok(None)` for a random seed.
	///
	/// # Errors
	/// Returns `InvalidPrefixLength` if the custom prefix has the wrong size.
	pub fn custom_words(&self) -> Result<Option<Vec<String>>, ModelError> {
		match &self.start_seed {
			StartSeed::Random => Ok(None),
			StartSeed::Custom(prefix) => {
				let words: Vec<String> = prefix.split_whitespace().map(str::to_owned).collect();
				if words.len() != self.n - 1 {
					return Err(ModelError::InvalidPrefixLength { expected: self.n - 1, got: words.len() });
				}
				Ok(Some(words))
			}
		}
	}
}

/// Parses a non-negative integer field, surrounding spaces allowed.
pub fn parse_field(field: &'static str, value: &str) -> Result<usize, ModelError> {
	value
		.trim()
		.parse::<usize>()
		.map_err(|_| ModelError::InvalidNumericInput { field, value: value.to_owned() })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_valid_input() {
		let input = GenerationInput::parse(" 3", Some("of man"), "12 ").unwrap();
		assert_eq!(input.n(), 3);
		assert_eq!(input.length(), 12);
		assert_eq!(input.start_seed, StartSeed::Custom("of man".to_owned()));
		assert_eq!(input.custom_words().unwrap(), Some(vec!["of".to_owned(), "man".to_owned()]));
	}

	#[test]
	fn test_parse_missing_prefix_is_random() {
		let input = GenerationInput::parse("3", None, "5").unwrap();
		assert_eq!(input.start_seed, StartSeed::Random);
		assert_eq!(input.custom_words().unwrap(), None);
	}

	#[test]
	fn test_blank_prefix_is_rejected() {
		for prefix in ["", "   "] {
			let input = GenerationInput::parse("3", Some(prefix), "5").unwrap();
			assert_eq!(input.start_seed, StartSeed::Custom(String::new()));
			let err = input.custom_words().unwrap_err();
			assert!(matches!(err, ModelError::InvalidPrefixLength { expected: 2, got: 0 }));
			assert_eq!(err.user_message(), "Please enter exactly 2 words.");
		}
	}

	#[test]
	fn test_parse_invalid_numbers() {
		for (n, length, field) in [("abc", "5", "n"), ("3", "", "length"), ("-2", "5", "n"), ("3", "4.5", "length")] {
			match GenerationInput::parse(n, Some("a b"), length) {
				Err(ModelError::InvalidNumericInput { field: f, .. }) => assert_eq!(f, field),
				other => panic!("unexpected {other:?}"),
			}
		}
	}

	#[test]
	fn test_parse_order_out_of_range() {
		assert!(matches!(GenerationInput::parse("1", None, "5"), Err(ModelError::InvalidOrder(1))));
		assert!(matches!(GenerationInput::parse("11", None, "5"), Err(ModelError::InvalidOrder(11))));
		assert!(GenerationInput::parse("10", None, "5").is_ok());
	}

	#[test]
	fn test_parse_huge_length() {
		let result = GenerationInput::parse("3", Some("of man"), "18446744073709551615");
		assert!(matches!(result, Err(ModelError::LengthTooLarge { max: MAX_LENGTH, got: usize::MAX })));
		assert!(GenerationInput::parse("3", Some("of man"), "10000").is_ok());
	}

	#[test]
	fn test_custom_words_wrong_count() {
		let input = GenerationInput::parse("4", Some("of man"), "10").unwrap();
		let err = input.custom_words().unwrap_err();
		assert!(matches!(err, ModelError::InvalidPrefixLength { expected: 3, got: 2 }));
		assert_eq!(err.user_message(), "Please enter exactly 3 words.");
	}

	#[test]
	fn test_setters() {
		let mut input = GenerationInput::new(2, StartSeed::Random, 4).unwrap();
		assert!(input.set_n(0).is_err());
		assert!(input.set_n(MAX_ORDER + 1).is_err());
		assert_eq!(input.n(), 2);
		input.set_n(5).unwrap();
		assert_eq!(input.n(), 5);

		assert!(input.set_length(MAX_LENGTH + 1).is_err());
		assert_eq!(input.length(), 4);
	}
}
