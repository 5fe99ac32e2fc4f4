use crate::OptionType;

/// Error type for option registry operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionError {
	/// A required argument was missing or unusable.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// No definition is registered under the name.
	#[error("unknown option: {key}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	UndefinedKey {
		/// The unrecognized option name.
		key: String,
		/// A suggested alternative, if one is close enough.
		suggestion: Option<String>,
	},

	/// The value type does not match the option's declared type.
	#[error("type mismatch for option '{option}': expected {expected}, got {got}")]
	TypeMismatch {
		/// The option name.
		option: String,
		/// The declared type.
		expected: OptionType,
		/// The type that was supplied.
		got: OptionType,
	},

	/// A different definition is already registered under the name.
	#[error("option '{key}' is already registered by a different definition")]
	DuplicateKey {
		/// The conflicting option name.
		key: String,
	},

	/// The value was rejected by the option's validator.
	#[error("invalid value for option '{option}': {reason}")]
	InvalidValue {
		/// The option name.
		option: String,
		/// Human-readable reason for validation failure.
		reason: String,
	},
}

impl OptionError {
	pub(crate) fn undefined(key: &str) -> Self {
		Self::UndefinedKey {
			key: key.to_string(),
			suggestion: None,
		}
	}
}
