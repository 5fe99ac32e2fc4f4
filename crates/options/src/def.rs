use crate::{OptionContext, OptionDefault, OptionError, OptionType, OptionValue};

/// Write-time validator and transformer.
///
/// Receives the value being written and returns the value to store, or a
/// human-readable rejection reason. The context reads other options through
/// the scope being written, so bounds may come from live option values.
pub type OptionValidator = fn(&OptionContext<'_>, OptionValue) -> Result<OptionValue, String>;

/// Computes a default from other options visible through a scope.
pub type DeriveFn = fn(&OptionContext<'_>) -> Result<OptionValue, OptionError>;

/// Definition of a configurable option.
///
/// Definitions are `'static` and registered by reference; registering the
/// same instance twice is a no-op while a different instance under the same
/// name is rejected.
pub struct OptionDef {
	/// Unique option name (e.g., "view.zoom-level").
	pub name: &'static str,
	/// Human-readable description.
	pub description: &'static str,
	/// Value type constraint.
	pub value_type: OptionType,
	/// Default value factory.
	pub default: OptionDefault,
	/// Optional validator applied on every write.
	pub validator: Option<OptionValidator>,
	/// Compute the default once per registry instead of on every read.
	///
	/// Only valid for non-derived defaults.
	pub cacheable: bool,
}

impl core::fmt::Debug for OptionDef {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("OptionDef")
			.field("name", &self.name)
			.field("value_type", &self.value_type)
			.field("default", &self.default)
			.field("validated", &self.validator.is_some())
			.field("cacheable", &self.cacheable)
			.finish()
	}
}

impl OptionDef {
	/// Checks the definition's internal consistency.
	pub(crate) fn check(&self) -> Result<(), OptionError> {
		if self.name.trim().is_empty() {
			return Err(OptionError::InvalidArgument("option name must not be empty".into()));
		}
		if self.default.value_type() != self.value_type {
			return Err(OptionError::TypeMismatch {
				option: self.name.to_string(),
				expected: self.value_type,
				got: self.default.value_type(),
			});
		}
		if self.cacheable && self.default.is_derived() {
			return Err(OptionError::InvalidArgument(format!(
				"option '{}' has a derived default and cannot be cacheable",
				self.name
			)));
		}
		Ok(())
	}
}
