use crate::{FromOptionValue, OptionError, OptionKey, OptionRegistry, OptionValue, Scope};

/// Read access to live option values, handed to validators and derived defaults.
#[derive(Clone, Copy)]
pub struct OptionContext<'a> {
	registry: &'a OptionRegistry,
	scope: &'a Scope,
}

impl<'a> OptionContext<'a> {
	pub fn new(registry: &'a OptionRegistry, scope: &'a Scope) -> Self {
		Self { registry, scope }
	}

	pub fn registry(&self) -> &'a OptionRegistry {
		self.registry
	}

	/// The scope the current read or write goes through.
	pub fn scope(&self) -> &'a Scope {
		self.scope
	}

	/// Reads the effective value of another option in the same scope.
	pub fn get<T: FromOptionValue>(&self, key: OptionKey<T>) -> Result<T, OptionError> {
		self.registry.get(self.scope, key)
	}

	pub fn get_raw(&self, name: &str) -> Result<OptionValue, OptionError> {
		self.registry.get_raw(self.scope, name)
	}
}
