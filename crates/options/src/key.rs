use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::FromOptionValue;

/// Typed handle to an option, identified by name.
///
/// Two keys are equal iff their names match. The type parameter is checked
/// against the registered definition on every registry access, so a key whose
/// `T` disagrees with the definition fails with
/// [`OptionError::TypeMismatch`](crate::OptionError::TypeMismatch) instead of
/// reading a wrongly typed value.
pub struct OptionKey<T: FromOptionValue> {
	name: &'static str,
	_marker: PhantomData<fn() -> T>,
}

impl<T: FromOptionValue> OptionKey<T> {
	/// Creates a typed key for the option registered under `name`.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			_marker: PhantomData,
		}
	}

	/// Returns the option name this key refers to.
	pub const fn name(&self) -> &'static str {
		self.name
	}
}

impl<T: FromOptionValue> Clone for OptionKey<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: FromOptionValue> Copy for OptionKey<T> {}

impl<T: FromOptionValue> PartialEq for OptionKey<T> {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl<T: FromOptionValue> Eq for OptionKey<T> {}

impl<T: FromOptionValue> Hash for OptionKey<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.name.hash(state);
	}
}

impl<T: FromOptionValue> fmt::Debug for OptionKey<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("OptionKey")
			.field(&self.name)
			.field(&T::option_type())
			.finish()
	}
}
