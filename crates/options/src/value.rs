use core::fmt;

use crate::{DeriveFn, OptionContext, OptionError};

/// The value of an option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
	/// Boolean value (true/false).
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value. Always finite once stored.
	Float(f64),
	/// String value.
	String(String),
}

impl OptionValue {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			OptionValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			OptionValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			OptionValue::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			OptionValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the [`OptionType`] of this value.
	pub fn value_type(&self) -> OptionType {
		match self {
			OptionValue::Bool(_) => OptionType::Bool,
			OptionValue::Int(_) => OptionType::Int,
			OptionValue::Float(_) => OptionType::Float,
			OptionValue::String(_) => OptionType::String,
		}
	}

	/// Returns true if this value matches the given type.
	pub fn matches_type(&self, ty: OptionType) -> bool {
		self.value_type() == ty
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		self.value_type().name()
	}
}

impl fmt::Display for OptionValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptionValue::Bool(v) => write!(f, "{v}"),
			OptionValue::Int(v) => write!(f, "{v}"),
			OptionValue::Float(v) => write!(f, "{v}"),
			OptionValue::String(v) => write!(f, "{v:?}"),
		}
	}
}

impl From<bool> for OptionValue {
	fn from(v: bool) -> Self {
		OptionValue::Bool(v)
	}
}

impl From<i64> for OptionValue {
	fn from(v: i64) -> Self {
		OptionValue::Int(v)
	}
}

impl From<f64> for OptionValue {
	fn from(v: f64) -> Self {
		OptionValue::Float(v)
	}
}

impl From<String> for OptionValue {
	fn from(v: String) -> Self {
		OptionValue::String(v)
	}
}

impl From<&str> for OptionValue {
	fn from(v: &str) -> Self {
		OptionValue::String(v.to_string())
	}
}

/// The type of an option's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
	/// Boolean type.
	Bool,
	/// Integer type.
	Int,
	/// Floating point type.
	Float,
	/// String type.
	String,
}

impl OptionType {
	/// Lowercase name used in error messages.
	pub const fn name(self) -> &'static str {
		match self {
			OptionType::Bool => "bool",
			OptionType::Int => "int",
			OptionType::Float => "float",
			OptionType::String => "string",
		}
	}
}

impl fmt::Display for OptionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Typed carrier for option default values.
///
/// The scalar variants hold factories that take no input (they may still read
/// the environment). [`OptionDefault::Derived`] computes the default from other
/// option values visible in the scope being read.
#[derive(Clone, Copy)]
pub enum OptionDefault {
	/// Boolean default value factory.
	Bool(fn() -> bool),
	/// Integer default value factory.
	Int(fn() -> i64),
	/// Float default value factory.
	Float(fn() -> f64),
	/// String default value factory.
	String(fn() -> String),
	/// Default computed from live option values; the type is declared up front.
	Derived(OptionType, DeriveFn),
}

impl fmt::Debug for OptionDefault {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptionDefault::Bool(_) => f.write_str("OptionDefault::Bool(..)"),
			OptionDefault::Int(_) => f.write_str("OptionDefault::Int(..)"),
			OptionDefault::Float(_) => f.write_str("OptionDefault::Float(..)"),
			OptionDefault::String(_) => f.write_str("OptionDefault::String(..)"),
			OptionDefault::Derived(ty, _) => write!(f, "OptionDefault::Derived({ty}, ..)"),
		}
	}
}

impl OptionDefault {
	/// Returns the [`OptionType`] produced by this default.
	pub const fn value_type(self) -> OptionType {
		match self {
			OptionDefault::Bool(_) => OptionType::Bool,
			OptionDefault::Int(_) => OptionType::Int,
			OptionDefault::Float(_) => OptionType::Float,
			OptionDefault::String(_) => OptionType::String,
			OptionDefault::Derived(ty, _) => ty,
		}
	}

	/// Returns true if the default depends on the scope it is read through.
	pub const fn is_derived(self) -> bool {
		matches!(self, OptionDefault::Derived(..))
	}

	/// Invokes the factory and returns the value as an [`OptionValue`].
	pub(crate) fn compute(self, option: &str, ctx: &OptionContext<'_>) -> Result<OptionValue, OptionError> {
		let value = match self {
			OptionDefault::Bool(f) => OptionValue::Bool(f()),
			OptionDefault::Int(f) => OptionValue::Int(f()),
			OptionDefault::Float(f) => OptionValue::Float(f()),
			OptionDefault::String(f) => OptionValue::String(f()),
			OptionDefault::Derived(_, f) => f(ctx)?,
		};
		if !value.matches_type(self.value_type()) {
			return Err(OptionError::TypeMismatch {
				option: option.to_string(),
				expected: self.value_type(),
				got: value.value_type(),
			});
		}
		Ok(value)
	}
}

// Seal the FromOptionValue trait to prevent external implementations.
mod sealed {
	pub trait Sealed {}
	impl Sealed for i64 {}
	impl Sealed for bool {}
	impl Sealed for f64 {}
	impl Sealed for String {}
}

/// Trait for Rust types an option can hold.
pub trait FromOptionValue: sealed::Sealed + Sized + 'static {
	/// Extracts the value from an `OptionValue`, returning `None` if the type doesn't match.
	fn from_option(value: &OptionValue) -> Option<Self>;

	/// Wraps the value in its `OptionValue` variant.
	fn into_option(self) -> OptionValue;

	/// Returns the `OptionType` corresponding to this Rust type.
	fn option_type() -> OptionType;
}

impl FromOptionValue for i64 {
	fn from_option(value: &OptionValue) -> Option<Self> {
		value.as_int()
	}

	fn into_option(self) -> OptionValue {
		OptionValue::Int(self)
	}

	fn option_type() -> OptionType {
		OptionType::Int
	}
}

impl FromOptionValue for bool {
	fn from_option(value: &OptionValue) -> Option<Self> {
		value.as_bool()
	}

	fn into_option(self) -> OptionValue {
		OptionValue::Bool(self)
	}

	fn option_type() -> OptionType {
		OptionType::Bool
	}
}

impl FromOptionValue for f64 {
	fn from_option(value: &OptionValue) -> Option<Self> {
		value.as_float()
	}

	fn into_option(self) -> OptionValue {
		OptionValue::Float(self)
	}

	fn option_type() -> OptionType {
		OptionType::Float
	}
}

impl FromOptionValue for String {
	fn from_option(value: &OptionValue) -> Option<Self> {
		value.as_str().map(|s| s.to_string())
	}

	fn into_option(self) -> OptionValue {
		OptionValue::String(self)
	}

	fn option_type() -> OptionType {
		OptionType::String
	}
}
