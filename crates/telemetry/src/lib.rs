//! Structured payloads attached to telemetry events.
//!
//! A [`ComplexProperty`] carries one arbitrary value alongside an event. It is
//! a holder only: nothing here sends, batches or persists events.

use serde::Serialize;
use serde_json::Value;


/// Errors raised while building telemetry properties.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
	#[error("failed to serialize telemetry property: {0}")]
	Serialize(#[from] serde_json::Error),
}

/// A structured telemetry property value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplexProperty {
	value: Value,
}

impl ComplexProperty {
	/// Captures `value` by serializing it.
	///
	/// Fails if `value` cannot be represented as JSON, e.g. a map with
	/// non-string keys.
	pub fn new<T: Serialize>(value: T) -> Result<Self, TelemetryError> {
		Ok(Self {
			value: serde_json::to_value(value)?,
		})
	}

	pub fn value(&self) -> &Value {
		&self.value
	}

	pub fn into_value(self) -> Value {
		self.value
	}
}

impl From<Value> for ComplexProperty {
	fn from(value: Value) -> Self {
		Self { value }
	}
}
