//! Shared parsing utilities for option values.
//!
//! Used by [`OptionRegistry::set_from_str`](crate::OptionRegistry::set_from_str)
//! for `:set name value` style input.

use crate::{OptionType, OptionValue};

#[cfg(test)]
mod tests;

/// Parse a string value into an [`OptionValue`] for a known type.
pub fn parse_value_for_type(value: &str, ty: OptionType) -> Result<OptionValue, String> {
	match ty {
		OptionType::Bool => parse_bool(value).map(OptionValue::Bool),
		OptionType::Int => parse_int(value).map(OptionValue::Int),
		OptionType::Float => parse_float(value).map(OptionValue::Float),
		OptionType::String => Ok(OptionValue::String(value.to_string())),
	}
}

/// Parse a boolean value from common string representations.
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(format!(
			"invalid boolean: '{value}' (expected true/false, yes/no, on/off, 1/0)"
		)),
	}
}

/// Parse an integer value.
pub fn parse_int(value: &str) -> Result<i64, String> {
	value
		.trim()
		.parse::<i64>()
		.map_err(|_| format!("invalid integer: '{value}'"))
}

/// Parse a finite floating point value. A trailing `%` is accepted and ignored.
pub fn parse_float(value: &str) -> Result<f64, String> {
	let trimmed = value.trim();
	let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
	match number.parse::<f64>() {
		Ok(v) if v.is_finite() => Ok(v),
		_ => Err(format!("invalid number: '{value}'")),
	}
}
