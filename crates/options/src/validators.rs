//! Standard validators for option values.
//!
//! Functions with the [`OptionValidator`](crate::OptionValidator) signature can
//! be used directly in a definition; the rest are building blocks for
//! option-specific validators.

use crate::{OptionContext, OptionKey, OptionValue};

#[cfg(test)]
mod tests;

/// Validates that an integer is positive (>= 1).
pub fn positive_int(_ctx: &OptionContext<'_>, value: OptionValue) -> Result<OptionValue, String> {
	match value {
		OptionValue::Int(n) if n >= 1 => Ok(value),
		OptionValue::Int(n) => Err(format!("must be at least 1, got {n}")),
		other => Err(format!("expected integer, got {}", other.type_name())),
	}
}

/// Validates that a float is strictly positive.
pub fn positive_float(_ctx: &OptionContext<'_>, value: OptionValue) -> Result<OptionValue, String> {
	match value {
		OptionValue::Float(n) if n > 0.0 => Ok(value),
		OptionValue::Float(n) => Err(format!("must be greater than 0, got {n}")),
		other => Err(format!("expected float, got {}", other.type_name())),
	}
}

/// Validates that a string is not blank and trims surrounding whitespace.
pub fn non_empty_string(_ctx: &OptionContext<'_>, value: OptionValue) -> Result<OptionValue, String> {
	match value {
		OptionValue::String(s) if !s.trim().is_empty() => Ok(OptionValue::String(s.trim().to_string())),
		OptionValue::String(_) => Err("must not be empty".to_string()),
		other => Err(format!("expected string, got {}", other.type_name())),
	}
}

/// Clamps a float into `[min, max]`, reading both bounds from the scope being written.
///
/// Bounds are read at write time only. If `min > max` the result is `max`.
pub fn clamp_float(
	ctx: &OptionContext<'_>,
	value: OptionValue,
	min: OptionKey<f64>,
	max: OptionKey<f64>,
) -> Result<OptionValue, String> {
	let v = match value {
		OptionValue::Float(v) => v,
		other => return Err(format!("expected float, got {}", other.type_name())),
	};
	let lo = ctx.get(min).map_err(|e| e.to_string())?;
	let hi = ctx.get(max).map_err(|e| e.to_string())?;
	Ok(OptionValue::Float(v.max(lo).min(hi)))
}

/// Normalizes a string to lowercase and checks it against `allowed`.
pub fn one_of(value: OptionValue, allowed: &[&str]) -> Result<OptionValue, String> {
	let s = match value {
		OptionValue::String(s) => s,
		other => return Err(format!("expected string, got {}", other.type_name())),
	};
	let normalized = s.trim().to_lowercase();
	if allowed.contains(&normalized.as_str()) {
		Ok(OptionValue::String(normalized))
	} else {
		Err(format!("'{s}' is not one of: {}", allowed.join(", ")))
	}
}
