//! Applying configuration documents to a scope.
//!
//! Config documents are TOML. Nested tables flatten into dotted option
//! names, so these two documents are equivalent:
//!
//! ```toml
//! [view]
//! zoom-level = 150
//! ```
//!
//! ```toml
//! "view.zoom-level" = 150.0
//! ```
//!
//! Every value goes through [`OptionRegistry::set_raw`], so validators and
//! change notifications apply exactly as for programmatic writes. Integers
//! are accepted for float options when they convert exactly.

use rustc_hash::FxHashSet as HashSet;
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::{OptionError, OptionRegistry, OptionType, OptionValue, Scope};

#[cfg(test)]
mod tests;

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The document is not valid TOML.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// An unknown option was specified in config.
	#[error("unknown option: {key}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	UnknownOption {
		/// The unrecognized option name.
		key: String,
		/// A suggested alternative, if one is close enough.
		suggestion: Option<String>,
	},

	/// The document sets the same option more than once.
	#[error("option '{key}' is set more than once")]
	DuplicateOption {
		/// The repeated option name.
		key: String,
	},

	/// An option value has the wrong type.
	#[error("type mismatch for option '{option}': expected {expected}, got {got}")]
	OptionTypeMismatch {
		/// The option name.
		option: String,
		/// The declared type.
		expected: OptionType,
		/// The TOML type name found.
		got: &'static str,
	},

	/// The registry rejected a value.
	#[error(transparent)]
	Option(#[from] OptionError),
}

/// Parses `source` and writes every option it sets into `scope`.
///
/// Application is all-or-nothing. Names, types and validators are checked
/// for the whole document before anything is written; if a write still fails
/// (a validator reading an option set earlier in the same document), the
/// overrides written so far are restored. Returns the applied option names
/// in document order (tables sorted by key).
pub fn apply_toml(registry: &OptionRegistry, scope: &Scope, source: &str) -> Result<Vec<&'static str>, ConfigError> {
	let table: Table = toml::from_str(source)?;
	let mut flat = Vec::new();
	flatten(&table, None, &mut HashSet::default(), &mut flat)?;

	let mut resolved = Vec::with_capacity(flat.len());
	for (key, value) in flat {
		let def = registry.find(&key).ok_or_else(|| ConfigError::UnknownOption {
			suggestion: registry.suggest_option(&key),
			key: key.clone(),
		})?;
		let value = convert(def.name, def.value_type, value)?;
		resolved.push((def.name, value));
	}

	for (name, value) in &resolved {
		registry.check_raw(scope, name, value.clone())?;
	}

	let mut previous = Vec::with_capacity(resolved.len());
	for (name, value) in resolved {
		let before = scope.local(name);
		if let Err(err) = registry.set_raw(scope, name, value) {
			rollback(registry, scope, previous);
			return Err(err.into());
		}
		previous.push((name, before));
	}

	let applied: Vec<_> = previous.into_iter().map(|(name, _)| name).collect();
	debug!(domain = "options", scope = scope.label(), count = applied.len(), "config applied");
	Ok(applied)
}

fn rollback(registry: &OptionRegistry, scope: &Scope, previous: Vec<(&'static str, Option<OptionValue>)>) {
	warn!(domain = "options", scope = scope.label(), count = previous.len(), "rolling back config");
	for (name, value) in previous.into_iter().rev() {
		if let Err(err) = registry.restore_raw(scope, name, value) {
			warn!(domain = "options", option = name, scope = scope.label(), %err, "cannot restore option");
		}
	}
}

fn flatten<'a>(
	table: &'a Table,
	prefix: Option<&str>,
	seen: &mut HashSet<String>,
	out: &mut Vec<(String, &'a Value)>,
) -> Result<(), ConfigError> {
	for (key, value) in table {
		let name = match prefix {
			Some(prefix) => format!("{prefix}.{key}"),
			None => key.clone(),
		};
		match value {
			Value::Table(nested) => flatten(nested, Some(&name), seen, out)?,
			other => {
				if !seen.insert(name.clone()) {
					return Err(ConfigError::DuplicateOption { key: name });
				}
				out.push((name, other));
			}
		}
	}
	Ok(())
}

/// Integers up to this magnitude convert to `f64` without rounding.
const MAX_EXACT_FLOAT_INT: i64 = 1 << 53;

fn convert(option: &str, expected: OptionType, value: &Value) -> Result<OptionValue, ConfigError> {
	match (expected, value) {
		(OptionType::Bool, Value::Boolean(b)) => Ok(OptionValue::Bool(*b)),
		(OptionType::Int, Value::Integer(i)) => Ok(OptionValue::Int(*i)),
		(OptionType::Float, Value::Float(f)) => Ok(OptionValue::Float(*f)),
		(OptionType::Float, Value::Integer(i)) if (-MAX_EXACT_FLOAT_INT..=MAX_EXACT_FLOAT_INT).contains(i) => {
			Ok(OptionValue::Float(*i as f64))
		}
		(OptionType::Float, Value::Integer(i)) => Err(ConfigError::Option(OptionError::InvalidValue {
			option: option.to_string(),
			reason: format!("integer {i} cannot be represented exactly as a float"),
		})),
		(OptionType::String, Value::String(s)) => Ok(OptionValue::String(s.clone())),
		_ => Err(ConfigError::OptionTypeMismatch {
			option: option.to_string(),
			expected,
			got: value.type_str(),
		}),
	}
}
