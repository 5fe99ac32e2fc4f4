use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;
use crate::{OptionKey, option, validators};

option!(CFG_ZOOM, {
	name: "cfg.zoom",
	type: Float,
	default: 100.0,
	description: "Zoom level used by config tests",
	validator: clamp_zoom,
});

option!(CFG_MIN_ZOOM, {
	name: "cfg.min-zoom",
	type: Float,
	default: 20.0,
	description: "Minimum zoom used by config tests",
});

option!(CFG_MAX_ZOOM, {
	name: "cfg.max-zoom",
	type: Float,
	default: 400.0,
	description: "Maximum zoom used by config tests",
});

option!(CFG_WRAP, {
	name: "cfg.wrap",
	type: Bool,
	default: false,
	description: "Wrap flag used by config tests",
});

option!(CFG_THEME, {
	name: "cfg.theme",
	type: String,
	default: "default".to_string(),
	description: "Theme used by config tests",
	validator: validators::non_empty_string,
});

option!(CFG_WRAP_COLUMN, {
	name: "cfg.wrap-column",
	type: Int,
	default: 80,
	description: "Wrap column used by config tests; refused while the theme is mono",
	validator: wrap_column,
});

fn wrap_column(ctx: &crate::OptionContext<'_>, value: OptionValue) -> Result<OptionValue, String> {
	match ctx.get(CFG_THEME) {
		Ok(theme) if theme == "mono" => Err("not available with the mono theme".to_string()),
		Ok(_) => Ok(value),
		Err(err) => Err(err.to_string()),
	}
}

fn clamp_zoom(ctx: &crate::OptionContext<'_>, value: OptionValue) -> Result<OptionValue, String> {
	validators::clamp_float(ctx, value, CFG_MIN_ZOOM, CFG_MAX_ZOOM)
}

fn setup() -> (OptionRegistry, Scope) {
	let registry = OptionRegistry::new();
	registry
		.register_all([
			&CFG_ZOOM_DEF,
			&CFG_MIN_ZOOM_DEF,
			&CFG_MAX_ZOOM_DEF,
			&CFG_WRAP_DEF,
			&CFG_THEME_DEF,
			&CFG_WRAP_COLUMN_DEF,
		])
		.unwrap();
	(registry, Scope::root("global"))
}

#[test]
fn test_nested_tables_flatten_to_dotted_names() {
	let (registry, scope) = setup();
	let applied = apply_toml(
		&registry,
		&scope,
		r#"
			[cfg]
			wrap = true
			theme = "nord"
		"#,
	)
	.unwrap();

	assert_eq!(applied, vec!["cfg.theme", "cfg.wrap"]);
	assert!(registry.get(&scope, CFG_WRAP).unwrap());
	assert_eq!(registry.get(&scope, CFG_THEME).unwrap(), "nord");
}

#[test]
fn test_quoted_dotted_key_and_integer_coercion() {
	let (registry, scope) = setup();
	apply_toml(&registry, &scope, r#""cfg.zoom" = 150"#).unwrap();
	assert_eq!(registry.get(&scope, CFG_ZOOM).unwrap(), 150.0);
}

#[test]
fn test_config_values_pass_through_validators() {
	let (registry, scope) = setup();
	apply_toml(&registry, &scope, "[cfg]\nzoom = 1000.0\n").unwrap();
	assert_eq!(registry.get(&scope, CFG_ZOOM).unwrap(), 400.0);
}

#[test]
fn test_unknown_option_suggests_and_writes_nothing() {
	let (registry, scope) = setup();
	let err = apply_toml(&registry, &scope, "[cfg]\nwrap = true\nthem = \"nord\"\n").unwrap_err();

	match err {
		ConfigError::UnknownOption { key, suggestion } => {
			assert_eq!(key, "cfg.them");
			assert_eq!(suggestion.as_deref(), Some("cfg.theme"));
		}
		other => panic!("unexpected error: {other}"),
	}
	assert!(scope.overrides().is_empty());
}

#[test]
fn test_type_mismatch_is_reported() {
	let (registry, scope) = setup();
	let err = apply_toml(&registry, &scope, "[cfg]\nwrap = \"yes\"\n").unwrap_err();
	assert!(matches!(
		err,
		ConfigError::OptionTypeMismatch {
			expected: OptionType::Bool,
			got: "string",
			..
		}
	));
}

#[test]
fn test_invalid_toml() {
	let (registry, scope) = setup();
	let err = apply_toml(&registry, &scope, "[cfg\nwrap = ").unwrap_err();
	assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_typed_key_round_trips_through_find() {
	let (registry, _) = setup();
	let key: OptionKey<bool> = CFG_WRAP;
	assert_eq!(registry.find(key.name()).map(|d| d.name), Some("cfg.wrap"));
}

#[test]
fn test_validator_rejection_writes_nothing() {
	let (registry, scope) = setup();
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = calls.clone();
	let _sub = registry
		.subscribe(&scope, CFG_MAX_ZOOM, move |_, _| {
			counter.fetch_add(1, Ordering::SeqCst);
		})
		.unwrap();

	let err = apply_toml(&registry, &scope, "[cfg]\nmax-zoom = 300.0\ntheme = \"  \"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Option(OptionError::InvalidValue { .. })));
	assert!(scope.overrides().is_empty());
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_non_finite_value_writes_nothing() {
	let (registry, scope) = setup();
	let err = apply_toml(&registry, &scope, "[cfg]\nmax-zoom = 300.0\nmin-zoom = nan\n").unwrap_err();
	assert!(matches!(err, ConfigError::Option(OptionError::InvalidArgument(_))));
	assert!(scope.overrides().is_empty());
}

#[test]
fn test_failed_write_restores_earlier_overrides() {
	let (registry, scope) = setup();
	registry.set(&scope, CFG_THEME, "nord".to_string()).unwrap();

	// The wrap column passes the up-front check against "nord" and fails once
	// the theme from the same document is in place.
	let err = apply_toml(&registry, &scope, "[cfg]\ntheme = \"mono\"\nwrap-column = 100\n").unwrap_err();
	assert!(matches!(err, ConfigError::Option(OptionError::InvalidValue { .. })));
	assert_eq!(scope.overrides(), vec![("cfg.theme", OptionValue::from("nord"))]);
	assert_eq!(registry.get(&scope, CFG_WRAP_COLUMN), Ok(80));
}

#[test]
fn test_duplicate_option_is_rejected() {
	let (registry, scope) = setup();
	let err = apply_toml(&registry, &scope, "\"cfg.zoom\" = 150\n[cfg]\nzoom = 120\n").unwrap_err();
	match err {
		ConfigError::DuplicateOption { key } => assert_eq!(key, "cfg.zoom"),
		other => panic!("unexpected error: {other}"),
	}
	assert!(scope.overrides().is_empty());
}

#[test]
fn test_inexact_integer_for_float_is_rejected() {
	let (registry, scope) = setup();
	let err = apply_toml(&registry, &scope, "[cfg]\nmax-zoom = 9007199254740993\n").unwrap_err();
	assert!(matches!(err, ConfigError::Option(OptionError::InvalidValue { .. })));

	apply_toml(&registry, &scope, "[cfg]\nmax-zoom = 9007199254740992\n").unwrap();
	assert_eq!(registry.get(&scope, CFG_MAX_ZOOM), Ok(9_007_199_254_740_992.0));
}
