use super::*;
use crate::{OptionDef, OptionDefault, OptionRegistry, OptionType, Scope};

static LOW: OptionDef = OptionDef {
	name: "test.low",
	description: "Lower bound",
	value_type: OptionType::Float,
	default: OptionDefault::Float(|| 10.0),
	validator: None,
	cacheable: false,
};

static HIGH: OptionDef = OptionDef {
	name: "test.high",
	description: "Upper bound",
	value_type: OptionType::Float,
	default: OptionDefault::Float(|| 20.0),
	validator: None,
	cacheable: false,
};

const LOW_KEY: OptionKey<f64> = OptionKey::new("test.low");
const HIGH_KEY: OptionKey<f64> = OptionKey::new("test.high");

fn setup() -> (OptionRegistry, Scope) {
	let registry = OptionRegistry::new();
	registry.register_all([&LOW, &HIGH]).unwrap();
	(registry, Scope::root("global"))
}

#[test]
fn test_positive_int() {
	let (registry, scope) = setup();
	let ctx = OptionContext::new(&registry, &scope);
	assert!(positive_int(&ctx, OptionValue::Int(1)).is_ok());
	assert!(positive_int(&ctx, OptionValue::Int(100)).is_ok());
	assert!(positive_int(&ctx, OptionValue::Int(0)).is_err());
	assert!(positive_int(&ctx, OptionValue::Int(-1)).is_err());
	assert!(positive_int(&ctx, OptionValue::String("foo".into())).is_err());
}

#[test]
fn test_positive_float() {
	let (registry, scope) = setup();
	let ctx = OptionContext::new(&registry, &scope);
	assert!(positive_float(&ctx, OptionValue::Float(0.5)).is_ok());
	assert!(positive_float(&ctx, OptionValue::Float(0.0)).is_err());
	assert!(positive_float(&ctx, OptionValue::Int(3)).is_err());
}

#[test]
fn test_non_empty_string_trims() {
	let (registry, scope) = setup();
	let ctx = OptionContext::new(&registry, &scope);
	assert_eq!(
		non_empty_string(&ctx, OptionValue::from("  nord ")),
		Ok(OptionValue::from("nord"))
	);
	assert!(non_empty_string(&ctx, OptionValue::from("   ")).is_err());
}

#[test]
fn test_clamp_float_reads_live_bounds() {
	let (registry, scope) = setup();
	let ctx = OptionContext::new(&registry, &scope);
	assert_eq!(
		clamp_float(&ctx, OptionValue::Float(5.0), LOW_KEY, HIGH_KEY),
		Ok(OptionValue::Float(10.0))
	);
	assert_eq!(
		clamp_float(&ctx, OptionValue::Float(15.0), LOW_KEY, HIGH_KEY),
		Ok(OptionValue::Float(15.0))
	);

	registry.set(&scope, HIGH_KEY, 12.0).unwrap();
	assert_eq!(
		clamp_float(&ctx, OptionValue::Float(15.0), LOW_KEY, HIGH_KEY),
		Ok(OptionValue::Float(12.0))
	);
}

#[test]
fn test_clamp_float_inverted_bounds_yield_max() {
	let (registry, scope) = setup();
	registry.set(&scope, LOW_KEY, 30.0).unwrap();
	let ctx = OptionContext::new(&registry, &scope);
	assert_eq!(
		clamp_float(&ctx, OptionValue::Float(25.0), LOW_KEY, HIGH_KEY),
		Ok(OptionValue::Float(20.0))
	);
}

#[test]
fn test_one_of_normalizes_case() {
	let allowed = ["ctrl", "alt"];
	assert_eq!(one_of(OptionValue::from("ALT"), &allowed), Ok(OptionValue::from("alt")));
	assert!(one_of(OptionValue::from("meta"), &allowed).is_err());
	assert!(one_of(OptionValue::Bool(true), &allowed).is_err());
}
