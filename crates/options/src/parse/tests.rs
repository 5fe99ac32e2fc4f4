use super::*;

#[test]
fn test_parse_bool_variants() {
	for text in ["true", "YES", "on", "1", " True "] {
		assert_eq!(parse_bool(text), Ok(true), "{text}");
	}
	for text in ["false", "No", "OFF", "0"] {
		assert_eq!(parse_bool(text), Ok(false), "{text}");
	}
	assert!(parse_bool("maybe").is_err());
}

#[test]
fn test_parse_int() {
	assert_eq!(parse_int("42"), Ok(42));
	assert_eq!(parse_int(" -3 "), Ok(-3));
	assert!(parse_int("4.5").is_err());
}

#[test]
fn test_parse_float() {
	assert_eq!(parse_float("150"), Ok(150.0));
	assert_eq!(parse_float("87.5%"), Ok(87.5));
	assert!(parse_float("NaN").is_err());
	assert!(parse_float("inf").is_err());
	assert!(parse_float("wide").is_err());
}

#[test]
fn test_parse_value_for_type() {
	assert_eq!(parse_value_for_type("on", OptionType::Bool), Ok(OptionValue::Bool(true)));
	assert_eq!(parse_value_for_type("8", OptionType::Int), Ok(OptionValue::Int(8)));
	assert_eq!(parse_value_for_type("2.5", OptionType::Float), Ok(OptionValue::Float(2.5)));
	assert_eq!(
		parse_value_for_type("nord", OptionType::String),
		Ok(OptionValue::String("nord".into()))
	);
}
