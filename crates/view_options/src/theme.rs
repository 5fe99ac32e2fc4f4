//! Color theme selection.

use quill_options::{OptionError, OptionRegistry, Scope, option, validators};

/// Environment variable consulted for the default theme.
pub const THEME_ENV: &str = "QUILL_THEME";

option!(THEME, {
	name: "view.theme",
	type: String,
	default: theme_from_env(),
	description: "Active color theme name",
	validator: validators::non_empty_string,
	cacheable: true,
});

fn theme_from_env() -> String {
	std::env::var(THEME_ENV)
		.ok()
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
		.unwrap_or_else(|| "default".to_string())
}

pub fn theme(registry: &OptionRegistry, scope: &Scope) -> Result<String, OptionError> {
	registry.get(scope, THEME)
}
