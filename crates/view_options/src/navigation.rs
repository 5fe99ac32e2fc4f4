//! Click-to-go-to-definition options.

use quill_options::{OptionContext, OptionError, OptionRegistry, OptionValue, Scope, option, validators};
use strum::{Display, EnumString, VariantNames};

/// Modifier key that turns a click into go-to-definition.
#[derive(Debug, Default, Display, EnumString, VariantNames, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModifierKey {
	/// Control (Command on macOS front ends).
	#[default]
	Ctrl,
	Alt,
	Shift,
	/// Plain click, no modifier held.
	#[strum(to_string = "none")]
	NoModifier,
}

option!(CLICK_GOTO_DEFINITION, {
	name: "view.click-goto-definition",
	type: Bool,
	default: true,
	description: "Go to definition when clicking a symbol with the modifier key held",
});

option!(CLICK_GOTO_DEFINITION_MODIFIER, {
	name: "view.click-goto-definition-modifier",
	type: String,
	default: ModifierKey::default().to_string(),
	description: "Modifier key for click-to-go-to-definition (ctrl, alt, shift, none)",
	validator: modifier_key,
});

fn modifier_key(_ctx: &OptionContext<'_>, value: OptionValue) -> Result<OptionValue, String> {
	validators::one_of(value, ModifierKey::VARIANTS)
}

pub fn is_click_goto_definition_enabled(registry: &OptionRegistry, scope: &Scope) -> Result<bool, OptionError> {
	registry.get(scope, CLICK_GOTO_DEFINITION)
}

pub fn goto_definition_modifier(registry: &OptionRegistry, scope: &Scope) -> Result<ModifierKey, OptionError> {
	let raw = registry.get(scope, CLICK_GOTO_DEFINITION_MODIFIER)?;
	raw.parse().map_err(|_| OptionError::InvalidValue {
		option: CLICK_GOTO_DEFINITION_MODIFIER.name().to_string(),
		reason: format!("unknown modifier key '{raw}'"),
	})
}

pub fn set_goto_definition_modifier(
	registry: &OptionRegistry,
	scope: &Scope,
	modifier: ModifierKey,
) -> Result<(), OptionError> {
	registry
		.set(scope, CLICK_GOTO_DEFINITION_MODIFIER, modifier.to_string())
		.map(|_| ())
}
