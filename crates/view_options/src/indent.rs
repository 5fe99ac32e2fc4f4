//! Indentation options.

use quill_options::{OptionContext, OptionError, OptionRegistry, OptionValue, Scope, option, validators};

option!(TAB_WIDTH, {
	name: "view.tab-width",
	type: Int,
	default: 4,
	description: "Number of columns a tab character occupies",
	validator: validators::positive_int,
});

option!(INDENT_WIDTH, {
	name: "view.indent-width",
	type: Int,
	derived: indent_from_tab_width,
	description: "Columns per indentation level; follows the tab width unless set",
	validator: validators::positive_int,
});

fn indent_from_tab_width(ctx: &OptionContext<'_>) -> Result<OptionValue, OptionError> {
	ctx.get(TAB_WIDTH).map(OptionValue::Int)
}

pub fn tab_width(registry: &OptionRegistry, scope: &Scope) -> Result<i64, OptionError> {
	registry.get(scope, TAB_WIDTH)
}

pub fn indent_width(registry: &OptionRegistry, scope: &Scope) -> Result<i64, OptionError> {
	registry.get(scope, INDENT_WIDTH)
}
