//! Current line highlighting.

use quill_options::{OptionError, OptionRegistry, Scope, option};

option!(HIGHLIGHT_CURRENT_LINE, {
	name: "view.highlight-current-line",
	type: Bool,
	default: true,
	description: "Highlight the line containing the caret",
});

pub fn is_highlight_current_line_enabled(registry: &OptionRegistry, scope: &Scope) -> Result<bool, OptionError> {
	registry.get(scope, HIGHLIGHT_CURRENT_LINE)
}

pub fn set_highlight_current_line(registry: &OptionRegistry, scope: &Scope, enabled: bool) -> Result<(), OptionError> {
	registry.set(scope, HIGHLIGHT_CURRENT_LINE, enabled).map(|_| ())
}
