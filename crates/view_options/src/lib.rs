//! Built-in view options.
//!
//! Definitions for the options a text view reads (zoom, current line
//! highlight, click-to-go-to-definition, indentation, theme) and free-function
//! accessors that read and write them through a [`Scope`].
//!
//! ```ignore
//! use quill_options::{OptionRegistry, Scope};
//! use quill_view_options as view;
//!
//! let registry = OptionRegistry::new();
//! view::register_builtins(&registry)?;
//!
//! let global = Scope::root("global");
//! let editor = global.child("view:1");
//! assert_eq!(view::set_zoom_level(&registry, &editor, 1000.0)?, view::DEFAULT_MAX_ZOOM);
//! ```

use quill_options::{InsertAction, OptionDef, OptionError, OptionRegistry};

mod display;
mod indent;
mod navigation;
mod theme;
mod zoom;

#[cfg(test)]
mod tests;

pub use display::{HIGHLIGHT_CURRENT_LINE, is_highlight_current_line_enabled, set_highlight_current_line};
pub use indent::{INDENT_WIDTH, TAB_WIDTH, indent_width, tab_width};
pub use navigation::{
	CLICK_GOTO_DEFINITION, CLICK_GOTO_DEFINITION_MODIFIER, ModifierKey, goto_definition_modifier,
	is_click_goto_definition_enabled, set_goto_definition_modifier,
};
pub use theme::{THEME, THEME_ENV, theme};
pub use zoom::{
	DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_LEVEL, max_zoom, min_zoom,
	set_zoom_level, zoom_level,
};

/// Typed handles for the built-in view options.
pub mod keys {
	pub use crate::display::HIGHLIGHT_CURRENT_LINE;
	pub use crate::indent::{INDENT_WIDTH, TAB_WIDTH};
	pub use crate::navigation::{CLICK_GOTO_DEFINITION, CLICK_GOTO_DEFINITION_MODIFIER};
	pub use crate::theme::THEME;
	pub use crate::zoom::{MAX_ZOOM, MIN_ZOOM, ZOOM_LEVEL};
}

/// Every built-in definition, in registration order.
pub static BUILTINS: &[&OptionDef] = &[
	&zoom::MIN_ZOOM_DEF,
	&zoom::MAX_ZOOM_DEF,
	&zoom::ZOOM_LEVEL_DEF,
	&display::HIGHLIGHT_CURRENT_LINE_DEF,
	&navigation::CLICK_GOTO_DEFINITION_DEF,
	&navigation::CLICK_GOTO_DEFINITION_MODIFIER_DEF,
	&indent::TAB_WIDTH_DEF,
	&indent::INDENT_WIDTH_DEF,
	&theme::THEME_DEF,
];

/// Registers every built-in view option. Safe to call more than once.
pub fn register_builtins(registry: &OptionRegistry) -> Result<Vec<InsertAction>, OptionError> {
	registry.register_all(BUILTINS.iter().copied())
}
