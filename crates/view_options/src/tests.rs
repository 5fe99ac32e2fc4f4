use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use quill_options::{OptionError, OptionRegistry, Scope};

use super::*;

fn setup() -> (OptionRegistry, Scope) {
	let registry = OptionRegistry::new();
	register_builtins(&registry).unwrap();
	(registry, Scope::root("global"))
}

#[test]
fn test_register_builtins_is_repeatable() {
	let registry = OptionRegistry::new();
	let first = register_builtins(&registry).unwrap();
	assert!(first.iter().all(|a| *a == InsertAction::Inserted));
	let second = register_builtins(&registry).unwrap();
	assert!(second.iter().all(|a| *a == InsertAction::KeptExisting));
	assert_eq!(registry.len(), BUILTINS.len());
}

#[test]
fn test_defaults() {
	let (registry, scope) = setup();
	assert_eq!(zoom_level(&registry, &scope), Ok(DEFAULT_ZOOM));
	assert_eq!(min_zoom(&registry, &scope), Ok(DEFAULT_MIN_ZOOM));
	assert_eq!(max_zoom(&registry, &scope), Ok(DEFAULT_MAX_ZOOM));
	assert_eq!(is_highlight_current_line_enabled(&registry, &scope), Ok(true));
	assert_eq!(is_click_goto_definition_enabled(&registry, &scope), Ok(true));
	assert_eq!(goto_definition_modifier(&registry, &scope), Ok(ModifierKey::Ctrl));
	assert_eq!(tab_width(&registry, &scope), Ok(4));
	assert_eq!(indent_width(&registry, &scope), Ok(4));
}

#[test]
fn test_zoom_scenario() {
	let (registry, global) = setup();
	let view = global.child("view:1");

	assert_eq!(set_zoom_level(&registry, &view, 1000.0), Ok(DEFAULT_MAX_ZOOM));
	assert_eq!(zoom_level(&registry, &view), Ok(400.0));

	registry.set(&view, MAX_ZOOM, 500.0).unwrap();
	assert_eq!(zoom_level(&registry, &view), Ok(400.0));

	assert_eq!(set_zoom_level(&registry, &view, 1000.0), Ok(500.0));
	assert_eq!(set_zoom_level(&registry, &view, 1.0), Ok(DEFAULT_MIN_ZOOM));
	assert_eq!(zoom_level(&registry, &global), Ok(DEFAULT_ZOOM));
}

#[test]
fn test_zoom_bounds_must_be_positive() {
	let (registry, scope) = setup();
	assert!(matches!(
		registry.set(&scope, MIN_ZOOM, 0.0),
		Err(OptionError::InvalidValue { .. })
	));
	assert!(matches!(
		registry.set(&scope, MAX_ZOOM, -5.0),
		Err(OptionError::InvalidValue { .. })
	));
}

#[test]
fn test_highlight_current_line_per_view() {
	let (registry, global) = setup();
	let left = global.child("view:left");
	let right = global.child("view:right");

	set_highlight_current_line(&registry, &left, false).unwrap();
	assert_eq!(is_highlight_current_line_enabled(&registry, &left), Ok(false));
	assert_eq!(is_highlight_current_line_enabled(&registry, &right), Ok(true));

	set_highlight_current_line(&registry, &global, false).unwrap();
	assert_eq!(is_highlight_current_line_enabled(&registry, &right), Ok(false));
}

#[test]
fn test_goto_definition_modifier() {
	let (registry, scope) = setup();
	set_goto_definition_modifier(&registry, &scope, ModifierKey::Alt).unwrap();
	assert_eq!(goto_definition_modifier(&registry, &scope), Ok(ModifierKey::Alt));

	set_goto_definition_modifier(&registry, &scope, ModifierKey::NoModifier).unwrap();
	assert_eq!(registry.get(&scope, CLICK_GOTO_DEFINITION_MODIFIER).unwrap(), "none");
	assert_eq!(goto_definition_modifier(&registry, &scope), Ok(ModifierKey::NoModifier));
}

#[test]
fn test_goto_definition_modifier_from_text() {
	let (registry, scope) = setup();
	registry
		.set_from_str(&scope, "view.click-goto-definition-modifier", "SHIFT")
		.unwrap();
	assert_eq!(goto_definition_modifier(&registry, &scope), Ok(ModifierKey::Shift));

	assert!(matches!(
		registry.set_from_str(&scope, "view.click-goto-definition-modifier", "hyper"),
		Err(OptionError::InvalidValue { .. })
	));
	assert_eq!(goto_definition_modifier(&registry, &scope), Ok(ModifierKey::Shift));
}

#[test]
fn test_indent_width_follows_tab_width() {
	let (registry, global) = setup();
	let buffer = global.child("buffer");

	registry.set(&buffer, TAB_WIDTH, 2).unwrap();
	assert_eq!(indent_width(&registry, &buffer), Ok(2));
	assert_eq!(indent_width(&registry, &global), Ok(4));

	registry.set(&buffer, INDENT_WIDTH, 3).unwrap();
	registry.set(&buffer, TAB_WIDTH, 8).unwrap();
	assert_eq!(indent_width(&registry, &buffer), Ok(3));
	assert!(registry.set(&buffer, TAB_WIDTH, 0).is_err());
}

#[test]
fn test_theme_rejects_blank_names() {
	let (registry, scope) = setup();
	assert!(!theme(&registry, &scope).unwrap().is_empty());
	assert!(matches!(
		registry.set(&scope, THEME, "  ".to_string()),
		Err(OptionError::InvalidValue { .. })
	));
	registry.set(&scope, THEME, " nord ".to_string()).unwrap();
	assert_eq!(theme(&registry, &scope).unwrap(), "nord");
}

#[test]
fn test_view_subscription_sees_global_zoom_bounds_untouched() {
	let (registry, global) = setup();
	let view = global.child("view:1");
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = calls.clone();
	let _sub = registry
		.subscribe(&view, ZOOM_LEVEL, move |_, _| {
			counter.fetch_add(1, Ordering::SeqCst);
		})
		.unwrap();

	set_zoom_level(&registry, &view, 250.0).unwrap();
	registry.set(&global, MAX_ZOOM, 200.0).unwrap();
	set_zoom_level(&registry, &global, 150.0).unwrap();

	assert_eq!(zoom_level(&registry, &view), Ok(250.0));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_modifier_key_names() {
	assert_eq!(ModifierKey::Ctrl.to_string(), "ctrl");
	assert_eq!("Alt".parse::<ModifierKey>(), Ok(ModifierKey::Alt));
	assert!("meta".parse::<ModifierKey>().is_err());
}
