//! Zoom level, clamped to live bounds.

use quill_options::{OptionContext, OptionError, OptionRegistry, OptionValue, Scope, option, validators};

/// Zoom level of a freshly created view, in percent.
pub const DEFAULT_ZOOM: f64 = 100.0;
/// Default lower zoom bound, in percent.
pub const DEFAULT_MIN_ZOOM: f64 = 20.0;
/// Default upper zoom bound, in percent.
pub const DEFAULT_MAX_ZOOM: f64 = 400.0;

option!(MIN_ZOOM, {
	name: "view.min-zoom",
	type: Float,
	default: DEFAULT_MIN_ZOOM,
	description: "Smallest zoom level accepted when the zoom level is written",
	validator: validators::positive_float,
});

option!(MAX_ZOOM, {
	name: "view.max-zoom",
	type: Float,
	default: DEFAULT_MAX_ZOOM,
	description: "Largest zoom level accepted when the zoom level is written",
	validator: validators::positive_float,
});

option!(ZOOM_LEVEL, {
	name: "view.zoom-level",
	type: Float,
	default: DEFAULT_ZOOM,
	description: "Zoom level of the view, in percent",
	validator: clamp_zoom_level,
});

// Bounds are read when the zoom is written; changing them later does not re-clamp.
fn clamp_zoom_level(ctx: &OptionContext<'_>, value: OptionValue) -> Result<OptionValue, String> {
	validators::clamp_float(ctx, value, MIN_ZOOM, MAX_ZOOM)
}

/// Returns the effective zoom level.
pub fn zoom_level(registry: &OptionRegistry, scope: &Scope) -> Result<f64, OptionError> {
	registry.get(scope, ZOOM_LEVEL)
}

/// Sets the zoom level, returning the value actually stored after clamping.
pub fn set_zoom_level(registry: &OptionRegistry, scope: &Scope, zoom: f64) -> Result<f64, OptionError> {
	registry.set(scope, ZOOM_LEVEL, zoom)
}

pub fn min_zoom(registry: &OptionRegistry, scope: &Scope) -> Result<f64, OptionError> {
	registry.get(scope, MIN_ZOOM)
}

pub fn max_zoom(registry: &OptionRegistry, scope: &Scope) -> Result<f64, OptionError> {
	registry.get(scope, MAX_ZOOM)
}
