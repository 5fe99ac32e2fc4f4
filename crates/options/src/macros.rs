//! Registration macros for options.

/// Maps an [`OptionType`](crate::OptionType) variant to its Rust type.
#[doc(hidden)]
#[macro_export]
macro_rules! __option_rust_type {
	(Bool) => { bool };
	(Int) => { i64 };
	(Float) => { f64 };
	(String) => { ::std::string::String };
}

/// Selects a provided value or falls back to a default.
#[doc(hidden)]
#[macro_export]
macro_rules! __opt_or {
	($fallback:expr;) => {
		$fallback
	};
	($fallback:expr; $val:expr) => {
		$val
	};
}

/// Declares an option definition and its typed key.
///
/// This macro generates:
/// - A static [`OptionDef`](crate::OptionDef) named `<NAME>_DEF`
/// - A public constant [`OptionKey`](crate::OptionKey) named `NAME`
/// - An [`OptionReg`](crate::OptionReg) submission picked up by
///   [`OptionRegistry::register_discovered`](crate::OptionRegistry::register_discovered)
///
/// # Example
///
/// ```ignore
/// option!(TAB_WIDTH, {
///     name: "view.tab-width",
///     type: Int,
///     default: 4,
///     description: "Number of spaces a tab character occupies",
///     validator: quill_options::validators::positive_int,
/// });
///
/// option!(INDENT_WIDTH, {
///     name: "view.indent-width",
///     type: Int,
///     derived: indent_from_tab_width,
///     description: "Columns per indentation level",
/// });
/// ```
#[macro_export]
macro_rules! option {
	($key:ident, {
		name: $name:literal,
		type: $type:ident,
		default: $default:expr,
		description: $desc:literal
		$(, validator: $validator:expr)?
		$(, cacheable: $cacheable:expr)?
		$(,)?
	}) => {
		$crate::option!(@emit $key, $name, $type, $crate::OptionDefault::$type(|| $default), $desc,
			$crate::__opt_or!(None; $(Some($validator))?),
			$crate::__opt_or!(false; $($cacheable)?));
	};
	($key:ident, {
		name: $name:literal,
		type: $type:ident,
		derived: $derive:expr,
		description: $desc:literal
		$(, validator: $validator:expr)?
		$(,)?
	}) => {
		$crate::option!(@emit $key, $name, $type,
			$crate::OptionDefault::Derived($crate::OptionType::$type, $derive), $desc,
			$crate::__opt_or!(None; $(Some($validator))?),
			false);
	};
	(@emit $key:ident, $name:literal, $type:ident, $default:expr, $desc:literal, $validator:expr, $cacheable:expr) => {
		$crate::paste::paste! {
			#[doc = concat!("Definition of the `", $name, "` option.")]
			pub static [<$key _DEF>]: $crate::OptionDef = $crate::OptionDef {
				name: $name,
				description: $desc,
				value_type: $crate::OptionType::$type,
				default: $default,
				validator: $validator,
				cacheable: $cacheable,
			};

			#[doc = $desc]
			pub const $key: $crate::OptionKey<$crate::__option_rust_type!($type)> =
				$crate::OptionKey::new($name);

			$crate::inventory::submit! { $crate::OptionReg(&[<$key _DEF>]) }
		}
	};
}
