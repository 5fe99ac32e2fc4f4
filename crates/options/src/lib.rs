//! Options registry
//!
//! Options are named, typed settings resolved through a tree of scopes.
//! This crate provides:
//! - Value types ([`OptionValue`], [`OptionType`], [`OptionDefault`])
//! - Definitions and typed handles ([`OptionDef`], [`OptionKey`])
//! - The process-wide definition set ([`OptionRegistry`])
//! - Override containers chained to a parent ([`Scope`])
//! - Change notification guards ([`Subscription`])
//! - Registration macro ([`option!`]) and inventory discovery ([`OptionReg`])
//!
//! # Resolution Order
//!
//! 1. Override stored in the scope being read
//! 2. Override stored in the nearest ancestor scope
//! 3. Default from the option's definition (computed on demand)

pub mod config;
mod context;
mod def;
mod error;
mod key;
mod macros;
mod notify;
pub mod parse;
mod registry;
mod scope;
mod value;
pub mod validators;

pub use context::OptionContext;
pub use def::{DeriveFn, OptionDef, OptionValidator};
pub use error::OptionError;
pub use key::OptionKey;
pub use notify::Subscription;
pub use registry::{InsertAction, OptionRegistry};
pub use scope::{Scope, ScopeId, WeakScope};
pub use value::{FromOptionValue, OptionDefault, OptionType, OptionValue};

#[doc(hidden)]
pub use inventory;
#[doc(hidden)]
pub use paste;

/// Inventory record for an option definition declared with [`option!`].
///
/// Collected by [`OptionRegistry::register_discovered`].
pub struct OptionReg(pub &'static OptionDef);
inventory::collect!(OptionReg);
