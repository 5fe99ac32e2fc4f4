//! Process-wide option definitions and scoped value access.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap as HashMap;
use tracing::{debug, trace, warn};

use crate::notify::{self, ErasedHandler, Pending};
use crate::{
	FromOptionValue, OptionContext, OptionDef, OptionError, OptionKey, OptionReg, OptionType,
	OptionValue, Scope, Subscription, parse,
};


/// Outcome of registering a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAction {
	/// The definition was added.
	Inserted,
	/// The identical definition was already registered.
	KeptExisting,
}

/// Registered definition plus its per-registry default cache.
struct OptionEntry {
	def: &'static OptionDef,
	cached_default: OnceLock<OptionValue>,
}

#[derive(Clone, Default)]
struct OptionsSnapshot {
	by_name: HashMap<&'static str, Arc<OptionEntry>>,
}

/// Set of registered option definitions.
///
/// Reads load an immutable snapshot and never block; registration swaps in a
/// new snapshot. Values themselves live in [`Scope`]s, which are passed to
/// every access.
pub struct OptionRegistry {
	snap: ArcSwap<OptionsSnapshot>,
}

impl Default for OptionRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl core::fmt::Debug for OptionRegistry {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("OptionRegistry")
			.field("options", &self.len())
			.finish()
	}
}

impl OptionRegistry {
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(OptionsSnapshot::default()),
		}
	}

	/// Registers a definition.
	///
	/// Re-registering the same `&'static` instance returns
	/// [`InsertAction::KeptExisting`]. Any other definition under an existing
	/// name fails with [`OptionError::DuplicateKey`].
	pub fn register(&self, def: &'static OptionDef) -> Result<InsertAction, OptionError> {
		def.check()?;
		loop {
			let cur = self.snap.load_full();
			if let Some(existing) = cur.by_name.get(def.name) {
				if std::ptr::eq(existing.def, def) {
					return Ok(InsertAction::KeptExisting);
				}
				return Err(OptionError::DuplicateKey {
					key: def.name.to_string(),
				});
			}

			let mut next = (*cur).clone();
			next.by_name.insert(
				def.name,
				Arc::new(OptionEntry {
					def,
					cached_default: OnceLock::new(),
				}),
			);

			let prev = self.snap.compare_and_swap(&cur, Arc::new(next));
			if Arc::ptr_eq(&prev, &cur) {
				debug!(
					domain = "options",
					option = def.name,
					value_type = %def.value_type,
					"option registered"
				);
				return Ok(InsertAction::Inserted);
			}
		}
	}

	/// Registers each definition in order, stopping at the first error.
	pub fn register_all<I>(&self, defs: I) -> Result<Vec<InsertAction>, OptionError>
	where
		I: IntoIterator<Item = &'static OptionDef>,
	{
		defs.into_iter().map(|def| self.register(def)).collect()
	}

	/// Registers every definition submitted through [`OptionReg`].
	///
	/// Returns the number of newly inserted definitions.
	pub fn register_discovered(&self) -> Result<usize, OptionError> {
		let mut inserted = 0;
		for reg in inventory::iter::<OptionReg> {
			if self.register(reg.0)? == InsertAction::Inserted {
				inserted += 1;
			}
		}
		Ok(inserted)
	}

	/// Finds a definition by name.
	pub fn find(&self, name: &str) -> Option<&'static OptionDef> {
		self.snap.load().by_name.get(name).map(|e| e.def)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.snap.load().by_name.contains_key(name)
	}

	/// Returns all definitions sorted by name.
	pub fn all_sorted(&self) -> Vec<&'static OptionDef> {
		let snap = self.snap.load();
		let sorted: BTreeMap<_, _> = snap.by_name.iter().map(|(k, e)| (*k, e.def)).collect();
		sorted.into_values().collect()
	}

	pub fn len(&self) -> usize {
		self.snap.load().by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Suggests a registered option name close to `name`.
	pub fn suggest_option(&self, name: &str) -> Option<String> {
		self.snap
			.load()
			.by_name
			.keys()
			.map(|k| (strsim::levenshtein(name, k), *k))
			.filter(|(dist, _)| *dist <= 3)
			.min()
			.map(|(_, k)| k.to_string())
	}

	/// Returns the effective value of `key` as seen through `scope`.
	pub fn get<T: FromOptionValue>(&self, scope: &Scope, key: OptionKey<T>) -> Result<T, OptionError> {
		let entry = self.typed_entry(key)?;
		let value = self.resolve(scope, &entry)?;
		convert(entry.def.name, &value)
	}

	/// Returns the effective value of the option named `name`.
	pub fn get_raw(&self, scope: &Scope, name: &str) -> Result<OptionValue, OptionError> {
		let entry = self.entry(name)?;
		self.resolve(scope, &entry)
	}

	/// Returns the definition default of `key` as seen through `scope`,
	/// ignoring every override.
	pub fn default_value<T: FromOptionValue>(&self, scope: &Scope, key: OptionKey<T>) -> Result<T, OptionError> {
		let entry = self.typed_entry(key)?;
		let value = self.default_for(scope, &entry)?;
		convert(entry.def.name, &value)
	}

	/// Returns true if `scope` itself holds an override for `key`.
	pub fn is_overridden<T: FromOptionValue>(&self, scope: &Scope, key: OptionKey<T>) -> Result<bool, OptionError> {
		let entry = self.typed_entry(key)?;
		Ok(scope.has_local(entry.def.name))
	}

	/// Stores `value` as `scope`'s override for `key`.
	///
	/// The value passes through the definition's validator first; the
	/// returned value is what was actually stored and may differ from the
	/// input (e.g. after clamping).
	pub fn set<T: FromOptionValue>(&self, scope: &Scope, key: OptionKey<T>, value: T) -> Result<T, OptionError> {
		let entry = self.typed_entry(key)?;
		let stored = self.write(scope, &entry, value.into_option())?;
		convert(entry.def.name, &stored)
	}

	/// Untyped variant of [`OptionRegistry::set`].
	pub fn set_raw(&self, scope: &Scope, name: &str, value: OptionValue) -> Result<OptionValue, OptionError> {
		let entry = self.entry(name)?;
		self.write(scope, &entry, value)
	}

	/// Parses `text` according to the option's type and stores it.
	///
	/// Unknown names carry a spelling suggestion when one is close enough.
	pub fn set_from_str(&self, scope: &Scope, name: &str, text: &str) -> Result<OptionValue, OptionError> {
		let entry = self.entry(name).map_err(|_| OptionError::UndefinedKey {
			key: name.to_string(),
			suggestion: self.suggest_option(name),
		})?;
		let value = parse::parse_value_for_type(text, entry.def.value_type).map_err(|reason| {
			OptionError::InvalidValue {
				option: entry.def.name.to_string(),
				reason,
			}
		})?;
		self.write(scope, &entry, value)
	}

	/// Removes `scope`'s own override for `key`, returning it.
	pub fn clear<T: FromOptionValue>(&self, scope: &Scope, key: OptionKey<T>) -> Result<Option<T>, OptionError> {
		let entry = self.typed_entry(key)?;
		self.remove(scope, &entry)?
			.map(|value| convert(entry.def.name, &value))
			.transpose()
	}

	/// Untyped variant of [`OptionRegistry::clear`].
	pub fn clear_raw(&self, scope: &Scope, name: &str) -> Result<Option<OptionValue>, OptionError> {
		let entry = self.entry(name)?;
		self.remove(scope, &entry)
	}

	/// Invokes `handler(old, new)` whenever the effective value of `key`
	/// seen through `scope` changes.
	///
	/// Changes made in ancestor scopes, and changes to options a derived
	/// default reads, are observed as long as `scope` does not shadow them
	/// with its own override. Handlers should capture a
	/// [`WeakScope`](crate::WeakScope) rather than a [`Scope`] to avoid
	/// keeping their own scope alive.
	pub fn subscribe<T, F>(&self, scope: &Scope, key: OptionKey<T>, handler: F) -> Result<Subscription, OptionError>
	where
		T: FromOptionValue,
		F: Fn(&T, &T) + Send + Sync + 'static,
	{
		let entry = self.typed_entry(key)?;
		let erased: ErasedHandler = Arc::new(move |old: &OptionValue, new: &OptionValue| {
			if let (Some(old), Some(new)) = (T::from_option(old), T::from_option(new)) {
				handler(&old, &new);
			}
		});
		let name = entry.def.name;
		let id = scope.inner.subscribers.lock().insert(name, erased);
		trace!(domain = "options", option = name, scope = scope.label(), "subscribed");
		Ok(Subscription::new(Arc::downgrade(&scope.inner), id, name))
	}

	fn entry(&self, name: &str) -> Result<Arc<OptionEntry>, OptionError> {
		self.snap
			.load()
			.by_name
			.get(name)
			.cloned()
			.ok_or_else(|| OptionError::undefined(name))
	}

	fn typed_entry<T: FromOptionValue>(&self, key: OptionKey<T>) -> Result<Arc<OptionEntry>, OptionError> {
		let entry = self.entry(key.name())?;
		if entry.def.value_type != T::option_type() {
			return Err(OptionError::TypeMismatch {
				option: key.name().to_string(),
				expected: entry.def.value_type,
				got: T::option_type(),
			});
		}
		Ok(entry)
	}

	fn resolve(&self, scope: &Scope, entry: &OptionEntry) -> Result<OptionValue, OptionError> {
		match scope.lookup(entry.def.name) {
			Some(value) => Ok(value),
			None => self.default_for(scope, entry),
		}
	}

	fn default_for(&self, scope: &Scope, entry: &OptionEntry) -> Result<OptionValue, OptionError> {
		let def = entry.def;
		if def.cacheable
			&& let Some(value) = entry.cached_default.get()
		{
			return Ok(value.clone());
		}

		trace!(domain = "options", option = def.name, scope = scope.label(), "computing default");
		let ctx = OptionContext::new(self, scope);
		let value = def.default.compute(def.name, &ctx)?;
		check_finite(def.name, &value)?;
		if def.cacheable {
			return Ok(entry.cached_default.get_or_init(|| value).clone());
		}
		Ok(value)
	}

	/// Runs every write-time check for `name` without storing anything.
	pub(crate) fn check_raw(&self, scope: &Scope, name: &str, value: OptionValue) -> Result<OptionValue, OptionError> {
		let entry = self.entry(name)?;
		self.validate(scope, &entry, value)
	}

	/// Puts back a previously captured local override, or its absence.
	///
	/// Skips validation; subscribers are notified as for any other write.
	pub(crate) fn restore_raw(
		&self,
		scope: &Scope,
		name: &str,
		previous: Option<OptionValue>,
	) -> Result<(), OptionError> {
		let entry = self.entry(name)?;
		let name = entry.def.name;
		self.apply(scope, &entry, move || match previous {
			Some(value) => {
				scope.set_local(name, value);
			}
			None => {
				scope.remove_local(name);
			}
		});
		Ok(())
	}

	/// Type and finiteness checks, then the validator.
	///
	/// A value equal to the current effective value is returned as is, so
	/// rewriting what `get` returned never re-runs a transformer against
	/// bounds that moved since.
	fn validate(&self, scope: &Scope, entry: &OptionEntry, value: OptionValue) -> Result<OptionValue, OptionError> {
		let def = entry.def;
		check_type(def.name, def.value_type, &value)?;
		check_finite(def.name, &value)?;

		let Some(validator) = def.validator else {
			return Ok(value);
		};
		if self.resolve(scope, entry).is_ok_and(|current| current == value) {
			return Ok(value);
		}
		let ctx = OptionContext::new(self, scope);
		let transformed = validator(&ctx, value).map_err(|reason| OptionError::InvalidValue {
			option: def.name.to_string(),
			reason,
		})?;
		check_type(def.name, def.value_type, &transformed)?;
		check_finite(def.name, &transformed)?;
		Ok(transformed)
	}

	fn write(&self, scope: &Scope, entry: &OptionEntry, value: OptionValue) -> Result<OptionValue, OptionError> {
		let def = entry.def;
		let value = self.validate(scope, entry, value)?;
		let stored = value.clone();
		self.apply(scope, entry, move || {
			scope.set_local(def.name, value);
		});
		Ok(stored)
	}

	fn remove(&self, scope: &Scope, entry: &OptionEntry) -> Result<Option<OptionValue>, OptionError> {
		if !scope.has_local(entry.def.name) {
			return Ok(None);
		}
		let mut removed = None;
		self.apply(scope, entry, || {
			removed = scope.remove_local(entry.def.name);
		});
		Ok(removed)
	}

	/// Runs `mutate` on `scope` and notifies every subscriber in the scope's
	/// subtree whose effective value changed.
	fn apply(&self, scope: &Scope, entry: &OptionEntry, mutate: impl FnOnce()) {
		let before = self.resolve(scope, entry).ok();
		let mut watches = self.collect_watches(scope);

		mutate();

		let after = self.resolve(scope, entry).ok();
		if before != after {
			debug!(
				domain = "options",
				option = entry.def.name,
				scope = scope.label(),
				old = ?before,
				new = ?after,
				"option changed"
			);
		}

		let mut batch = Vec::new();
		for watch in watches.iter_mut() {
			let Some(old) = watch.old.take() else {
				continue;
			};
			let new = match self.get_raw(&watch.scope, watch.key) {
				Ok(new) => new,
				Err(err) => {
					warn!(domain = "options", option = watch.key, scope = watch.scope.label(), %err, "cannot resolve watched option");
					continue;
				}
			};
			if old == new {
				continue;
			}
			for &id in &watch.ids {
				batch.push(Pending::new(&watch.scope.inner, id, old.clone(), new.clone()));
			}
		}
		drop(watches);
		notify::dispatch(batch);
	}

	/// Snapshots the current value of every subscribed option in the subtree.
	fn collect_watches(&self, scope: &Scope) -> Vec<Watch> {
		let mut watches = Vec::new();
		for node in scope.subtree() {
			let mut by_key: BTreeMap<&'static str, Vec<u64>> = BTreeMap::new();
			{
				let subs = node.inner.subscribers.lock();
				for (id, sub) in subs.iter() {
					by_key.entry(sub.key).or_default().push(id);
				}
			}
			for (key, ids) in by_key {
				let old = match self.get_raw(&node, key) {
					Ok(value) => Some(value),
					Err(err) => {
						warn!(domain = "options", option = key, scope = node.label(), %err, "cannot resolve watched option");
						None
					}
				};
				watches.push(Watch {
					scope: node.clone(),
					key,
					ids,
					old,
				});
			}
		}
		watches
	}
}

/// Subscribed option in one scope, with its value before a write.
struct Watch {
	scope: Scope,
	key: &'static str,
	ids: Vec<u64>,
	old: Option<OptionValue>,
}

fn convert<T: FromOptionValue>(name: &str, value: &OptionValue) -> Result<T, OptionError> {
	T::from_option(value).ok_or_else(|| OptionError::TypeMismatch {
		option: name.to_string(),
		expected: T::option_type(),
		got: value.value_type(),
	})
}

fn check_type(name: &str, expected: OptionType, value: &OptionValue) -> Result<(), OptionError> {
	if value.matches_type(expected) {
		return Ok(());
	}
	Err(OptionError::TypeMismatch {
		option: name.to_string(),
		expected,
		got: value.value_type(),
	})
}

fn check_finite(name: &str, value: &OptionValue) -> Result<(), OptionError> {
	match value {
		OptionValue::Float(v) if !v.is_finite() => Err(OptionError::InvalidArgument(format!(
			"option '{name}' requires a finite number, got {v}"
		))),
		_ => Ok(()),
	}
}
