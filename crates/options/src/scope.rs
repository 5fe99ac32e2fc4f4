//! Override containers chained into a tree.
//!
//! A [`Scope`] stores only the overrides set on it. Reads that miss locally
//! fall through to the parent, and finally to the option's default. Children
//! keep their parent alive; parents track children weakly, so dropping the
//! last handle to a view's scope frees it and stops change propagation into it.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap as HashMap;

use crate::OptionError;
use crate::OptionValue;
use crate::notify::Subscribers;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique scope identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(u64);

impl ScopeId {
	fn next() -> Self {
		Self(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
	}

	pub fn as_u64(self) -> u64 {
		self.0
	}
}

pub(crate) struct ScopeInner {
	id: ScopeId,
	label: Box<str>,
	parent: Option<Arc<ScopeInner>>,
	children: Mutex<Vec<Weak<ScopeInner>>>,
	overrides: RwLock<HashMap<&'static str, OptionValue>>,
	pub(crate) subscribers: Mutex<Subscribers>,
}

impl ScopeInner {
	fn new(label: Box<str>, parent: Option<Arc<ScopeInner>>) -> Self {
		Self {
			id: ScopeId::next(),
			label,
			parent,
			children: Mutex::new(Vec::new()),
			overrides: RwLock::new(HashMap::default()),
			subscribers: Mutex::new(Subscribers::default()),
		}
	}
}

/// Handle to an option scope.
///
/// Cloning the handle is cheap and shares the same overrides.
#[derive(Clone)]
pub struct Scope {
	pub(crate) inner: Arc<ScopeInner>,
}

impl Scope {
	/// Creates a scope with no parent.
	pub fn root(label: impl Into<Box<str>>) -> Self {
		Self {
			inner: Arc::new(ScopeInner::new(label.into(), None)),
		}
	}

	/// Creates a scope whose reads fall through to `self`.
	pub fn child(&self, label: impl Into<Box<str>>) -> Self {
		let inner = Arc::new(ScopeInner::new(label.into(), Some(self.inner.clone())));
		let mut children = self.inner.children.lock();
		children.retain(|c| c.strong_count() > 0);
		children.push(Arc::downgrade(&inner));
		Self { inner }
	}

	pub fn id(&self) -> ScopeId {
		self.inner.id
	}

	pub fn label(&self) -> &str {
		&self.inner.label
	}

	pub fn parent(&self) -> Option<Scope> {
		self.inner.parent.clone().map(|inner| Scope { inner })
	}

	/// Returns a non-owning handle, suitable for capture inside subscription handlers.
	pub fn downgrade(&self) -> WeakScope {
		WeakScope {
			inner: Arc::downgrade(&self.inner),
		}
	}

	/// Returns true if both handles refer to the same scope.
	pub fn ptr_eq(&self, other: &Scope) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// Returns the overrides stored directly on this scope, sorted by name.
	pub fn overrides(&self) -> Vec<(&'static str, OptionValue)> {
		let overrides = self.inner.overrides.read();
		let sorted: BTreeMap<_, _> = overrides.iter().map(|(k, v)| (*k, v.clone())).collect();
		sorted.into_iter().collect()
	}

	/// Number of live subscriptions registered on this scope.
	pub fn subscriber_count(&self) -> usize {
		self.inner.subscribers.lock().len()
	}

	pub(crate) fn has_local(&self, name: &str) -> bool {
		self.inner.overrides.read().contains_key(name)
	}

	pub(crate) fn local(&self, name: &str) -> Option<OptionValue> {
		self.inner.overrides.read().get(name).cloned()
	}

	pub(crate) fn set_local(&self, name: &'static str, value: OptionValue) -> Option<OptionValue> {
		self.inner.overrides.write().insert(name, value)
	}

	pub(crate) fn remove_local(&self, name: &str) -> Option<OptionValue> {
		self.inner.overrides.write().remove(name)
	}

	/// Finds the nearest override for `name`, starting at this scope.
	pub(crate) fn lookup(&self, name: &str) -> Option<OptionValue> {
		let mut node = Some(&self.inner);
		while let Some(scope) = node {
			if let Some(value) = scope.overrides.read().get(name) {
				return Some(value.clone());
			}
			node = scope.parent.as_ref();
		}
		None
	}

	/// Returns this scope followed by every live descendant, breadth first.
	pub(crate) fn subtree(&self) -> Vec<Scope> {
		let mut out = vec![self.clone()];
		let mut i = 0;
		while i < out.len() {
			let children = out[i].live_children();
			out.extend(children);
			i += 1;
		}
		out
	}

	fn live_children(&self) -> Vec<Scope> {
		let mut children = self.inner.children.lock();
		children.retain(|c| c.strong_count() > 0);
		children
			.iter()
			.filter_map(Weak::upgrade)
			.map(|inner| Scope { inner })
			.collect()
	}
}

impl core::fmt::Debug for Scope {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Scope")
			.field("id", &self.inner.id)
			.field("label", &self.inner.label)
			.field("parent", &self.inner.parent.as_ref().map(|p| p.id))
			.finish()
	}
}

/// Non-owning scope handle.
#[derive(Clone, Debug, Default)]
pub struct WeakScope {
	inner: Weak<ScopeInner>,
}

impl WeakScope {
	/// Upgrades to a [`Scope`], failing if every owning handle has been dropped.
	pub fn upgrade(&self) -> Result<Scope, OptionError> {
		self.inner
			.upgrade()
			.map(|inner| Scope { inner })
			.ok_or_else(|| OptionError::InvalidArgument("scope has been dropped".into()))
	}
}
