//! Change notification plumbing.
//!
//! Handlers live only in the subscriber table of the scope they were
//! registered on. Delivery is synchronous on the writing thread and never
//! holds a lock while a handler runs. Writes made from inside a handler are
//! applied immediately; their notifications are queued and delivered in
//! order once the running handler returns.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Weak};

use crate::OptionValue;
use crate::scope::ScopeInner;

pub(crate) type ErasedHandler = Arc<dyn Fn(&OptionValue, &OptionValue) + Send + Sync>;

pub(crate) struct Subscriber {
	pub(crate) key: &'static str,
	handler: ErasedHandler,
}

/// Subscriber table of one scope, in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
	next_id: u64,
	entries: BTreeMap<u64, Subscriber>,
}

impl Subscribers {
	pub(crate) fn insert(&mut self, key: &'static str, handler: ErasedHandler) -> u64 {
		let id = self.next_id;
		self.next_id += 1;
		self.entries.insert(id, Subscriber { key, handler });
		id
	}

	pub(crate) fn remove(&mut self, id: u64) -> Option<Subscriber> {
		self.entries.remove(&id)
	}

	pub(crate) fn contains(&self, id: u64) -> bool {
		self.entries.contains_key(&id)
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}

	pub(crate) fn iter(&self) -> impl Iterator<Item = (u64, &Subscriber)> {
		self.entries.iter().map(|(id, sub)| (*id, sub))
	}

	fn handler(&self, id: u64) -> Option<ErasedHandler> {
		self.entries.get(&id).map(|sub| sub.handler.clone())
	}
}

/// Guard for a registered change handler.
///
/// Dropping the guard unsubscribes: the handler is removed from its scope and
/// is not invoked again, even for notifications that were already queued.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
	scope: Weak<ScopeInner>,
	id: u64,
	key: &'static str,
}

impl Subscription {
	pub(crate) fn new(scope: Weak<ScopeInner>, id: u64, key: &'static str) -> Self {
		Self { scope, id, key }
	}

	/// Name of the watched option.
	pub fn key(&self) -> &'static str {
		self.key
	}

	/// Returns true while the scope is alive and the handler is registered.
	pub fn is_active(&self) -> bool {
		self.scope
			.upgrade()
			.is_some_and(|scope| scope.subscribers.lock().contains(self.id))
	}

	/// Explicitly unsubscribes. Equivalent to dropping the guard.
	pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(scope) = self.scope.upgrade() {
			// Release the lock before the handler (and whatever it captured) is dropped.
			let removed = scope.subscribers.lock().remove(self.id);
			drop(removed);
		}
	}
}

impl core::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Subscription")
			.field("key", &self.key)
			.field("id", &self.id)
			.finish()
	}
}

/// One handler invocation waiting to be delivered.
pub(crate) struct Pending {
	scope: Weak<ScopeInner>,
	id: u64,
	old: OptionValue,
	new: OptionValue,
}

impl Pending {
	pub(crate) fn new(scope: &Arc<ScopeInner>, id: u64, old: OptionValue, new: OptionValue) -> Self {
		Self {
			scope: Arc::downgrade(scope),
			id,
			old,
			new,
		}
	}

	fn deliver(self) {
		let Some(scope) = self.scope.upgrade() else {
			return;
		};
		let handler = scope.subscribers.lock().handler(self.id);
		if let Some(handler) = handler {
			handler(&self.old, &self.new);
		}
	}
}

thread_local! {
	static QUEUE: RefCell<Option<VecDeque<Pending>>> = const { RefCell::new(None) };
}

struct QueueReset;

impl Drop for QueueReset {
	fn drop(&mut self) {
		QUEUE.with(|q| *q.borrow_mut() = None);
	}
}

/// Delivers a batch of notifications.
///
/// The outermost call on a thread drains the queue; nested calls made by
/// handlers only append to it.
pub(crate) fn dispatch(batch: Vec<Pending>) {
	if batch.is_empty() {
		return;
	}
	let outermost = QUEUE.with(|q| {
		let mut q = q.borrow_mut();
		match q.as_mut() {
			Some(pending) => {
				pending.extend(batch);
				false
			}
			None => {
				*q = Some(VecDeque::from(batch));
				true
			}
		}
	});
	if !outermost {
		return;
	}

	let _reset = QueueReset;
	loop {
		let next = QUEUE.with(|q| q.borrow_mut().as_mut().and_then(VecDeque::pop_front));
		match next {
			Some(pending) => pending.deliver(),
			None => break,
		}
	}
}
