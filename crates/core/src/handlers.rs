//! Generic event handler infrastructure.
//!
//! Unified types for event handlers and subscriptions using [`HandlerEntry<E>`]
//! with [`IndexMap`] storage for O(1) removal and stable insertion order.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::Mutex;

/// Unique identifier for event handlers.
pub type HandlerId = u64;

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a new globally-unique handler ID.
pub fn next_handler_id() -> HandlerId {
	NEXT_HANDLER_ID.fetch_add(1, Ordering::SeqCst)
}

/// Boxed async handler future.
pub type HandlerFuture = Pin<Box<dyn Future<Output = cdp_target_runtime::Result<()>> + Send>>;

/// Handler function: `E` -> async `Result<()>`.
pub type HandlerFn<E> = Arc<dyn Fn(E) -> HandlerFuture + Send + Sync>;

/// Event handler entry.
pub struct HandlerEntry<E> {
	pub id: HandlerId,
	pub handler: HandlerFn<E>,
}

impl<E> Clone for HandlerEntry<E> {
	fn clone(&self) -> Self {
		Self {
			id: self.id,
			handler: Arc::clone(&self.handler),
		}
	}
}

/// Handler storage: [`IndexMap`] for O(1) removal with stable insertion order.
pub type HandlerMap<E> = Arc<Mutex<IndexMap<HandlerId, HandlerEntry<E>>>>;

/// Creates an empty handler map.
pub fn handler_map<E>() -> HandlerMap<E> {
	Arc::new(Mutex::new(IndexMap::new()))
}

/// Wraps `handler` and inserts it into `map`, returning its [`Subscription`].
pub fn register<E, F, Fut>(map: &HandlerMap<E>, handler: F) -> Subscription
where
	E: Send + Sync + 'static,
	F: Fn(E) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = cdp_target_runtime::Result<()>> + Send + 'static,
{
	let id = next_handler_id();
	let handler: HandlerFn<E> = Arc::new(move |event: E| -> HandlerFuture { Box::pin(handler(event)) });
	map.lock().insert(id, HandlerEntry { id, handler });
	Subscription::from_handler_map(id, map)
}

/// Snapshot of the handlers in `map`, taken so dispatch runs without the lock.
pub fn snapshot<E>(map: &HandlerMap<E>) -> Vec<(HandlerId, HandlerFn<E>)> {
	map.lock().values().map(|e| (e.id, Arc::clone(&e.handler))).collect()
}

/// RAII handle that unregisters an event handler on drop.
///
/// Holds a weak reference to the handler map, so dropping after the owning
/// [`Page`] is gone is safe (becomes a no-op).
///
/// [`Page`]: crate::Page
pub struct Subscription {
	id: HandlerId,
	dropper: Option<Arc<dyn Fn(HandlerId) + Send + Sync>>,
}

impl Subscription {
	/// Creates a subscription with a custom dropper function.
	pub fn new(id: HandlerId, dropper: Arc<dyn Fn(HandlerId) + Send + Sync>) -> Self {
		Self {
			id,
			dropper: Some(dropper),
		}
	}

	/// Creates a subscription from a handler map using a weak reference.
	pub fn from_handler_map<E>(id: HandlerId, handlers: &HandlerMap<E>) -> Self
	where
		E: Send + Sync + 'static,
	{
		let weak: Weak<Mutex<IndexMap<HandlerId, HandlerEntry<E>>>> = Arc::downgrade(handlers);
		let dropper = Arc::new(move |id: HandlerId| {
			if let Some(map) = weak.upgrade() {
				map.lock().shift_remove(&id);
			}
		});
		Self::new(id, dropper)
	}

	/// Returns this subscription's handler ID.
	pub fn id(&self) -> HandlerId {
		self.id
	}

	/// Explicitly unsubscribes. Equivalent to dropping.
	pub fn unsubscribe(mut self) {
		if let Some(dropper) = self.dropper.take() {
			(dropper)(self.id);
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(dropper) = self.dropper.take() {
			(dropper)(self.id);
		}
	}
}

impl std::fmt::Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription")
			.field("id", &self.id)
			.field("active", &self.dropper.is_some())
			.finish()
	}
}
