//! One-shot broadcast gate.
//!
//! A [`Gate`] starts empty, is resolved at most once, and lets any number of
//! waiters observe that single value. It backs the readiness, initialization
//! and closed signals of a [`Target`](crate::Target).

use tokio::sync::watch;

/// Single-assignment cell with async waiters.
pub struct Gate<T> {
	tx: watch::Sender<Option<T>>,
}

impl<T: Clone> Gate<T> {
	pub fn new() -> Self {
		let (tx, _) = watch::channel(None);
		Self { tx }
	}

	/// Resolves the gate. Returns `false` if it was already resolved, in which
	/// case the stored value is left alone.
	pub fn resolve(&self, value: T) -> bool {
		let mut value = Some(value);
		self.tx.send_if_modified(|slot| {
			if slot.is_some() {
				return false;
			}
			*slot = value.take();
			true
		})
	}

	/// Returns the resolved value without waiting.
	pub fn peek(&self) -> Option<T> {
		self.tx.borrow().clone()
	}

	pub fn is_resolved(&self) -> bool {
		self.tx.borrow().is_some()
	}

	/// Waits until the gate is resolved.
	pub async fn wait(&self) -> T {
		match self.subscribe().wait().await {
			Some(value) => value,
			// The sender lives in `self`, so the gate cannot vanish while borrowed.
			None => std::future::pending().await,
		}
	}

	/// Returns a waiter that does not borrow the gate.
	pub fn subscribe(&self) -> GateWaiter<T> {
		GateWaiter { rx: self.tx.subscribe() }
	}
}

/// Detached handle on a [`Gate`], usable from spawned tasks.
pub struct GateWaiter<T> {
	rx: watch::Receiver<Option<T>>,
}

impl<T: Clone> GateWaiter<T> {
	/// Waits for the gate's value. Returns `None` if the gate is dropped
	/// without ever being resolved.
	pub async fn wait(mut self) -> Option<T> {
		loop {
			if let Some(value) = self.rx.borrow_and_update().clone() {
				return Some(value);
			}
			if self.rx.changed().await.is_err() {
				return self.rx.borrow().clone();
			}
		}
	}
}

impl<T: Clone> Default for Gate<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Gate<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Gate").field("value", &self.peek()).finish()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;
	use std::time::Duration;

	use super::*;

	#[test]
	fn resolves_once() {
		let gate = Gate::new();
		assert_eq!(gate.peek(), None);
		assert!(gate.resolve(true));
		assert!(!gate.resolve(false));
		assert_eq!(gate.peek(), Some(true));
	}

	#[tokio::test]
	async fn wait_returns_immediately_when_resolved() {
		let gate = Gate::new();
		gate.resolve(7u32);
		assert_eq!(gate.wait().await, 7);
	}

	#[tokio::test]
	async fn all_waiters_see_the_same_resolution() {
		let gate = Arc::new(Gate::<bool>::new());
		let waiters: Vec<_> = (0..8)
			.map(|_| {
				let gate = Arc::clone(&gate);
				tokio::spawn(async move { gate.wait().await })
			})
			.collect();

		tokio::time::sleep(Duration::from_millis(10)).await;
		gate.resolve(false);
		gate.resolve(true);

		for waiter in waiters {
			assert!(!waiter.await.unwrap());
		}
	}

	#[tokio::test]
	async fn detached_waiter_ends_when_gate_dropped() {
		let gate = Gate::<()>::new();
		let waiter = gate.subscribe();
		drop(gate);
		assert_eq!(waiter.wait().await, None);
	}

	#[tokio::test]
	async fn detached_waiter_sees_resolution() {
		let gate = Gate::new();
		let waiter = gate.subscribe();
		let handle = tokio::spawn(waiter.wait());
		gate.resolve("closed");
		assert_eq!(handle.await.unwrap(), Some("closed"));
	}

	#[tokio::test]
	async fn pending_gate_does_not_complete() {
		let gate = Gate::<()>::new();
		let result = tokio::time::timeout(Duration::from_millis(20), gate.wait()).await;
		assert!(result.is_err());
		assert!(!gate.is_resolved());
	}
}
