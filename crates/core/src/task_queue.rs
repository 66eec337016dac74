//! Serial async task queue.
//!
//! Shared by every page of a browser so that operations which must not
//! overlap (screenshots steal focus and resize the viewport) run one at a time
//! in submission order.

use std::future::Future;

use tokio::sync::Mutex;

/// FIFO queue running one async task at a time.
#[derive(Debug, Default)]
pub struct TaskQueue {
	lock: Mutex<()>,
}

impl TaskQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs `task` once every previously posted task has finished.
	pub async fn post_task<F, Fut, T>(&self, task: F) -> T
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = T>,
	{
		// tokio's Mutex is fair, so waiters are served in arrival order.
		let _guard = self.lock.lock().await;
		task().await
	}
}
