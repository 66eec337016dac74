//! Single-flight memoized async construction.
//!
//! The slot is claimed synchronously under a mutex before any await point, so
//! concurrent callers join one in-flight construction instead of racing. The
//! construction runs on its own task: dropping a caller never cancels it, and
//! its outcome (success or failure) is kept for the slot's lifetime.

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use parking_lot::Mutex;

use cdp_target_runtime::{Error, Result};

type Flight<T> = Shared<BoxFuture<'static, Result<T>>>;

pub(crate) struct SingleFlight<T: Clone> {
	slot: Mutex<Option<Flight<T>>>,
}

impl<T> SingleFlight<T>
where
	T: Clone + Send + Sync + 'static,
{
	pub fn new() -> Self {
		Self { slot: Mutex::new(None) }
	}

	/// Returns the claimed flight, starting `make` only if the slot is empty.
	pub fn get_or_start<F>(&self, make: impl FnOnce() -> F) -> Flight<T>
	where
		F: std::future::Future<Output = Result<T>> + Send + 'static,
	{
		let mut slot = self.slot.lock();
		slot.get_or_insert_with(|| {
			let task = tokio::spawn(make());
			async move {
				task.await
					.map_err(|e| Error::TaskFailed(e.to_string()))?
			}
			.boxed()
			.shared()
		})
		.clone()
	}

	/// Returns the flight if one has been claimed.
	pub fn current(&self) -> Option<Flight<T>> {
		self.slot.lock().clone()
	}

	pub fn is_claimed(&self) -> bool {
		self.slot.lock().is_some()
	}
}
