//! Event handling methods for [`Page`] (popup, close).

use std::future::Future;
use std::sync::Arc;

use cdp_target_runtime::Result;

use crate::handlers::{self, Subscription};
use crate::Target;

use super::{Page, PageEvent};

impl Page {
	/// Registers a popup handler.
	///
	/// The handler receives the new [`Page`] whenever this page opens a popup
	/// and the popup's target becomes ready. Returns a [`Subscription`] that
	/// unregisters the handler when dropped.
	pub fn on_popup<F, Fut>(&self, handler: F) -> Subscription
	where
		F: Fn(Arc<Page>) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<()>> + Send + 'static,
	{
		handlers::register(&self.popup_handlers, handler)
	}

	/// Registers a handler called once when the page's target closes.
	pub fn on_close<F, Fut>(&self, handler: F) -> Subscription
	where
		F: Fn(()) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<()>> + Send + 'static,
	{
		handlers::register(&self.close_handlers, handler)
	}

	/// Returns how many handlers are registered for `event`.
	pub fn listener_count(&self, event: PageEvent) -> usize {
		match event {
			PageEvent::Popup => self.popup_handlers.lock().len(),
			PageEvent::Close => self.close_handlers.lock().len(),
		}
	}

	/// Dispatches a popup event to all registered handlers.
	///
	/// Each handler's future runs on its own task; this returns once they are
	/// queued, so a slow or stuck handler never holds up the caller.
	pub(crate) fn emit_popup(&self, popup: Arc<Page>) {
		for (id, handler) in handlers::snapshot(&self.popup_handlers) {
			let fut = handler(Arc::clone(&popup));
			tokio::spawn(async move {
				if let Err(e) = fut.await {
					tracing::error!(error = %e, handler_id = id, "Popup handler error");
				}
			});
		}
	}

	async fn emit_close(&self) {
		for (id, handler) in handlers::snapshot(&self.close_handlers) {
			if let Err(e) = handler(()).await {
				tracing::error!(error = %e, handler_id = id, "Close handler error");
			}
		}
	}

	/// Emits [`PageEvent::Close`] once the target's closed signal fires.
	pub(super) fn spawn_close_watcher(self: &Arc<Self>, target: &Arc<Target>) {
		let closed = target.close_waiter();
		let page = Arc::downgrade(self);
		tokio::spawn(async move {
			if closed.wait().await.is_none() {
				return;
			}
			if let Some(page) = page.upgrade() {
				page.emit_close().await;
			}
		});
	}
}
