//! [`Page`] handle materialized for page-like targets.

mod page_events;

use std::sync::{Arc, Weak};

use cdp_target_protocol::Viewport;
use cdp_target_runtime::{CdpSession, Result};
use parking_lot::Mutex;
use serde_json::json;

use crate::handlers::{HandlerMap, handler_map};
use crate::task_queue::TaskQueue;
use crate::Target;

pub use crate::handlers::Subscription;

/// Events a [`Page`] emits to registered handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEvent {
	/// The page opened another page (payload: the popup [`Page`]).
	Popup,
	/// The page's target went away.
	Close,
}

/// A browser tab, bound to its own protocol session.
///
/// Created once per target by [`Target::page`].
pub struct Page {
	session: Arc<dyn CdpSession>,
	/// Back-reference; the target owns the page, not the other way round.
	target: Weak<Target>,
	ignore_https_errors: bool,
	viewport: Mutex<Option<Viewport>>,
	screenshot_queue: Arc<TaskQueue>,
	popup_handlers: HandlerMap<Arc<Page>>,
	close_handlers: HandlerMap<()>,
}

impl Page {
	/// Builds a page on `session` and applies its construction settings.
	///
	/// Enables the `Page` domain, turns off certificate checks when
	/// `ignore_https_errors` is set, and applies `default_viewport` if given.
	pub async fn create(
		session: Arc<dyn CdpSession>,
		target: &Arc<Target>,
		ignore_https_errors: bool,
		default_viewport: Option<Viewport>,
		screenshot_queue: Arc<TaskQueue>,
	) -> Result<Arc<Self>> {
		let page = Arc::new(Self {
			session,
			target: Arc::downgrade(target),
			ignore_https_errors,
			viewport: Mutex::new(None),
			screenshot_queue,
			popup_handlers: handler_map(),
			close_handlers: handler_map(),
		});

		page.initialize().await?;
		if let Some(viewport) = default_viewport {
			page.set_viewport(viewport).await?;
		}
		page.spawn_close_watcher(target);

		tracing::debug!(target_id = %target.id(), session_id = %page.session.id(), "Page created");
		Ok(page)
	}

	async fn initialize(&self) -> Result<()> {
		self.session.send("Page.enable", json!({})).await?;
		if self.ignore_https_errors {
			self.session
				.send("Security.setIgnoreCertificateErrors", json!({ "ignore": true }))
				.await?;
		}
		Ok(())
	}

	/// Returns the target this page belongs to, if it is still registered.
	pub fn target(&self) -> Option<Arc<Target>> {
		self.target.upgrade()
	}

	/// Returns the session the page talks through.
	pub fn session(&self) -> &Arc<dyn CdpSession> {
		&self.session
	}

	/// Returns the target's current url, or an empty string once it is gone.
	pub fn url(&self) -> String {
		self.target().map(|t| t.url()).unwrap_or_default()
	}

	/// Returns the viewport last applied to the page.
	pub fn viewport(&self) -> Option<Viewport> {
		*self.viewport.lock()
	}

	pub fn ignores_https_errors(&self) -> bool {
		self.ignore_https_errors
	}

	/// Returns the queue shared by all pages for screenshot serialization.
	pub fn screenshot_queue(&self) -> &Arc<TaskQueue> {
		&self.screenshot_queue
	}

	/// Resizes the page through device metrics emulation.
	pub async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
		let orientation = if viewport.is_landscape {
			json!({ "angle": 90, "type": "landscapePrimary" })
		} else {
			json!({ "angle": 0, "type": "portraitPrimary" })
		};
		self.session
			.send(
				"Emulation.setDeviceMetricsOverride",
				json!({
					"width": viewport.width,
					"height": viewport.height,
					"deviceScaleFactor": viewport.scale_factor(),
					"mobile": viewport.is_mobile,
					"screenOrientation": orientation,
				}),
			)
			.await?;
		self.session
			.send(
				"Emulation.setTouchEmulationEnabled",
				json!({ "enabled": viewport.has_touch }),
			)
			.await?;
		*self.viewport.lock() = Some(viewport);
		Ok(())
	}
}

impl std::fmt::Debug for Page {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Page")
			.field("session_id", &self.session.id())
			.field("viewport", &self.viewport())
			.finish()
	}
}
