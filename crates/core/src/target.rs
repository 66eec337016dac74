//! [`Target`]: one remote execution context reported by the browser.
//!
//! A target owns three one-shot signals and two lazily built handles:
//!
//! - **readiness**: resolves once the target's url is known (or immediately
//!   for targets that are not page-like or already have a url)
//! - **initialized**: the readiness outcome, delayed until the popup relay
//!   has run
//! - **closed**: fired by the owner when the browser reports the target gone
//! - **page / worker**: built at most once, on first request
//!
//! The owner (the browser-level registry) drives the lifecycle through
//! [`Target::update_info`], [`Target::report_initialized`] and
//! [`Target::report_closed`].

use std::sync::{Arc, Weak};

use cdp_target_protocol::{TargetInfo, TargetType};
use cdp_target_runtime::{CdpSession, Error, Result, SessionFactory};
use parking_lot::RwLock;

use crate::context::{Browser, BrowserContext};
use crate::gate::{Gate, GateWaiter};
use crate::options::{IsPageTarget, TargetOptions};
use crate::page::{Page, PageEvent};
use crate::single_flight::SingleFlight;
use crate::task_queue::TaskQueue;
use crate::worker::{Worker, noop_hook};

pub struct Target {
	id: String,
	/// Latest snapshot; swapped whole on every update.
	info: RwLock<TargetInfo>,
	browser_context: Weak<BrowserContext>,
	session_factory: Arc<dyn SessionFactory>,
	options: TargetOptions,
	screenshot_queue: Arc<TaskQueue>,
	is_page_target: IsPageTarget,
	readiness: Gate<bool>,
	initialized: Gate<bool>,
	closed: Gate<()>,
	page: SingleFlight<Arc<Page>>,
	worker: SingleFlight<Arc<Worker>>,
}

impl Target {
	/// Creates a target from the browser's `targetCreated` info.
	///
	/// Page-like targets reported with an empty url start with readiness
	/// pending; every other target is ready on return.
	pub fn new(
		info: TargetInfo,
		browser_context: &Arc<BrowserContext>,
		session_factory: Arc<dyn SessionFactory>,
		options: TargetOptions,
		screenshot_queue: Arc<TaskQueue>,
		is_page_target: IsPageTarget,
	) -> Arc<Self> {
		let awaits_url = is_page_target(&info) && info.url.is_empty();
		let target = Arc::new(Self {
			id: info.target_id.clone(),
			info: RwLock::new(info),
			browser_context: Arc::downgrade(browser_context),
			session_factory,
			options,
			screenshot_queue,
			is_page_target,
			readiness: Gate::new(),
			initialized: Gate::new(),
			closed: Gate::new(),
			page: SingleFlight::new(),
			worker: SingleFlight::new(),
		});
		tracing::debug!(target_id = %target.id, kind = %target.target_type(), awaits_url, "Target created");

		if !awaits_url {
			target.report_initialized(true);
		}
		target
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	/// Returns a copy of the current info snapshot.
	pub fn info(&self) -> TargetInfo {
		self.info.read().clone()
	}

	pub fn url(&self) -> String {
		self.info.read().url.clone()
	}

	pub fn target_type(&self) -> TargetType {
		self.info.read().target_type()
	}

	pub fn options(&self) -> &TargetOptions {
		&self.options
	}

	/// Returns the context this target was created in, while it is alive.
	pub fn browser_context(&self) -> Option<Arc<BrowserContext>> {
		self.browser_context.upgrade()
	}

	pub fn browser(&self) -> Option<Arc<dyn Browser>> {
		self.browser_context()?.browser()
	}

	/// Looks up the target that opened this one in the browser's registry.
	pub fn opener(&self) -> Option<Arc<Target>> {
		let opener_id = self.info.read().opener_id.clone()?;
		self.browser()?.target(&opener_id)
	}

	/// Opens a fresh session to this target. Never memoized.
	pub async fn create_session(&self) -> Result<Arc<dyn CdpSession>> {
		self.session_factory.create_session().await
	}

	/// Replaces the info snapshot with one from `targetInfoChanged`.
	///
	/// Resolves a pending readiness gate once the target has a url or stops
	/// being page-like.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidArgument`] if `info` belongs to another target.
	pub fn update_info(self: &Arc<Self>, info: TargetInfo) -> Result<()> {
		if info.target_id != self.id {
			tracing::warn!(target_id = %self.id, reported = %info.target_id, "Ignoring info for another target");
			return Err(Error::InvalidArgument(format!(
				"target info for {} delivered to target {}",
				info.target_id, self.id
			)));
		}

		let now_ready = !self.readiness.is_resolved() && (!(self.is_page_target)(&info) || !info.url.is_empty());
		*self.info.write() = info;

		if now_ready {
			self.report_initialized(true);
		}
		Ok(())
	}

	/// Resolves the readiness gate. Later reports are ignored.
	///
	/// A successful report runs the popup relay before `initialized` resolves.
	pub fn report_initialized(self: &Arc<Self>, success: bool) {
		if !self.readiness.resolve(success) {
			return;
		}
		tracing::debug!(target_id = %self.id, success, "Target readiness resolved");

		if !success {
			self.initialized.resolve(false);
			return;
		}

		match self.popup_opener() {
			None => {
				self.initialized.resolve(true);
			}
			Some(opener) => {
				let target = Arc::clone(self);
				tokio::spawn(async move {
					target.relay_popup(opener).await;
					target.initialized.resolve(true);
				});
			}
		}
	}

	/// Fires the closed signal. Does not cancel in-flight materializations.
	pub fn report_closed(&self) {
		if self.closed.resolve(()) {
			tracing::debug!(target_id = %self.id, "Target closed");
		}
	}

	/// Returns the readiness outcome, `None` while pending.
	pub fn readiness(&self) -> Option<bool> {
		self.readiness.peek()
	}

	/// Waits for the readiness gate.
	pub async fn wait_for_readiness(&self) -> bool {
		self.readiness.wait().await
	}

	/// Waits for readiness and for the popup relay chained onto it.
	pub async fn wait_for_initialized(&self) -> bool {
		self.initialized.wait().await
	}

	pub fn is_closed(&self) -> bool {
		self.closed.is_resolved()
	}

	pub async fn wait_for_close(&self) {
		self.closed.wait().await
	}

	pub(crate) fn close_waiter(&self) -> GateWaiter<()> {
		self.closed.subscribe()
	}

	/// Returns the page handle, building it on first call.
	///
	/// Targets the page predicate rejects yield `Ok(None)` without touching
	/// the session factory, unless a page was already built. Concurrent
	/// callers share one construction; its error, if any, is returned to
	/// every later caller.
	pub async fn page(self: &Arc<Self>) -> Result<Option<Arc<Page>>> {
		let flight = match self.page.current() {
			Some(flight) => flight,
			None => {
				if !(self.is_page_target)(&*self.info.read()) {
					return Ok(None);
				}
				let target = Arc::clone(self);
				self.page.get_or_start(move || async move {
					let session = target.session_factory.create_session().await?;
					Page::create(
						session,
						&target,
						target.options.ignore_https_errors,
						target.options.default_viewport,
						Arc::clone(&target.screenshot_queue),
					)
					.await
				})
			}
		};
		flight.await.map(Some)
	}

	/// Returns the worker handle for service and shared workers.
	///
	/// Same single-flight rules as [`page`](Self::page). Other kinds always
	/// yield `Ok(None)`.
	pub async fn worker(self: &Arc<Self>) -> Result<Option<Arc<Worker>>> {
		if !self.target_type().is_worker() {
			return Ok(None);
		}
		let target = Arc::clone(self);
		let flight = self.worker.get_or_start(move || async move {
			let session = target.session_factory.create_session().await?;
			// Console and exception relay for workers is not wired up yet.
			Ok(Arc::new(Worker::new(session, target.url(), noop_hook(), noop_hook())))
		});
		flight.await.map(Some)
	}

	/// Returns the opener when the relay could fire: this target is a plain
	/// page and its opener has started building a page.
	fn popup_opener(&self) -> Option<Arc<Target>> {
		if self.target_type() != TargetType::Page {
			return None;
		}
		let opener = self.opener()?;
		opener.page.is_claimed().then_some(opener)
	}

	async fn relay_popup(self: &Arc<Self>, opener: Arc<Target>) {
		let Some(flight) = opener.page.current() else {
			return;
		};
		let opener_page = match flight.await {
			Ok(page) => page,
			Err(e) => {
				tracing::debug!(target_id = %self.id, opener_id = %opener.id, error = %e, "Opener has no page, skipping popup");
				return;
			}
		};
		if opener_page.listener_count(PageEvent::Popup) == 0 {
			return;
		}

		match self.page().await {
			Ok(Some(popup)) => {
				tracing::debug!(target_id = %self.id, opener_id = %opener.id, "Emitting popup");
				opener_page.emit_popup(popup);
			}
			Ok(None) => {}
			Err(e) => {
				tracing::warn!(target_id = %self.id, opener_id = %opener.id, error = %e, "Failed to build popup page");
			}
		}
	}
}

impl std::fmt::Debug for Target {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Target")
			.field("id", &self.id)
			.field("info", &*self.info.read())
			.field("readiness", &self.readiness.peek())
			.field("closed", &self.is_closed())
			.finish()
	}
}
