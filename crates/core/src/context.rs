//! Browser-level collaborators a target routes through.
//!
//! Targets never own their browser or context. They keep a [`Weak`] to the
//! [`BrowserContext`], which in turn keeps a [`Weak`] to the [`Browser`], so
//! the registry can drop targets without reference cycles.

use std::sync::{Arc, Weak};

use crate::Target;

/// Owner of the target registry.
///
/// Implemented by the embedding browser object. The core only reads from it,
/// including from inside [`Target::update_info`] and
/// [`Target::report_initialized`], so the owner must not hold its registry
/// lock while calling those.
pub trait Browser: Send + Sync {
	/// Looks up a live target by id.
	fn target(&self, target_id: &str) -> Option<Arc<Target>>;

	/// Returns every live target.
	fn targets(&self) -> Vec<Arc<Target>>;
}

/// A browser context (profile) grouping targets.
pub struct BrowserContext {
	id: Option<String>,
	browser: Weak<dyn Browser>,
}

impl BrowserContext {
	/// Creates a context. `id` is `None` for the default context.
	pub fn new(browser: &Arc<dyn Browser>, id: Option<String>) -> Arc<Self> {
		Arc::new(Self {
			id,
			browser: Arc::downgrade(browser),
		})
	}

	/// Returns the protocol `browserContextId`, `None` for the default context.
	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	/// Returns true for contexts created with `Target.createBrowserContext`.
	pub fn is_incognito(&self) -> bool {
		self.id.is_some()
	}

	/// Returns the owning browser if it is still alive.
	pub fn browser(&self) -> Option<Arc<dyn Browser>> {
		self.browser.upgrade()
	}

	/// Returns the browser's targets that belong to this context.
	pub fn targets(self: &Arc<Self>) -> Vec<Arc<Target>> {
		let Some(browser) = self.browser() else {
			return Vec::new();
		};
		browser
			.targets()
			.into_iter()
			.filter(|t| t.browser_context().is_some_and(|ctx| Arc::ptr_eq(&ctx, self)))
			.collect()
	}
}

impl std::fmt::Debug for BrowserContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BrowserContext")
			.field("id", &self.id)
			.field("browser_alive", &(self.browser.strong_count() > 0))
			.finish()
	}
}
