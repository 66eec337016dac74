//! [`Worker`] handle materialized for service and shared workers.

use std::sync::Arc;

use cdp_target_runtime::CdpSession;
use serde_json::Value;

/// Callback receiving `Runtime.consoleAPICalled` params.
pub type ConsoleHook = Arc<dyn Fn(&Value) + Send + Sync>;

/// Callback receiving `Runtime.exceptionThrown` params.
pub type ExceptionHook = Arc<dyn Fn(&Value) + Send + Sync>;

/// Hook that drops every event.
pub fn noop_hook() -> Arc<dyn Fn(&Value) + Send + Sync> {
	Arc::new(|_: &Value| {})
}

/// A web worker bound to its own protocol session.
pub struct Worker {
	session: Arc<dyn CdpSession>,
	url: String,
	console_hook: ConsoleHook,
	exception_hook: ExceptionHook,
}

impl Worker {
	pub fn new(
		session: Arc<dyn CdpSession>,
		url: impl Into<String>,
		console_hook: ConsoleHook,
		exception_hook: ExceptionHook,
	) -> Self {
		Self {
			session,
			url: url.into(),
			console_hook,
			exception_hook,
		}
	}

	/// Url the worker script was loaded from, as of creation.
	pub fn url(&self) -> &str {
		&self.url
	}

	pub fn session(&self) -> &Arc<dyn CdpSession> {
		&self.session
	}

	/// Routes a protocol event received on the worker's session.
	///
	/// Returns `true` if the event was handed to a hook.
	pub fn handle_event(&self, method: &str, params: &Value) -> bool {
		match method {
			"Runtime.consoleAPICalled" => (self.console_hook)(params),
			"Runtime.exceptionThrown" => (self.exception_hook)(params),
			_ => return false,
		}
		true
	}
}

impl std::fmt::Debug for Worker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Worker")
			.field("url", &self.url)
			.field("session_id", &self.session.id())
			.finish()
	}
}
