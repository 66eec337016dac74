//! Test doubles for the browser-side collaborators.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cdp_target::{
	Browser, BrowserContext, CdpSession, Error, Result, SessionFactory, Target, TargetInfo, TargetOptions, TaskQueue,
	default_is_page_target,
};
use parking_lot::Mutex;
use serde_json::Value;

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cdp_target=debug")),
		)
		.with_test_writer()
		.try_init();
}

/// Session that records every command it is sent.
///
/// Commands sent after `detach` fail with [`Error::TargetClosed`]; a method
/// named in `reject` fails with [`Error::Remote`].
pub struct RecordingSession {
	id: String,
	sent: Mutex<Vec<(String, Value)>>,
	reject: Option<String>,
	detached: AtomicBool,
}

impl RecordingSession {
	pub fn methods(&self) -> Vec<String> {
		self.sent.lock().iter().map(|(m, _)| m.clone()).collect()
	}

	pub fn params(&self, method: &str) -> Option<Value> {
		self.sent
			.lock()
			.iter()
			.find(|(m, _)| m == method)
			.map(|(_, p)| p.clone())
	}
}

#[async_trait]
impl CdpSession for RecordingSession {
	fn id(&self) -> &str {
		&self.id
	}

	async fn send(&self, method: &str, params: Value) -> Result<Value> {
		if self.detached.load(Ordering::SeqCst) {
			return Err(Error::TargetClosed {
				target_type: "page".to_string(),
				context: format!("session {} is detached", self.id),
			});
		}
		self.sent.lock().push((method.to_string(), params));
		if self.reject.as_deref() == Some(method) {
			return Err(Error::Remote {
				method: method.to_string(),
				code: -32000,
				message: "Not allowed".to_string(),
			});
		}
		Ok(Value::Object(Default::default()))
	}

	async fn detach(&self) -> Result<()> {
		if self.detached.swap(true, Ordering::SeqCst) {
			return Err(Error::ChannelClosed);
		}
		Ok(())
	}
}

/// Session factory counting invocations, optionally slow or failing.
#[derive(Default)]
pub struct CountingFactory {
	calls: AtomicUsize,
	delay: Option<Duration>,
	fail: bool,
	reject: Option<String>,
	sessions: Mutex<Vec<Arc<RecordingSession>>>,
}

impl CountingFactory {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn slow(delay: Duration) -> Arc<Self> {
		Arc::new(Self {
			delay: Some(delay),
			..Self::default()
		})
	}

	pub fn failing() -> Arc<Self> {
		Arc::new(Self {
			fail: true,
			delay: Some(Duration::from_millis(5)),
			..Self::default()
		})
	}

	/// Sessions from this factory fail `method` with a remote error.
	pub fn rejecting(method: &str) -> Arc<Self> {
		Arc::new(Self {
			reject: Some(method.to_string()),
			..Self::default()
		})
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn session(&self, index: usize) -> Arc<RecordingSession> {
		Arc::clone(&self.sessions.lock()[index])
	}
}

#[async_trait]
impl SessionFactory for CountingFactory {
	async fn create_session(&self) -> Result<Arc<dyn CdpSession>> {
		let n = self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		if self.fail {
			return Err(Error::SessionFailed {
				target_id: "unknown".to_string(),
				reason: "target detached".to_string(),
			});
		}
		let session = Arc::new(RecordingSession {
			id: format!("session-{n}"),
			sent: Mutex::new(Vec::new()),
			reject: self.reject.clone(),
			detached: AtomicBool::new(false),
		});
		self.sessions.lock().push(Arc::clone(&session));
		Ok(session as Arc<dyn CdpSession>)
	}
}

/// In-memory registry standing in for the browser.
#[derive(Default)]
pub struct FakeBrowser {
	targets: Mutex<HashMap<String, Arc<Target>>>,
}

impl FakeBrowser {
	pub fn insert(&self, target: &Arc<Target>) {
		self.targets.lock().insert(target.id().to_string(), Arc::clone(target));
	}

	pub fn remove(&self, target_id: &str) {
		self.targets.lock().remove(target_id);
	}
}

impl Browser for FakeBrowser {
	fn target(&self, target_id: &str) -> Option<Arc<Target>> {
		self.targets.lock().get(target_id).cloned()
	}

	fn targets(&self) -> Vec<Arc<Target>> {
		self.targets.lock().values().cloned().collect()
	}
}

/// Browser, default context and shared queue, kept alive together.
pub struct Harness {
	pub browser: Arc<FakeBrowser>,
	pub context: Arc<BrowserContext>,
	pub queue: Arc<TaskQueue>,
	pub options: TargetOptions,
}

impl Harness {
	pub fn new() -> Self {
		Self::with_options(TargetOptions::default())
	}

	pub fn with_options(options: TargetOptions) -> Self {
		init_tracing();
		let browser = Arc::new(FakeBrowser::default());
		let as_dyn: Arc<dyn Browser> = browser.clone();
		let context = BrowserContext::new(&as_dyn, None);
		Self {
			browser,
			context,
			queue: Arc::new(TaskQueue::new()),
			options,
		}
	}

	/// Creates a target and registers it, as the browser does on `targetCreated`.
	pub fn spawn(&self, info: TargetInfo, factory: Arc<CountingFactory>) -> Arc<Target> {
		let target = Target::new(
			info,
			&self.context,
			factory,
			self.options.clone(),
			Arc::clone(&self.queue),
			default_is_page_target(),
		);
		self.browser.insert(&target);
		target
	}
}
