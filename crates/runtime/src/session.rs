//! Session traits.
//!
//! A [`CdpSession`] is a flattened protocol session attached to a single
//! target. Targets never build sessions themselves; they hold a
//! [`SessionFactory`] handed over by whoever owns the browser connection.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A protocol session bound to one target.
#[async_trait]
pub trait CdpSession: Send + Sync {
	/// Returns the protocol session id.
	fn id(&self) -> &str;

	/// Sends a command and waits for its result.
	async fn send(&self, method: &str, params: Value) -> Result<Value>;

	/// Detaches the session from its target.
	async fn detach(&self) -> Result<()>;
}

/// Capability that opens new sessions for a particular target.
///
/// Every call yields an independent session. Closures returning a future are
/// accepted directly:
///
/// ```ignore
/// let factory = move || {
///     let conn = conn.clone();
///     async move { conn.attach(&target_id).await }
/// };
/// ```
#[async_trait]
pub trait SessionFactory: Send + Sync {
	/// Opens a new session.
	async fn create_session(&self) -> Result<Arc<dyn CdpSession>>;
}

#[async_trait]
impl<F, Fut> SessionFactory for F
where
	F: Fn() -> Fut + Send + Sync,
	Fut: Future<Output = Result<Arc<dyn CdpSession>>> + Send,
{
	async fn create_session(&self) -> Result<Arc<dyn CdpSession>> {
		(self)().await
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::{AtomicUsize, Ordering};

	use super::*;
	use crate::Error;

	struct NullSession(String);

	#[async_trait]
	impl CdpSession for NullSession {
		fn id(&self) -> &str {
			&self.0
		}

		async fn send(&self, _method: &str, _params: Value) -> Result<Value> {
			Ok(Value::Null)
		}

		async fn detach(&self) -> Result<()> {
			Ok(())
		}
	}

	#[tokio::test]
	async fn closure_factory_yields_independent_sessions() {
		let calls = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let factory = move || {
			let n = counter.fetch_add(1, Ordering::SeqCst);
			async move { Ok::<_, Error>(Arc::new(NullSession(format!("S{n}"))) as Arc<dyn CdpSession>) }
		};
		let factory: Arc<dyn SessionFactory> = Arc::new(factory);

		let a = factory.create_session().await.unwrap();
		let b = factory.create_session().await.unwrap();
		assert_eq!(a.id(), "S0");
		assert_eq!(b.id(), "S1");
		assert_eq!(calls.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn closure_factory_propagates_errors() {
		let factory = || async {
			Err::<Arc<dyn CdpSession>, _>(Error::SessionFailed {
				target_id: "T".to_string(),
				reason: "detached".to_string(),
			})
		};
		let err = factory.create_session().await.err().unwrap();
		assert!(err.is_session_failure());
	}
}
