//! Error types for the target runtime.

use std::sync::Arc;

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to a target.
///
/// The type is `Clone` because a failed handle materialization is memoized
/// and handed to every later caller.
#[derive(Debug, Clone, Error)]
pub enum Error {
	/// The session factory could not open a session.
	#[error("Failed to create session for target {target_id}: {reason}")]
	SessionFailed { target_id: String, reason: String },

	/// Protocol-level error (malformed or unexpected message).
	#[error("Protocol error: {0}")]
	ProtocolError(String),

	/// Error returned by the browser for a command.
	#[error("{method} failed ({code}): {message}")]
	Remote {
		/// Protocol method that was sent
		method: String,
		/// Protocol error code
		code: i64,
		/// Human-readable error message
		message: String,
	},

	/// Target was closed.
	#[error("Target closed: Cannot perform operation on closed {target_type}. {context}")]
	TargetClosed {
		target_type: String,
		context: String,
	},

	/// Invalid argument provided to method.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// Channel closed unexpectedly.
	#[error("Channel closed unexpectedly")]
	ChannelClosed,

	/// A background task panicked or was aborted.
	#[error("Task failed: {0}")]
	TaskFailed(String),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(Arc<serde_json::Error>),
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Json(Arc::new(err))
	}
}

impl Error {
	/// Returns true if this is a target closed error.
	pub fn is_target_closed(&self) -> bool {
		matches!(self, Error::TargetClosed { .. })
	}

	/// Returns true if the session could not be created.
	pub fn is_session_failure(&self) -> bool {
		matches!(self, Error::SessionFailed { .. })
	}
}
