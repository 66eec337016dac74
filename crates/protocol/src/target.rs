//! `Target.TargetInfo` and the closed set of target kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata the browser reports for a target.
///
/// Delivered by `Target.targetCreated` and `Target.targetInfoChanged`. Each
/// event carries a complete snapshot, so consumers replace rather than merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetInfo {
	/// Opaque identifier, stable for the target's lifetime
	pub target_id: String,
	/// Raw kind string (`page`, `service_worker`, ...)
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub url: String,
	/// Whether a client is attached to the target
	#[serde(default)]
	pub attached: bool,
	/// Id of the target that opened this one, if any
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub opener_id: Option<String>,
	/// Id of the browser context the target lives in
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub browser_context_id: Option<String>,
}

impl TargetInfo {
	/// Creates an info snapshot with empty title and no opener.
	pub fn new(target_id: impl Into<String>, kind: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			target_id: target_id.into(),
			kind: kind.into(),
			title: String::new(),
			url: url.into(),
			attached: false,
			opener_id: None,
			browser_context_id: None,
		}
	}

	/// Sets the opener id.
	pub fn with_opener(mut self, opener_id: impl Into<String>) -> Self {
		self.opener_id = Some(opener_id.into());
		self
	}

	/// Sets the browser context id.
	pub fn with_browser_context(mut self, context_id: impl Into<String>) -> Self {
		self.browser_context_id = Some(context_id.into());
		self
	}

	/// Returns a copy of this snapshot pointing at a different url.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = url.into();
		self
	}

	/// Returns the closed-set kind of this target.
	pub fn target_type(&self) -> TargetType {
		TargetType::from_kind(&self.kind)
	}
}

/// Closed set of target kinds.
///
/// The protocol reports kinds as an open-ended string; anything not listed
/// here collapses to [`TargetType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
	Page,
	BackgroundPage,
	ServiceWorker,
	SharedWorker,
	Browser,
	Webview,
	Other,
}

impl TargetType {
	/// Maps a raw protocol kind string. Never fails.
	pub fn from_kind(kind: &str) -> Self {
		match kind {
			"page" => Self::Page,
			"background_page" => Self::BackgroundPage,
			"service_worker" => Self::ServiceWorker,
			"shared_worker" => Self::SharedWorker,
			"browser" => Self::Browser,
			"webview" => Self::Webview,
			_ => Self::Other,
		}
	}

	/// Returns the protocol spelling of this kind.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Page => "page",
			Self::BackgroundPage => "background_page",
			Self::ServiceWorker => "service_worker",
			Self::SharedWorker => "shared_worker",
			Self::Browser => "browser",
			Self::Webview => "webview",
			Self::Other => "other",
		}
	}

	/// Returns true for kinds that get a worker handle.
	pub fn is_worker(&self) -> bool {
		matches!(self, Self::ServiceWorker | Self::SharedWorker)
	}
}

impl fmt::Display for TargetType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
