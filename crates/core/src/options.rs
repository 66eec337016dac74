//! Per-browser settings threaded through every target.

use std::sync::Arc;

use cdp_target_protocol::{TargetInfo, TargetType, Viewport};
use serde::{Deserialize, Serialize};

/// Decides whether a target should be treated as a page.
///
/// Consulted against the target's current info, both for the readiness gate
/// and for [`Target::page`](crate::Target::page) eligibility.
pub type IsPageTarget = Arc<dyn Fn(&TargetInfo) -> bool + Send + Sync>;

/// Default page predicate: pages, background pages and webviews.
pub fn default_is_page_target() -> IsPageTarget {
	Arc::new(|info: &TargetInfo| {
		matches!(
			info.target_type(),
			TargetType::Page | TargetType::BackgroundPage | TargetType::Webview
		)
	})
}

/// Settings handed unchanged to every page a target materializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetOptions {
	/// Ignore TLS certificate errors on new pages
	#[serde(default)]
	pub ignore_https_errors: bool,

	/// Viewport applied to new pages; `None` keeps the browser's own size
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_viewport: Option<Viewport>,
}

impl TargetOptions {
	/// Creates a new builder.
	pub fn builder() -> TargetOptionsBuilder {
		TargetOptionsBuilder::default()
	}
}

/// Builder for [`TargetOptions`].
#[derive(Debug, Clone, Default)]
pub struct TargetOptionsBuilder {
	inner: TargetOptions,
}

impl TargetOptionsBuilder {
	/// Sets whether certificate errors are ignored.
	pub fn ignore_https_errors(mut self, ignore: bool) -> Self {
		self.inner.ignore_https_errors = ignore;
		self
	}

	/// Sets the default viewport.
	pub fn default_viewport(mut self, viewport: Viewport) -> Self {
		self.inner.default_viewport = Some(viewport);
		self
	}

	/// Builds the options.
	pub fn build(self) -> TargetOptions {
		self.inner
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_predicate_kinds() {
		let is_page = default_is_page_target();
		assert!(is_page(&TargetInfo::new("1", "page", "")));
		assert!(is_page(&TargetInfo::new("2", "background_page", "")));
		assert!(is_page(&TargetInfo::new("3", "webview", "")));
		assert!(!is_page(&TargetInfo::new("4", "service_worker", "")));
		assert!(!is_page(&TargetInfo::new("5", "browser", "")));
		assert!(!is_page(&TargetInfo::new("6", "iframe", "")));
	}

	#[test]
	fn options_from_config_json() {
		let opts: TargetOptions =
			serde_json::from_str(r#"{"ignoreHttpsErrors": true, "defaultViewport": {"width": 1024, "height": 768}}"#).unwrap();
		assert!(opts.ignore_https_errors);
		assert_eq!(opts.default_viewport, Some(Viewport::new(1024, 768)));

		let empty: TargetOptions = serde_json::from_str("{}").unwrap();
		assert_eq!(empty, TargetOptions::default());
	}

	#[test]
	fn builder_sets_fields() {
		let opts = TargetOptions::builder()
			.ignore_https_errors(true)
			.default_viewport(Viewport::new(640, 480))
			.build();
		assert!(opts.ignore_https_errors);
		assert_eq!(opts.default_viewport.map(|v| v.width), Some(640));
	}
}
