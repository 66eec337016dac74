//! Primitive protocol types shared across domains.

use serde::{Deserialize, Serialize};

/// Viewport applied to newly created pages.
///
/// Mirrors the parameters of `Emulation.setDeviceMetricsOverride`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
	/// Page width in pixels
	pub width: u32,
	/// Page height in pixels
	pub height: u32,
	/// Device scale factor (defaults to 1)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub device_scale_factor: Option<f64>,
	/// Whether the `meta viewport` tag is taken into account
	#[serde(default)]
	pub is_mobile: bool,
	/// Whether the viewport is in landscape mode
	#[serde(default)]
	pub is_landscape: bool,
	/// Whether the viewport supports touch events
	#[serde(default)]
	pub has_touch: bool,
}

impl Viewport {
	/// Creates a desktop viewport with the given dimensions.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			device_scale_factor: None,
			is_mobile: false,
			is_landscape: false,
			has_touch: false,
		}
	}

	/// Returns the scale factor, falling back to 1.
	pub fn scale_factor(&self) -> f64 {
		self.device_scale_factor.unwrap_or(1.0)
	}
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(800, 600)
	}
}
