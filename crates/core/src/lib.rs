//! cdp-target: lifecycle core for DevTools protocol targets
//!
//! A [`Target`] is one remote execution context (page, worker, browser...)
//! reported by the browser over the DevTools protocol. This crate tracks its
//! metadata, decides when it is ready to use, builds its [`Page`] or
//! [`Worker`] handle exactly once, and tells an opener page about popups.
//!
//! # Example
//!
//! ```ignore
//! use cdp_target::{Target, TargetOptions, TaskQueue, default_is_page_target};
//!
//! // Inside the browser's `Target.targetCreated` handler:
//! let target = Target::new(
//!     event.target_info,
//!     &context,
//!     Arc::new(move || connection.clone().attach(target_id.clone())),
//!     TargetOptions::default(),
//!     Arc::clone(&screenshot_queue),
//!     default_is_page_target(),
//! );
//! registry.insert(target.id().to_string(), Arc::clone(&target));
//!
//! if target.wait_for_initialized().await {
//!     if let Some(page) = target.page().await? {
//!         page.on_popup(|popup| async move {
//!             println!("popup opened: {}", popup.url());
//!             Ok(())
//!         });
//!     }
//! }
//! ```

mod gate;
mod single_flight;

pub mod context;
pub mod handlers;
pub mod options;
pub mod page;
pub mod target;
pub mod task_queue;
pub mod worker;

pub use context::{Browser, BrowserContext};
pub use gate::{Gate, GateWaiter};
pub use options::{IsPageTarget, TargetOptions, TargetOptionsBuilder, default_is_page_target};
pub use page::{Page, PageEvent, Subscription};
pub use target::Target;
pub use task_queue::TaskQueue;
pub use worker::{ConsoleHook, ExceptionHook, Worker, noop_hook};

// Re-export protocol types for convenience
pub use cdp_target_protocol::{TargetInfo, TargetType, Viewport};

// Re-export runtime seam
pub use cdp_target_runtime::{CdpSession, Error, Result, SessionFactory};
