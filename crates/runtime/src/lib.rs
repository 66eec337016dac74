//! Target Runtime - session seam and error types
//!
//! This crate provides the low-level pieces the target core talks through:
//!
//! - **Sessions**: [`CdpSession`], a channel dedicated to one target
//! - **Session factories**: [`SessionFactory`], the capability a target uses
//!   to open new sessions
//! - **Errors**: the shared [`Error`] type and [`Result`] alias
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  cdp-target  │  Target, Page, Worker
//! └──────┬───────┘
//!        │ calls SessionFactory / CdpSession
//! ┌──────▼───────┐
//! │  runtime     │  This crate
//! └──────┬───────┘
//!        │ implemented by
//! ┌──────▼───────┐
//! │  transport   │  Connection owned by the embedding application
//! └──────────────┘
//! ```
//!
//! The transport that frames protocol messages is not part of this workspace.
//! Embedders implement [`CdpSession`] on top of their connection.

pub mod error;
pub mod session;

pub use error::{Error, Result};
pub use session::{CdpSession, SessionFactory};
