//! Wire types for the DevTools protocol `Target` domain.
//!
//! This crate contains the serde-serializable types exchanged with the browser
//! when it reports targets. These types represent the "protocol layer" - the
//! shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond serialization and simple projections
//! - **1:1 with protocol**: Field names match the `Target.TargetInfo` schema
//! - **Stable**: Changes only when the wire protocol changes
//!
//! Lifecycle and materialization logic lives in `cdp-target`.

pub mod target;
pub mod types;

pub use target::*;
pub use types::*;
