//! Adapter utilities for the `scrolling-tabs` crate.
//!
//! The `scrolling-tabs` crate is UI-agnostic and only reports what the page surface should do.
//! This crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Tween-driven animation of programmatic page jumps
//! - Paged drag simulation that snaps to the nearest page on release
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![forbid(unsafe_code)]

mod driver;
mod tween;


pub use driver::{DEFAULT_PAGE_ANIMATION_MS, Driver, SNAP_THRESHOLD};
pub use tween::{Easing, Tween};
