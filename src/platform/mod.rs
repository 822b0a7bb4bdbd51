//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (pointer translation, keyboard shortcuts)
//! - The requestAnimationFrame loop
//! - Storage (LocalStorage on web, see `settings`)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Command, client_to_canvas};
