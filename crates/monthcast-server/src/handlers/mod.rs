//! HTTP request handlers organized by area
//!
//! Each submodule contains handlers for a specific part of the app.

pub mod analyze;
pub mod ui;
pub mod upload;

// Re-export all handlers for use in router
pub use analyze::*;
pub use ui::*;
