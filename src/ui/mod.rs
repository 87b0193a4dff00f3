//! # User Interface Module
//!
//! A Dear ImGui overlay drawn on top of the scene every frame.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu
//! - [`panel`] - The debug panel
//!
//! When the overlay wants the pointer, input is not forwarded to the orbit
//! controls.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::debug_panel;
