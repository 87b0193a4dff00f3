//! The bee's knees
//!
//! A small wgpu scene: matcap-shaded extruded text surrounded by a random
//! field of tori, viewed through a perspective camera with damped orbit
//! controls.

pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod gfx;
pub mod ui;
pub mod viewport;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::App;
pub use config::AppConfig;
