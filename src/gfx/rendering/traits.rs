//! Seams between the frame loop and whatever draws the frame.
//!
//! The wgpu renderer implements both traits; tests substitute recording fakes.

use crate::{
    error::RenderError,
    gfx::{camera::PerspectiveCamera, scene::Scene},
};

/// Draws one frame of a scene as seen through a camera
pub trait SceneRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;
}

/// Receives viewport changes from the resize handler.
///
/// Sizes are logical pixels; the pixel ratio maps them to device pixels.
pub trait ResizeTarget {
    fn set_size(&mut self, width: f64, height: f64);
    fn set_pixel_ratio(&mut self, pixel_ratio: f64);
}
