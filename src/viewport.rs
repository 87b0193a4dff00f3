//! Viewport state and the window resize handler.

use crate::{
    config::MAX_PIXEL_RATIO,
    gfx::{camera::PerspectiveCamera, rendering::traits::ResizeTarget},
};

/// Window inner size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: ViewportSize,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            size: ViewportSize { width, height },
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    pub fn aspect(&self) -> f32 {
        (self.size.width / self.size.height) as f32
    }

    /// Size of the drawing buffer in device pixels
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        drawing_buffer_size(self.size.width, self.size.height, self.pixel_ratio)
    }
}

/// Caps the device pixel ratio at [`MAX_PIXEL_RATIO`].
///
/// NaN and negative ratios are treated as 1. Zero passes through; the
/// drawing buffer never drops below one pixel per axis.
pub fn clamp_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_nan() || device_pixel_ratio < 0.0 {
        return 1.0;
    }
    device_pixel_ratio.min(MAX_PIXEL_RATIO)
}

/// Logical size scaled by the pixel ratio, rounded, at least one pixel per axis
pub fn drawing_buffer_size(width: f64, height: f64, pixel_ratio: f64) -> (u32, u32) {
    let scale = |logical: f64| ((logical * pixel_ratio).round().max(1.0)) as u32;
    (scale(width), scale(height))
}

/// Device pixels per logical pixel actually covered by a drawing buffer
/// `buffer_width` pixels wide.
pub fn framebuffer_scale(logical_width: f64, buffer_width: u32) -> f64 {
    if logical_width <= 0.0 {
        return 1.0;
    }
    buffer_width as f64 / logical_width
}

/// Applies a window resize to the viewport, the camera and the renderer.
pub fn handle_resize<R: ResizeTarget + ?Sized>(
    viewport: &mut Viewport,
    camera: &mut PerspectiveCamera,
    renderer: &mut R,
    width: f64,
    height: f64,
    device_pixel_ratio: f64,
) {
    viewport.size = ViewportSize { width, height };
    viewport.pixel_ratio = clamp_pixel_ratio(device_pixel_ratio);

    camera.aspect = viewport.aspect();
    camera.update_projection_matrix();

    renderer.set_size(width, height);
    renderer.set_pixel_ratio(viewport.pixel_ratio);

    log::debug!(
        "Viewport resized to {}x{} (pixel ratio {})",
        width,
        height,
        viewport.pixel_ratio
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingTarget {
        size: Option<(f64, f64)>,
        pixel_ratio: Option<f64>,
        calls: usize,
    }

    impl ResizeTarget for RecordingTarget {
        fn set_size(&mut self, width: f64, height: f64) {
            self.size = Some((width, height));
            self.calls += 1;
        }

        fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
            self.pixel_ratio = Some(pixel_ratio);
            self.calls += 1;
        }
    }

    #[test]
    fn test_clamp_pixel_ratio() {
        assert_eq!(clamp_pixel_ratio(1.0), 1.0);
        assert_eq!(clamp_pixel_ratio(1.5), 1.5);
        assert_eq!(clamp_pixel_ratio(2.0), 2.0);
        assert_eq!(clamp_pixel_ratio(3.0), 2.0);
        assert_eq!(clamp_pixel_ratio(0.0), 0.0);
        assert_eq!(clamp_pixel_ratio(-2.0), 1.0);
        assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
        assert_eq!(clamp_pixel_ratio(f64::INFINITY), 2.0);
    }

    #[test]
    fn test_drawing_buffer_size() {
        let viewport = Viewport::new(1200.0, 800.0, 3.0);
        assert_eq!(viewport.drawing_buffer_size(), (2400, 1600));
        assert_eq!(drawing_buffer_size(0.0, 0.0, 2.0), (1, 1));
        assert_eq!(drawing_buffer_size(100.4, 50.6, 1.0), (100, 51));
        assert_eq!(drawing_buffer_size(800.0, 600.0, 0.0), (1, 1));
    }

    #[test]
    fn test_framebuffer_scale_follows_drawing_buffer() {
        assert_eq!(framebuffer_scale(800.0, 1600), 2.0);
        assert_eq!(framebuffer_scale(800.0, 1), 1.0 / 800.0);
        assert_eq!(framebuffer_scale(0.0, 1), 1.0);
    }

    #[test]
    fn test_resize_updates_everything() {
        let mut viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut camera = PerspectiveCamera::new(60.0, viewport.aspect(), 0.1, 100.0);
        let mut renderer = RecordingTarget::default();

        handle_resize(&mut viewport, &mut camera, &mut renderer, 1024.0, 512.0, 1.25);

        assert_eq!(viewport.size, ViewportSize { width: 1024.0, height: 512.0 });
        assert_eq!(camera.aspect, 2.0);
        assert_eq!(renderer.size, Some((1024.0, 512.0)));
        assert_eq!(renderer.pixel_ratio, Some(1.25));
        assert_eq!(renderer.calls, 2);
    }
}
