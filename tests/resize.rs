use bees_knees::{
    gfx::{camera::PerspectiveCamera, rendering::ResizeTarget},
    viewport::{handle_resize, Viewport, ViewportSize},
};

#[derive(Debug, Default, Clone, PartialEq)]
struct FakeRenderer {
    size: (f64, f64),
    pixel_ratio: f64,
}

impl ResizeTarget for FakeRenderer {
    fn set_size(&mut self, width: f64, height: f64) {
        self.size = (width, height);
    }

    fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
    }
}

fn setup(width: f64, height: f64) -> (Viewport, PerspectiveCamera, FakeRenderer) {
    let viewport = Viewport::new(width, height, 1.0);
    let camera = PerspectiveCamera::new(60.0, viewport.aspect(), 0.1, 100.0);
    (viewport, camera, FakeRenderer::default())
}

#[test]
fn window_grows_to_full_hd() {
    let (mut viewport, mut camera, mut renderer) = setup(800.0, 600.0);
    assert!((camera.aspect - 4.0 / 3.0).abs() < 1e-6);

    handle_resize(&mut viewport, &mut camera, &mut renderer, 1920.0, 1080.0, 1.0);

    assert_eq!(viewport.size, ViewportSize { width: 1920.0, height: 1080.0 });
    assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    assert_eq!(renderer.size, (1920.0, 1080.0));
    assert_eq!(renderer.pixel_ratio, 1.0);

    let expected = PerspectiveCamera::new(60.0, 16.0 / 9.0, 0.1, 100.0);
    assert_eq!(camera.projection_matrix(), expected.projection_matrix());
}

#[test]
fn resize_properties_hold_for_many_sizes() {
    let sizes = [(1.0, 1.0), (320.0, 240.0), (1200.0, 800.0), (333.0, 1777.0), (3840.0, 2160.0)];
    let ratios = [0.0, 0.5, 1.0, 1.25, 2.0, 2.5, 3.0];

    for &(width, height) in &sizes {
        for &dpr in &ratios {
            let (mut viewport, mut camera, mut renderer) = setup(640.0, 480.0);
            handle_resize(&mut viewport, &mut camera, &mut renderer, width, height, dpr);

            assert_eq!(camera.aspect, (width / height) as f32);
            assert_eq!(renderer.size, (width, height));
            assert_eq!(renderer.pixel_ratio, dpr.min(2.0));
            assert_eq!(viewport.pixel_ratio, dpr.min(2.0));
        }
    }
}

#[test]
fn resize_is_idempotent() {
    let (mut viewport, mut camera, mut renderer) = setup(800.0, 600.0);

    handle_resize(&mut viewport, &mut camera, &mut renderer, 1024.0, 768.0, 3.0);
    let once = (viewport, camera.aspect, camera.projection_matrix(), renderer.clone());

    handle_resize(&mut viewport, &mut camera, &mut renderer, 1024.0, 768.0, 3.0);
    let twice = (viewport, camera.aspect, camera.projection_matrix(), renderer.clone());

    assert_eq!(once, twice);
}

#[test]
fn zero_device_pixel_ratio_passes_through() {
    let (mut viewport, mut camera, mut renderer) = setup(800.0, 600.0);
    handle_resize(&mut viewport, &mut camera, &mut renderer, 800.0, 600.0, 0.0);

    assert_eq!(renderer.pixel_ratio, 0.0f64.min(2.0));
    assert_eq!(viewport.pixel_ratio, 0.0);
    assert_eq!(viewport.drawing_buffer_size(), (1, 1));
}

#[test]
fn invalid_device_pixel_ratio_falls_back_to_one() {
    for dpr in [-1.0, f64::NAN] {
        let (mut viewport, mut camera, mut renderer) = setup(800.0, 600.0);
        handle_resize(&mut viewport, &mut camera, &mut renderer, 800.0, 600.0, dpr);
        assert_eq!(renderer.pixel_ratio, 1.0);
    }
}
