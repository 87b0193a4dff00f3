//! Damped orbit controls.
//!
//! Rotates the camera around a target on a sphere, dollies along the view
//! direction and pans the target in screen space. Input accumulates into
//! deltas that [`OrbitControls::update`] applies once per frame.

use std::f32::consts::PI;

use cgmath::{EuclideanSpace, InnerSpace, MetricSpace, Point3, Vector3, Zero};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use super::perspective_camera::PerspectiveCamera;

/// Smallest change in position considered movement
const MOVE_EPSILON: f32 = 1e-6;
/// Keeps the polar angle away from the poles where `look_at` degenerates
const POLE_EPSILON: f32 = 1e-6;
/// Pixel scroll distance treated as one wheel notch
const PIXELS_PER_LINE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    None,
    Rotate,
    Pan,
    Dolly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SphericalDelta {
    theta: f32,
    phi: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    spherical_delta: SphericalDelta,
    pan_offset: Vector3<f32>,
    scale: f32,
    drag: DragState,
    shift_held: bool,
    cursor: Option<PhysicalPosition<f64>>,
    last_position: Option<Point3<f32>>,
    last_target: Point3<f32>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            target: Point3::origin(),
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            spherical_delta: SphericalDelta::default(),
            pan_offset: Vector3::zero(),
            scale: 1.0,
            drag: DragState::None,
            shift_held: false,
            cursor: None,
            last_position: None,
            last_target: Point3::origin(),
        }
    }

    /// Orbits left around the target by `angle` radians
    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    /// Orbits up over the target by `angle` radians
    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Moves towards the target, `dolly_scale < 1`
    pub fn dolly_in(&mut self, dolly_scale: f32) {
        self.scale *= dolly_scale;
    }

    pub fn dolly_out(&mut self, dolly_scale: f32) {
        self.scale /= dolly_scale;
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Pans by a screen-space pixel delta.
    ///
    /// The pan distance is scaled so a drag across the full window height
    /// moves the target by the visible height at the target's depth.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32, camera: &PerspectiveCamera, height: f32) {
        if height <= 0.0 {
            return;
        }
        let distance = camera.position.distance(self.target);
        let target_distance = distance * (camera.fov_degrees.to_radians() / 2.0).tan();
        let (right, up) = camera.screen_axes();

        self.pan_offset += right * (-2.0 * delta_x * target_distance / height);
        self.pan_offset += up * (2.0 * delta_y * target_distance / height);
    }

    /// Applies a pointer drag for the current drag mode
    pub fn drag(&mut self, delta_x: f32, delta_y: f32, camera: &PerspectiveCamera, height: f32) {
        if height <= 0.0 {
            return;
        }
        match self.drag {
            DragState::Rotate => {
                self.rotate_left(2.0 * PI * delta_x * self.rotate_speed / height);
                self.rotate_up(2.0 * PI * delta_y * self.rotate_speed / height);
            }
            DragState::Pan => {
                self.pan(delta_x * self.pan_speed, delta_y * self.pan_speed, camera, height);
            }
            DragState::Dolly => {
                if delta_y > 0.0 {
                    self.dolly_out(self.zoom_scale());
                } else if delta_y < 0.0 {
                    self.dolly_in(self.zoom_scale());
                }
            }
            DragState::None => {}
        }
    }

    pub fn on_modifiers(&mut self, shift: bool) {
        self.shift_held = shift;
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.drag = match (state, button) {
            (ElementState::Released, _) => DragState::None,
            (ElementState::Pressed, MouseButton::Left) if self.shift_held => DragState::Pan,
            (ElementState::Pressed, MouseButton::Left) => DragState::Rotate,
            (ElementState::Pressed, MouseButton::Right) => DragState::Pan,
            (ElementState::Pressed, MouseButton::Middle) => DragState::Dolly,
            (ElementState::Pressed, _) => self.drag,
        };
    }

    pub fn on_cursor_moved(
        &mut self,
        position: PhysicalPosition<f64>,
        camera: &PerspectiveCamera,
        height: f32,
    ) {
        if let Some(last) = self.cursor.replace(position) {
            let dx = (position.x - last.x) as f32;
            let dy = (position.y - last.y) as f32;
            self.drag(dx, dy, camera, height);
        }
    }

    pub fn on_wheel(&mut self, delta: MouseScrollDelta) {
        let notches = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => y / PIXELS_PER_LINE,
        };
        // Positive y scrolls away from the user, which moves the camera in
        if notches > 0.0 {
            self.dolly_in(self.zoom_scale());
        } else if notches < 0.0 {
            self.dolly_out(self.zoom_scale());
        }
    }

    /// Routes window input to the controls; returns whether it was used
    pub fn handle_window_event(
        &mut self,
        event: &WindowEvent,
        camera: &PerspectiveCamera,
        height: f32,
    ) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.on_modifiers(modifiers.state().shift_key());
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_button(*button, *state);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(*position, camera, height);
                self.drag != DragState::None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.drag = DragState::None;
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.on_wheel(*delta);
                true
            }
            _ => false,
        }
    }

    /// Applies accumulated input to the camera; returns whether it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;

        let mut radius = offset.magnitude();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        if self.enable_damping {
            theta += self.spherical_delta.theta * self.damping_factor;
            phi += self.spherical_delta.phi * self.damping_factor;
        } else {
            theta += self.spherical_delta.theta;
            phi += self.spherical_delta.phi;
        }

        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        let sin_phi_radius = phi.sin() * radius;
        let offset = Vector3::new(
            sin_phi_radius * theta.sin(),
            phi.cos() * radius,
            sin_phi_radius * theta.cos(),
        );

        camera.set_position(self.target + offset);
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= decay;
            self.spherical_delta.phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.spherical_delta = SphericalDelta::default();
            self.pan_offset = Vector3::zero();
        }

        let zoomed = self.scale != 1.0;
        self.scale = 1.0;

        let moved = match self.last_position {
            None => true,
            Some(last) => {
                last.distance2(camera.position) > MOVE_EPSILON
                    || self.last_target.distance2(self.target) > MOVE_EPSILON
            }
        };

        if zoomed || moved {
            self.last_position = Some(camera.position);
            self.last_target = self.target;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(60.0, 1.5, 0.1, 100.0);
        camera.set_position(Point3::new(1.0, 1.0, 2.0));
        camera.look_at(Point3::origin());
        camera
    }

    fn azimuth(camera: &PerspectiveCamera) -> f32 {
        camera.position.x.atan2(camera.position.z)
    }

    #[test]
    fn test_damping_spreads_rotation_over_frames() {
        let mut camera = camera();
        let mut controls = OrbitControls::new();
        let start = azimuth(&camera);

        controls.rotate_left(0.5);
        controls.update(&mut camera);
        let first_step = start - azimuth(&camera);
        assert!((first_step - 0.5 * 0.05).abs() < 1e-4);

        let before = azimuth(&camera);
        controls.update(&mut camera);
        let second_step = before - azimuth(&camera);
        assert!((second_step - 0.5 * 0.95 * 0.05).abs() < 1e-4);
        assert!(second_step < first_step);

        for _ in 0..400 {
            controls.update(&mut camera);
        }
        assert!((start - azimuth(&camera) - 0.5).abs() < 1e-3);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_rotation_keeps_distance() {
        let mut camera = camera();
        let mut controls = OrbitControls::new();
        let distance = camera.position.distance(controls.target);

        controls.rotate_left(1.0);
        controls.rotate_up(0.3);
        for _ in 0..10 {
            controls.update(&mut camera);
        }
        assert!((camera.position.distance(controls.target) - distance).abs() < 1e-4);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut camera = camera();
        let mut controls = OrbitControls::new();
        controls.enable_damping = false;
        let distance = camera.position.distance(controls.target);

        controls.rotate_up(10.0);
        controls.update(&mut camera);
        assert!(camera.position.y > distance * 0.999);
        assert!(camera.position.y < distance * 1.001);

        controls.rotate_up(-20.0);
        controls.update(&mut camera);
        assert!(camera.position.y < -distance * 0.999);
    }

    #[test]
    fn test_dolly_scales_distance() {
        let mut camera = camera();
        let mut controls = OrbitControls::new();
        let distance = camera.position.distance(controls.target);

        controls.dolly_in(0.5);
        assert!(controls.update(&mut camera));
        assert!((camera.position.distance(controls.target) - distance * 0.5).abs() < 1e-4);

        controls.on_wheel(MouseScrollDelta::LineDelta(0.0, -1.0));
        controls.update(&mut camera);
        let expected = distance * 0.5 / 0.95;
        assert!((camera.position.distance(controls.target) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_distance_limits() {
        let mut camera = camera();
        let mut controls = OrbitControls::new();
        controls.max_distance = 1.0;
        controls.update(&mut camera);
        assert!((camera.position.distance(controls.target) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_left_drag_rotates_by_window_height() {
        let mut camera = camera();
        let mut controls = OrbitControls::new();
        controls.enable_damping = false;
        let start = azimuth(&camera);

        controls.on_mouse_button(MouseButton::Left, ElementState::Pressed);
        controls.on_cursor_moved(PhysicalPosition::new(100.0, 100.0), &camera, 800.0);
        controls.on_cursor_moved(PhysicalPosition::new(200.0, 100.0), &camera, 800.0);
        controls.update(&mut camera);

        let expected = 2.0 * PI * 100.0 / 800.0;
        assert!((start - azimuth(&camera) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_moves_without_button_do_nothing() {
        let mut camera = camera();
        let mut controls = OrbitControls::new();
        controls.update(&mut camera);
        let start = camera.position;

        controls.on_cursor_moved(PhysicalPosition::new(0.0, 0.0), &camera, 800.0);
        controls.on_cursor_moved(PhysicalPosition::new(300.0, 50.0), &camera, 800.0);
        assert!(!controls.update(&mut camera));
        assert!(camera.position.distance(start) < 1e-5);
    }

    #[test]
    fn test_shift_drag_pans_target() {
        let mut camera = camera();
        let mut controls = OrbitControls::new();
        controls.enable_damping = false;
        let offset = camera.position - controls.target;

        controls.on_modifiers(true);
        controls.on_mouse_button(MouseButton::Left, ElementState::Pressed);
        controls.on_cursor_moved(PhysicalPosition::new(0.0, 0.0), &camera, 800.0);
        controls.on_cursor_moved(PhysicalPosition::new(-80.0, 0.0), &camera, 800.0);
        controls.update(&mut camera);

        assert!(controls.target.to_vec().magnitude() > 0.0);
        // Panning translates camera and target together
        assert!(((camera.position - controls.target) - offset).magnitude() < 1e-4);
    }
}
