use cgmath::{Matrix4, SquareMatrix};
use winit::event::WindowEvent;

use crate::config::CameraConfig;

use super::{orbit_controls::OrbitControls, perspective_camera::PerspectiveCamera};

/// Maps OpenGL clip space depth (-1..1) onto wgpu's (0..1)
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// The scene camera together with the orbit controls driving it
pub struct CameraRig {
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
}

impl CameraRig {
    /// Builds the camera from config, placed at the configured position and
    /// looking at the origin.
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = PerspectiveCamera::new(config.fov_degrees, aspect, config.near, config.far);
        camera.set_position(config.position);

        let mut controls = OrbitControls::new();
        controls.damping_factor = config.damping_factor;
        camera.look_at(controls.target);

        Self { camera, controls }
    }

    /// Forwards pointer input to the orbit controls.
    ///
    /// `height` is the window's inner height in the same units as the cursor
    /// positions carried by the events.
    pub fn process_event(&mut self, event: &WindowEvent, height: f32) -> bool {
        self.controls.handle_window_event(event, &self.camera, height)
    }

    /// Advances the controls by one frame
    pub fn update(&mut self) -> bool {
        self.controls.update(&mut self.camera)
    }

    pub fn uniform(&self) -> CameraUniform {
        self.camera.uniform()
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view: convert_matrix4_to_array(Matrix4::identity()),
            projection: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}
