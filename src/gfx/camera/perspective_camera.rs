use cgmath::{perspective, Deg, EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

use super::camera_utils::{convert_matrix4_to_array, CameraUniform, OPENGL_TO_WGPU_MATRIX};

/// A perspective camera with a cached projection matrix.
///
/// Changing `fov_degrees`, `aspect`, `near` or `far` has no effect on the
/// projection until [`PerspectiveCamera::update_projection_matrix`] is called.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    projection: Matrix4<f32>,
}

impl PerspectiveCamera {
    /// Creates a camera at the origin looking down -Z with +Y up
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_degrees,
            aspect,
            near,
            far,
            position: Point3::origin(),
            target: Point3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
            projection: Matrix4::from_scale(1.0),
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    /// Recomputes the cached projection from the current parameters
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            OPENGL_TO_WGPU_MATRIX * perspective(Deg(self.fov_degrees), self.aspect, self.near, self.far);
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }

    /// Unit vectors pointing right and up on screen
    pub fn screen_axes(&self) -> (Vector3<f32>, Vector3<f32>) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);
        (right, up)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: self.position.to_homogeneous().into(),
            view: convert_matrix4_to_array(self.view_matrix()),
            projection: convert_matrix4_to_array(self.projection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector4, Zero};

    #[test]
    fn test_projection_is_cached_until_updated() {
        let mut camera = PerspectiveCamera::new(60.0, 800.0 / 600.0, 0.1, 100.0);
        let before = camera.projection_matrix();

        camera.aspect = 1920.0 / 1080.0;
        assert_eq!(camera.projection_matrix(), before);

        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
        // x scale is cot(fov / 2) / aspect
        let expected = (1.0 / (30.0f32.to_radians()).tan()) / camera.aspect;
        assert!((camera.projection_matrix().x.x - expected).abs() < 1e-5);
    }

    #[test]
    fn test_depth_maps_to_zero_one() {
        let camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 100.0);
        let near = camera.projection_matrix() * Vector4::new(0.0, 0.0, -0.1, 1.0);
        let far = camera.projection_matrix() * Vector4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_view_matrix_looks_at_target() {
        let mut camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 100.0);
        camera.set_position(Point3::new(1.0, 1.0, 2.0));
        camera.look_at(Point3::origin());

        let target = camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        // The target lands on the view axis in front of the camera
        assert!(target.x.abs() < 1e-5);
        assert!(target.y.abs() < 1e-5);
        assert!((target.z + 6.0f32.sqrt()).abs() < 1e-5);

        let (right, up) = camera.screen_axes();
        assert!(right.dot(up).abs() < 1e-6);
        assert!(up.y > 0.0);
        assert!(!right.is_zero());
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let mut camera = PerspectiveCamera::new(60.0, 1.5, 0.1, 100.0);
        camera.set_position(Point3::new(1.0, 1.0, 2.0));
        camera.look_at(Point3::origin());

        let clip = camera.view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
        assert!((0.0..1.0).contains(&(clip.z / clip.w)));
    }

    #[test]
    fn test_uniform_carries_position() {
        let mut camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 100.0);
        camera.set_position(Point3::new(1.0, 1.0, 2.0));
        assert_eq!(camera.uniform().view_position, [1.0, 1.0, 2.0, 1.0]);
    }
}
