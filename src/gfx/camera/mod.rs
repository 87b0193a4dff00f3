//! Camera module
//!
//! The perspective camera, the orbit controls driving it and the uniform data
//! uploaded to the GPU each frame.

pub mod camera_utils;
pub mod orbit_controls;
pub mod perspective_camera;

// Re-export main types
pub use camera_utils::{CameraRig, CameraUniform};
pub use orbit_controls::OrbitControls;
pub use perspective_camera::PerspectiveCamera;
