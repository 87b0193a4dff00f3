//! Application configuration.
//!
//! Plain structs with defaults matching the demo scene. Override fields
//! through the `with_*` builders before handing the config to [`crate::App`].

use std::path::PathBuf;

use cgmath::Point3;

use crate::gfx::geometry::{TextGeometryParams, TorusParams};

/// Upper bound on the renderer pixel ratio
pub const MAX_PIXEL_RATIO: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Initial window size in logical pixels
    pub initial_size: (f64, f64),
    pub show_debug_panel: bool,
    pub assets: AssetConfig,
    pub scene: SceneConfig,
    pub camera: CameraConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "the bee's knees".to_string(),
            initial_size: (1200.0, 800.0),
            show_debug_panel: true,
            assets: AssetConfig::default(),
            scene: SceneConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_initial_size(mut self, width: f64, height: f64) -> Self {
        self.initial_size = (width, height);
        self
    }

    pub fn with_debug_panel(mut self, show: bool) -> Self {
        self.show_debug_panel = show;
        self
    }

    pub fn with_assets(mut self, assets: AssetConfig) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }
}

/// Locations of the font and matcap files, relative to the working directory
#[derive(Debug, Clone, PartialEq)]
pub struct AssetConfig {
    pub font_path: PathBuf,
    pub matcap_path: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("static/fonts/helvetiker_regular.typeface.json"),
            matcap_path: PathBuf::from("static/textures/matcaps/8.png"),
        }
    }
}

impl AssetConfig {
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = path.into();
        self
    }

    pub fn with_matcap_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.matcap_path = path.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub text: String,
    pub text_params: TextGeometryParams,
    pub torus: TorusParams,
    pub torus_count: usize,
    /// Side length of the cube, centered on the origin, that tori are scattered in
    pub scatter_extent: f32,
    /// Fixed seed for the scatter; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            text: "the bee's knees".to_string(),
            text_params: TextGeometryParams::default(),
            torus: TorusParams::default(),
            torus_count: 100,
            scatter_extent: 10.0,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_torus_count(mut self, count: usize) -> Self {
        self.torus_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Point3<f32>,
    pub damping_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            position: Point3::new(1.0, 1.0, 2.0),
            damping_factor: 0.05,
        }
    }
}

impl CameraConfig {
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Point3::new(x, y, z);
        self
    }

    pub fn with_damping_factor(mut self, damping_factor: f32) -> Self {
        self.damping_factor = damping_factor;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_the_demo_scene() {
        let config = AppConfig::default();
        assert_eq!(config.initial_size, (1200.0, 800.0));
        assert_eq!(config.scene.text, "the bee's knees");
        assert_eq!(config.scene.torus_count, 100);
        assert_eq!(config.scene.scatter_extent, 10.0);
        assert!(config.scene.seed.is_none());
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.position, Point3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_builders_override_fields() {
        let config = AppConfig::default()
            .with_title("demo")
            .with_debug_panel(false)
            .with_scene(SceneConfig::default().with_seed(7).with_torus_count(3))
            .with_assets(AssetConfig::default().with_font_path("font.json"));

        assert_eq!(config.title, "demo");
        assert!(!config.show_debug_panel);
        assert_eq!(config.scene.seed, Some(7));
        assert_eq!(config.scene.torus_count, 3);
        assert_eq!(config.assets.font_path, PathBuf::from("font.json"));
    }

    #[test]
    fn test_camera_builder() {
        let config = AppConfig::default().with_camera(
            CameraConfig::default()
                .with_position(0.0, 2.0, 5.0)
                .with_damping_factor(0.1),
        );

        assert_eq!(config.camera.position, Point3::new(0.0, 2.0, 5.0));
        assert_eq!(config.camera.damping_factor, 0.1);
        assert_eq!(config.camera.fov_degrees, 60.0);
    }
}
