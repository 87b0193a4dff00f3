//! # Graphics Module
//!
//! Everything between loaded assets and pixels on screen.
//!
//! - **Camera** ([`camera`]) - Perspective camera and damped orbit controls
//! - **Fonts** ([`font`]) - Typeface JSON parsing and text layout
//! - **Geometry** ([`geometry`]) - Torus primitive and extruded text
//! - **Rendering** ([`rendering`]) - Matcap pipeline and instanced draws
//! - **Resources** ([`resources`]) - Materials, textures and uniforms
//! - **Scene** ([`scene`]) - Scene container and population

pub mod camera;
pub mod font;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::{OrbitControls, PerspectiveCamera};
pub use rendering::render_engine::RenderEngine;
