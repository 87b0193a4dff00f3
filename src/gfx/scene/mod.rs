//! # Scene Management Module
//!
//! The scene container, its nodes and the vertex formats they are drawn with.
//!
//! ## Key Components
//!
//! - [`Scene`] - Ordered list of nodes plus a revision counter
//! - [`SceneNode`] - A named transform carrying a mesh or the camera marker
//! - [`Geometry`] - CPU geometry with lazily uploaded GPU buffers, shared via `Arc`
//! - [`Vertex3D`] / [`InstanceRaw`] - GPU vertex and per-instance layouts
//! - [`builder`] - Populates a scene with the text and the torus field
//!
//! ## Usage
//!
//! ```rust
//! use bees_knees::gfx::scene::{Scene, SceneNode};
//!
//! let mut scene = Scene::new();
//! scene.add(SceneNode::camera("camera"));
//! assert_eq!(scene.mesh_count(), 0);
//! assert_eq!(scene.revision(), 1);
//! ```

pub mod builder;
pub mod object;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod vertex;

// Re-export main types
pub use builder::{add_camera, populate, SceneAssets};
pub use object::{Geometry, GeometryBuffers, Mesh, NodeContent, SceneNode, Transform};
pub use scene::{MeshBatch, Scene};
pub use vertex::{InstanceRaw, Vertex3D};
