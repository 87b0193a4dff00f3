//! # Procedural Geometry Generation
//!
//! CPU-side geometry for the scene: the torus primitive and extruded text.
//! Geometry is built once, then shared between every node that draws it.
//!
//! ## Usage
//!
//! ```rust
//! use bees_knees::gfx::geometry::{generate_torus, TorusParams};
//!
//! let torus = generate_torus(&TorusParams::default());
//! assert_eq!(torus.triangle_count(), 20 * 45 * 2);
//! ```

pub mod primitives;
pub mod text;

pub use primitives::*;
pub use text::{generate_text, TextGeometryParams};

use cgmath::Vector3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BoundingBox {
    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }
}

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounding box of all vertices, `None` for empty geometry
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.vertices.first()?;
        let mut min = Vector3::from(*first);
        let mut max = min;

        for v in &self.vertices[1..] {
            min.x = min.x.min(v[0]);
            min.y = min.y.min(v[1]);
            min.z = min.z.min(v[2]);
            max.x = max.x.max(v[0]);
            max.y = max.y.max(v[1]);
            max.z = max.z.max(v[2]);
        }

        Some(BoundingBox { min, max })
    }

    /// Moves every vertex by `offset`
    pub fn translate(&mut self, offset: Vector3<f32>) {
        for v in &mut self.vertices {
            v[0] += offset.x;
            v[1] += offset.y;
            v[2] += offset.z;
        }
    }

    /// Centers the geometry on its local origin using its bounding box.
    ///
    /// Returns the offset that was applied.
    pub fn center(&mut self) -> Vector3<f32> {
        let Some(bounds) = self.bounding_box() else {
            return Vector3::new(0.0, 0.0, 0.0);
        };
        let offset = -bounds.center();
        self.translate(offset);
        offset
    }

    /// Convert to the interleaved vertex format used by the renderer
    pub fn to_scene_format(&self) -> (Vec<crate::gfx::scene::vertex::Vertex3D>, Vec<u32>) {
        use crate::gfx::scene::vertex::Vertex3D;

        let vertices: Vec<Vertex3D> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GeometryData {
        GeometryData {
            vertices: vec![[1.0, 1.0, 1.0], [3.0, 1.0, 1.0], [1.0, 5.0, 2.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_bounding_box() {
        let bounds = triangle().bounding_box().unwrap();
        assert_eq!(bounds.min, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(bounds.max, Vector3::new(3.0, 5.0, 2.0));
        assert_eq!(bounds.center(), Vector3::new(2.0, 3.0, 1.5));
    }

    #[test]
    fn test_center_moves_bounds_to_origin() {
        let mut data = triangle();
        let offset = data.center();
        assert_eq!(offset, Vector3::new(-2.0, -3.0, -1.5));

        let bounds = data.bounding_box().unwrap();
        assert!(bounds.center().x.abs() < 1e-6);
        assert!(bounds.center().y.abs() < 1e-6);
        assert!(bounds.center().z.abs() < 1e-6);
    }

    #[test]
    fn test_empty_geometry() {
        let mut data = GeometryData::new();
        assert!(data.bounding_box().is_none());
        assert_eq!(data.center(), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(data.triangle_count(), 0);
    }
}
