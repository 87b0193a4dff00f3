//! Scene nodes and the shared resources they reference.

use std::sync::{Arc, OnceLock};

use cgmath::{Matrix4, Rad, Vector3};
use wgpu::util::DeviceExt;

use crate::gfx::{geometry::GeometryData, resources::material::MatcapMaterial};

/// Position, Euler rotation and scale of a node.
///
/// Rotation is in radians and applied in XYZ order, so the rotation matrix is
/// `Rx * Ry * Rz`. The full matrix is `T * R * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vector3::new(s, s, s);
    }

    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        let t = Matrix4::from_translation(self.position);
        let s = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        t * self.rotation_matrix() * s
    }
}

/// Vertex and index buffers of an uploaded geometry
pub struct GeometryBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// Geometry shared between nodes.
///
/// The GPU buffers are created on first use and reused by every node holding
/// the same `Arc<Geometry>`.
pub struct Geometry {
    pub name: String,
    data: GeometryData,
    gpu: OnceLock<GeometryBuffers>,
}

impl Geometry {
    pub fn new(name: impl Into<String>, data: GeometryData) -> Self {
        Self {
            name: name.into(),
            data,
            gpu: OnceLock::new(),
        }
    }

    pub fn data(&self) -> &GeometryData {
        &self.data
    }

    /// Whether the GPU buffers have been created yet
    pub fn is_uploaded(&self) -> bool {
        self.gpu.get().is_some()
    }

    pub fn buffers(&self, device: &wgpu::Device) -> &GeometryBuffers {
        self.gpu.get_or_init(|| {
            let (vertices, indices) = self.data.to_scene_format();
            log::debug!(
                "Uploading geometry '{}' ({} vertices, {} triangles)",
                self.name,
                vertices.len(),
                indices.len() / 3
            );

            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", self.name)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", self.name)),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            GeometryBuffers {
                vertex_buffer,
                index_buffer,
                index_count: indices.len() as u32,
            }
        })
    }
}

impl std::fmt::Debug for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geometry")
            .field("name", &self.name)
            .field("vertices", &self.data.vertex_count())
            .field("triangles", &self.data.triangle_count())
            .field("uploaded", &self.is_uploaded())
            .finish()
    }
}

/// A drawable pairing of shared geometry and material
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Arc<Geometry>,
    pub material: Arc<MatcapMaterial>,
}

#[derive(Debug, Clone)]
pub enum NodeContent {
    Mesh(Mesh),
    /// Marks where the camera sits in the scene; carries no drawable data.
    Camera,
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub content: NodeContent,
}

impl SceneNode {
    pub fn mesh(
        name: impl Into<String>,
        geometry: Arc<Geometry>,
        material: Arc<MatcapMaterial>,
    ) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            content: NodeContent::Mesh(Mesh { geometry, material }),
        }
    }

    pub fn camera(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            content: NodeContent::Camera,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.content {
            NodeContent::Mesh(mesh) => Some(mesh),
            NodeContent::Camera => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, SquareMatrix, Vector4};
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vector4<f32>, b: Vector4<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn test_default_transform_is_identity() {
        assert_eq!(Transform::default().matrix(), Matrix4::identity());
    }

    #[test]
    fn test_rotation_order_is_xyz() {
        let transform = Transform {
            rotation: Vector3::new(FRAC_PI_2, FRAC_PI_2, 0.0),
            ..Default::default()
        };
        // Ry first turns +Z into +X, which Rx leaves alone.
        let rotated = transform.matrix() * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!(approx(rotated, Vector4::new(1.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let mut transform = Transform {
            position: Vector3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };
        transform.set_uniform_scale(0.5);
        assert_eq!(transform.scale, Vector3::new(0.5, 0.5, 0.5));

        let moved = transform.matrix() * Vector4::new(2.0, 0.0, 0.0, 1.0);
        assert!(approx(moved, Vector4::new(2.0, 2.0, 3.0, 1.0)));
    }

    #[test]
    fn test_camera_node_has_no_mesh() {
        let node = SceneNode::camera("camera");
        assert!(node.as_mesh().is_none());
        assert_eq!(node.transform, Transform::default());
    }
}
