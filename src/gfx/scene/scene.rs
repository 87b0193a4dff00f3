use std::sync::Arc;

use crate::gfx::resources::material::MatcapMaterial;

use super::{
    object::{Geometry, Mesh, NodeContent, SceneNode},
    vertex::InstanceRaw,
};

/// Root container of everything drawn in a frame.
///
/// Nodes keep their insertion order. Every insertion bumps the revision so
/// renderers can tell when cached per-frame data is stale.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    revision: u64,
}

/// All instances of one geometry drawn with one material
pub struct MeshBatch<'a> {
    pub geometry: &'a Arc<Geometry>,
    pub material: &'a Arc<MatcapMaterial>,
    pub instances: Vec<InstanceRaw>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node and returns its index
    pub fn add(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.revision += 1;
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Mesh nodes in insertion order
    pub fn meshes(&self) -> impl Iterator<Item = (&SceneNode, &Mesh)> {
        self.nodes.iter().filter_map(|node| match &node.content {
            NodeContent::Mesh(mesh) => Some((node, mesh)),
            NodeContent::Camera => None,
        })
    }

    /// Number of mesh nodes; the camera marker is not counted
    pub fn mesh_count(&self) -> usize {
        self.meshes().count()
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Groups mesh nodes by shared geometry and material.
    ///
    /// Batches appear in the order their first node was inserted.
    pub fn batches(&self) -> Vec<MeshBatch<'_>> {
        let mut batches: Vec<MeshBatch<'_>> = Vec::new();

        for (node, mesh) in self.meshes() {
            let instance = InstanceRaw::from_matrix(node.transform.matrix());
            let existing = batches.iter_mut().find(|batch| {
                Arc::ptr_eq(batch.geometry, &mesh.geometry)
                    && Arc::ptr_eq(batch.material, &mesh.material)
            });

            match existing {
                Some(batch) => batch.instances.push(instance),
                None => batches.push(MeshBatch {
                    geometry: &mesh.geometry,
                    material: &mesh.material,
                    instances: vec![instance],
                }),
            }
        }

        batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::{generate_torus, TorusParams},
        resources::texture_resource::MatcapTexture,
        scene::object::Transform,
    };
    use cgmath::Vector3;

    fn material(name: &str) -> Arc<MatcapMaterial> {
        Arc::new(MatcapMaterial::new(
            name,
            Arc::new(MatcapTexture::solid([255, 255, 255, 255])),
        ))
    }

    fn torus() -> Arc<Geometry> {
        Arc::new(Geometry::new("torus", generate_torus(&TorusParams::default())))
    }

    #[test]
    fn test_new_scene_is_empty() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.mesh_count(), 0);
        assert_eq!(scene.revision(), 0);
        assert!(scene.batches().is_empty());
    }

    #[test]
    fn test_add_bumps_revision() {
        let mut scene = Scene::new();
        assert_eq!(scene.add(SceneNode::camera("camera")), 0);
        assert_eq!(scene.add(SceneNode::mesh("a", torus(), material("m"))), 1);
        assert_eq!(scene.revision(), 2);
        assert_eq!(scene.nodes().len(), 2);
        assert_eq!(scene.mesh_count(), 1);
        assert!(scene.find("a").is_some());
        assert!(scene.find("b").is_none());
    }

    #[test]
    fn test_batches_group_shared_resources() {
        let geometry = torus();
        let shared = material("shared");
        let other = material("other");
        let mut scene = Scene::new();

        for i in 0..3 {
            let transform = Transform {
                position: Vector3::new(i as f32, 0.0, 0.0),
                ..Default::default()
            };
            scene.add(
                SceneNode::mesh(format!("torus_{i}"), geometry.clone(), shared.clone())
                    .with_transform(transform),
            );
        }
        scene.add(SceneNode::mesh("odd", geometry.clone(), other.clone()));

        let batches = scene.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].instances.len(), 3);
        assert!(Arc::ptr_eq(batches[0].material, &shared));
        assert_eq!(batches[0].instances[2].model[3][0], 2.0);
        assert_eq!(batches[1].instances.len(), 1);
        assert!(Arc::ptr_eq(batches[1].material, &other));
    }
}
