//! Populates a scene with the extruded text and the randomized torus field.

use std::{f32::consts::PI, sync::Arc};

use cgmath::EuclideanSpace;
use rand::Rng;

use crate::{
    config::SceneConfig,
    error::GeometryError,
    gfx::{
        camera::PerspectiveCamera,
        font::Font,
        geometry::{generate_text, generate_torus},
        resources::{material::MatcapMaterial, texture_resource::MatcapTexture},
    },
};

use super::{
    object::{Geometry, SceneNode, Transform},
    scene::Scene,
};

pub const CAMERA_NODE_NAME: &str = "camera";
pub const TEXT_NODE_NAME: &str = "text";
pub const MATCAP_MATERIAL_NAME: &str = "matcap";

/// Everything population needs from disk
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub font: Font,
    pub matcap: MatcapTexture,
}

/// Adds the text node, then `config.torus_count` tori sharing its material.
///
/// Nothing is inserted if the text cannot be built.
pub fn populate<R: Rng + ?Sized>(
    scene: &mut Scene,
    assets: SceneAssets,
    config: &SceneConfig,
    rng: &mut R,
) -> Result<(), GeometryError> {
    let material = add_text(scene, &assets.font, Arc::new(assets.matcap), config)?;
    scatter_tori(scene, material, config, rng);

    log::info!(
        "Scene populated with {} meshes (revision {})",
        scene.mesh_count(),
        scene.revision()
    );
    Ok(())
}

/// Inserts the camera marker node.
///
/// The marker records the camera's starting position only. Orbit controls move
/// the [`PerspectiveCamera`] itself and never touch this node.
pub fn add_camera(scene: &mut Scene, camera: &PerspectiveCamera) -> usize {
    let transform = Transform {
        position: camera.position.to_vec(),
        ..Default::default()
    };
    scene.add(SceneNode::camera(CAMERA_NODE_NAME).with_transform(transform))
}

/// Builds the centered text mesh and returns the material created for it.
pub fn add_text(
    scene: &mut Scene,
    font: &Font,
    matcap: Arc<MatcapTexture>,
    config: &SceneConfig,
) -> Result<Arc<MatcapMaterial>, GeometryError> {
    let mut data = generate_text(font, &config.text, &config.text_params)?;
    data.center();

    let geometry = Arc::new(Geometry::new(TEXT_NODE_NAME, data));
    let material = Arc::new(MatcapMaterial::new(MATCAP_MATERIAL_NAME, matcap));
    scene.add(SceneNode::mesh(TEXT_NODE_NAME, geometry, material.clone()));

    Ok(material)
}

/// Scatters tori that share one geometry and `material`.
pub fn scatter_tori<R: Rng + ?Sized>(
    scene: &mut Scene,
    material: Arc<MatcapMaterial>,
    config: &SceneConfig,
    rng: &mut R,
) {
    let geometry = Arc::new(Geometry::new("torus", generate_torus(&config.torus)));

    for i in 0..config.torus_count {
        let transform = random_transform(rng, config.scatter_extent);
        scene.add(
            SceneNode::mesh(format!("torus_{i}"), geometry.clone(), material.clone())
                .with_transform(transform),
        );
    }
}

fn random_transform<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Transform {
    let mut transform = Transform::default();

    transform.position.x = (rng.random::<f32>() - 0.5) * extent;
    transform.position.y = (rng.random::<f32>() - 0.5) * extent;
    transform.position.z = (rng.random::<f32>() - 0.5) * extent;

    transform.rotation.x = rng.random::<f32>() * PI;
    transform.rotation.y = rng.random::<f32>() * PI;

    transform.set_uniform_scale(rng.random::<f32>());
    transform
}
