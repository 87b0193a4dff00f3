//! Matcap material
//!
//! A matcap material shades purely by sampling its texture with the view
//! space normal. One material is shared by every node that references it, so
//! its texture is uploaded and its bind group created exactly once.

use std::sync::{Arc, OnceLock};

use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
    binding_types,
};

use super::texture_resource::{MatcapTexture, TextureResource};

/// Bind group layout shared by all matcap materials
///
/// Bound to slot 1 in the matcap pipeline: texture at binding 0, sampler at
/// binding 1.
pub struct MaterialBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl MaterialBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Filtering))
            .create(device, "Matcap Material Bind Group Layout");

        MaterialBindings { bind_group_layout }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}

struct MaterialGpu {
    // Keeps the texture alive for as long as the bind group uses it
    _texture: TextureResource,
    bind_group: wgpu::BindGroup,
}

pub struct MatcapMaterial {
    pub name: String,
    matcap: Arc<MatcapTexture>,
    gpu: OnceLock<MaterialGpu>,
}

impl MatcapMaterial {
    pub fn new(name: impl Into<String>, matcap: Arc<MatcapTexture>) -> Self {
        Self {
            name: name.into(),
            matcap,
            gpu: OnceLock::new(),
        }
    }

    pub fn matcap(&self) -> &Arc<MatcapTexture> {
        &self.matcap
    }

    pub fn is_uploaded(&self) -> bool {
        self.gpu.get().is_some()
    }

    /// Returns the material's bind group, uploading the texture on first use
    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bindings: &MaterialBindings,
    ) -> &wgpu::BindGroup {
        let gpu = self.gpu.get_or_init(|| {
            log::debug!(
                "Uploading matcap '{}' ({}x{})",
                self.name,
                self.matcap.width,
                self.matcap.height
            );
            let texture = TextureResource::from_matcap(device, queue, &self.matcap, &self.name);
            let bind_group = BindGroupBuilder::new(&bindings.bind_group_layout)
                .texture(&texture.view)
                .sampler(&texture.sampler)
                .create(device, &format!("{} Bind Group", self.name));

            MaterialGpu {
                _texture: texture,
                bind_group,
            }
        });
        &gpu.bind_group
    }
}

impl std::fmt::Debug for MatcapMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcapMaterial")
            .field("name", &self.name)
            .field("width", &self.matcap.width)
            .field("height", &self.matcap.height)
            .field("uploaded", &self.is_uploaded())
            .finish()
    }
}
