//! GPU resource management
//!
//! Handles GPU buffers, textures, materials and bind groups.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO};
pub use material::{MatcapMaterial, MaterialBindings};
pub use texture_resource::{MatcapTexture, TextureResource};
