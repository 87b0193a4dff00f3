//! WGPU-based rendering engine
//!
//! Owns the surface, device and queue, the matcap pipeline and the per-frame
//! camera uniforms. Scene meshes are drawn instanced, one draw call per
//! shared geometry and material pair.

use std::sync::Arc;
use wgpu::{util::DeviceExt, TextureFormat};

use crate::{
    error::{RenderError, SurfaceInitError},
    gfx::{
        camera::camera_utils::CameraUniform,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            material::MaterialBindings,
            texture_resource::TextureResource,
        },
        scene::{scene::Scene, vertex::InstanceRaw},
    },
    viewport::{clamp_pixel_ratio, drawing_buffer_size},
};

use super::{
    pipeline_manager::{PipelineConfig, PipelineManager},
    traits::ResizeTarget,
};

const MATCAP_SHADER: &str = "matcap.wgsl";
const MATCAP_PIPELINE: &str = "Matcap";

struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    revision: u64,
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    material_bindings: MaterialBindings,
    instances: Option<InstanceBuffer>,

    /// Logical size last passed to `set_size`
    logical_size: (f64, f64),
    pixel_ratio: f64,
}

impl RenderEngine {
    /// Creates a render engine drawing into `window`.
    ///
    /// `width` and `height` are the window's logical inner size; the surface
    /// is configured at that size times `pixel_ratio`.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: f64,
        height: f64,
        pixel_ratio: f64,
    ) -> Result<RenderEngine, SurfaceInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let info = adapter.get_info();
        log::info!("Using adapter '{}' ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_capabilities = surface.get_capabilities(&adapter);
        // Matcap textures are sRGB, so the output must be too
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(SurfaceInitError::NoSurfaceFormat)?;

        let pixel_ratio = clamp_pixel_ratio(pixel_ratio);
        let (buffer_width, buffer_height) = drawing_buffer_size(width, height, pixel_ratio);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: buffer_width,
            height: buffer_height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = TextureResource::create_depth_texture(
            &device,
            buffer_width,
            buffer_height,
            "depth_texture",
        );

        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        let material_bindings = MaterialBindings::new(&device);

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader(MATCAP_SHADER, include_str!("shaders/matcap.wgsl"));
        pipeline_manager.register_pipeline(
            MATCAP_PIPELINE,
            PipelineConfig::default_with_shader(MATCAP_SHADER)
                .with_label("Matcap Pipeline")
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    material_bindings.bind_group_layout().clone(),
                ])
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_color_format(format),
        );

        log::info!(
            "Surface configured at {}x{} ({:?})",
            buffer_width,
            buffer_height,
            format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            material_bindings,
            instances: None,
            logical_size: (width, height),
            pixel_ratio,
        })
    }

    /// Uploads the camera uniforms for the next frame
    pub fn update(&mut self, camera_uniform: CameraUniform) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform);
    }

    /// Renders the scene followed by an optional overlay pass.
    ///
    /// The overlay callback records into the same encoder and draws on top of
    /// the scene's color target.
    pub fn render_frame<F>(&mut self, scene: &Scene, overlay: Option<F>) -> Result<(), RenderError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let batches = scene.batches();
        let instances: Vec<InstanceRaw> = batches
            .iter()
            .flat_map(|batch| batch.instances.iter().copied())
            .collect();
        self.upload_instances(&instances, scene.revision());

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let (Some(instance_buffer), Some(globals)) =
                (self.instances.as_ref(), self.global_bindings.bind_group())
            {
                if let Some(pipeline) = self.pipeline_manager.get_pipeline(MATCAP_PIPELINE) {
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(0, globals, &[]);
                    render_pass.set_vertex_buffer(1, instance_buffer.buffer.slice(..));

                    let mut first_instance = 0u32;
                    for batch in &batches {
                        let geometry = batch.geometry.buffers(&self.device);
                        let material = batch.material.bind_group(
                            &self.device,
                            &self.queue,
                            &self.material_bindings,
                        );
                        let count = batch.instances.len() as u32;

                        render_pass.set_bind_group(1, material, &[]);
                        render_pass.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
                        render_pass
                            .set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(
                            0..geometry.index_count,
                            0,
                            first_instance..first_instance + count,
                        );
                        first_instance += count;
                    }
                }
            }
        }

        if let Some(overlay) = overlay {
            overlay(&self.device, &self.queue, &mut encoder, &surface_texture_view);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Writes instance data when the scene has changed since the last upload
    fn upload_instances(&mut self, instances: &[InstanceRaw], revision: u64) {
        if instances.is_empty() {
            return;
        }

        if let Some(existing) = self.instances.as_mut() {
            if existing.revision == revision {
                return;
            }
            if existing.capacity >= instances.len() {
                self.queue
                    .write_buffer(&existing.buffer, 0, bytemuck::cast_slice(instances));
                existing.revision = revision;
                return;
            }
        }

        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Instance Buffer"),
                contents: bytemuck::cast_slice(instances),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        log::debug!("Instance buffer holds {} instances", instances.len());
        self.instances = Some(InstanceBuffer {
            buffer,
            capacity: instances.len(),
            revision,
        });
    }

    /// Reconfigures the surface and depth buffer to the current drawing
    /// buffer size, skipping zero-sized and unchanged sizes.
    fn apply_drawing_buffer_size(&mut self) {
        let (width, height) = self.logical_size;
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let (buffer_width, buffer_height) = drawing_buffer_size(width, height, self.pixel_ratio);
        if (buffer_width, buffer_height) == (self.config.width, self.config.height) {
            return;
        }

        self.config.width = buffer_width;
        self.config.height = buffer_height;
        self.reconfigure();
    }

    /// Reconfigures the surface with the current configuration.
    ///
    /// Also used to recover from lost or outdated surfaces.
    pub fn reconfigure(&mut self) {
        log::debug!(
            "Configuring surface at {}x{}",
            self.config.width,
            self.config.height
        );
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = TextureResource::create_depth_texture(
            &self.device,
            self.config.width,
            self.config.height,
            "depth_texture",
        );
    }

    /// Current drawing buffer size in device pixels
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

impl ResizeTarget for RenderEngine {
    fn set_size(&mut self, width: f64, height: f64) {
        self.logical_size = (width, height);
        self.apply_drawing_buffer_size();
    }

    fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = clamp_pixel_ratio(pixel_ratio);
        self.apply_drawing_buffer_size();
    }
}
