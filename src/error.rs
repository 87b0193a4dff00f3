//! Error types
//!
//! Asset and geometry failures are recoverable: they are logged and the scene
//! simply stays empty. Surface initialisation failures are fatal and end the
//! event loop.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading the font or the matcap texture.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("failed to read asset {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse typeface font {path}")]
    FontParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode image {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("asset loader stopped before delivering a result")]
    Cancelled,
}

/// Failure while turning font outlines into a mesh.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("text produced no glyph outlines")]
    EmptyText,

    #[error("failed to triangulate glyph outline: {0}")]
    Triangulation(String),
}

/// Failure while creating the window, surface or GPU device.
#[derive(Debug, Error)]
pub enum SurfaceInitError {
    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create rendering surface")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create graphics device")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Failure while drawing a frame.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to acquire surface texture")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Failure that ends the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop failed")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    SurfaceInit(#[from] SurfaceInitError),
}
