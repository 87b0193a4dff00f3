//! Asynchronous loading of the font and matcap texture.
//!
//! Loading runs once on a background thread. The main thread polls the result
//! without blocking, so frames keep rendering while files are read and
//! decoded.

use std::{path::Path, thread};

use futures::channel::oneshot;

use crate::{
    config::AssetConfig,
    error::AssetLoadError,
    gfx::{font::Font, resources::texture_resource::MatcapTexture, scene::SceneAssets},
};

pub type AssetResult = Result<SceneAssets, AssetLoadError>;

/// The receiving end of a single asset load
pub struct PendingAssets {
    receiver: Option<oneshot::Receiver<AssetResult>>,
}

impl PendingAssets {
    /// Creates a pending load resolved through the returned sender
    pub fn channel() -> (oneshot::Sender<AssetResult>, Self) {
        let (sender, receiver) = oneshot::channel();
        (
            sender,
            Self {
                receiver: Some(receiver),
            },
        )
    }

    /// Returns the result the first time it is available, `None` otherwise.
    ///
    /// A sender dropped without sending resolves to [`AssetLoadError::Cancelled`].
    pub fn poll(&mut self) -> Option<AssetResult> {
        let receiver = self.receiver.as_mut()?;
        let result = match receiver.try_recv() {
            Ok(None) => return None,
            Ok(Some(result)) => result,
            Err(oneshot::Canceled) => Err(AssetLoadError::Cancelled),
        };
        self.receiver = None;
        Some(result)
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }
}

/// Starts loading the configured assets on an `asset-loader` thread
pub fn spawn_loader(config: AssetConfig) -> PendingAssets {
    let (sender, pending) = PendingAssets::channel();

    let spawned = thread::Builder::new()
        .name("asset-loader".to_string())
        .spawn(move || {
            let result = pollster::block_on(load_assets(&config));
            if sender.send(result).is_err() {
                log::debug!("Asset result dropped, nobody is waiting for it");
            }
        });

    // On failure the closure and its sender are dropped, so polling reports a
    // cancelled load.
    if let Err(e) = spawned {
        log::warn!("Failed to start asset loader thread: {}", e);
    }

    pending
}

pub async fn load_assets(config: &AssetConfig) -> AssetResult {
    let (font, matcap) = futures::try_join!(
        load_font(&config.font_path),
        load_matcap(&config.matcap_path)
    )?;

    log::info!(
        "Loaded font '{}' and {}x{} matcap",
        font.family_name(),
        matcap.width,
        matcap.height
    );
    Ok(SceneAssets { font, matcap })
}

pub async fn load_font(path: &Path) -> Result<Font, AssetLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| AssetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Font::from_json(&json).map_err(|source| AssetLoadError::FontParse {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn load_matcap(path: &Path) -> Result<MatcapTexture, AssetLoadError> {
    MatcapTexture::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::font::typeface::tests::TEST_FONT;
    use std::{
        path::PathBuf,
        time::{Duration, Instant},
    };

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bees-knees-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn png() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbaImage::from_pixel(4, 4, image::Rgba([128, 128, 255, 255]))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn wait_for(pending: &mut PendingAssets) -> AssetResult {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = pending.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "asset loader did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_poll_resolves_once() {
        let (sender, mut pending) = PendingAssets::channel();
        assert!(pending.poll().is_none());
        assert!(pending.is_pending());

        sender.send(Err(AssetLoadError::Cancelled)).unwrap();
        assert!(matches!(pending.poll(), Some(Err(AssetLoadError::Cancelled))));
        assert!(!pending.is_pending());
        assert!(pending.poll().is_none());
    }

    #[test]
    fn test_dropped_sender_is_cancelled() {
        let (sender, mut pending) = PendingAssets::channel();
        drop(sender);
        assert!(matches!(pending.poll(), Some(Err(AssetLoadError::Cancelled))));
    }

    #[test]
    fn test_missing_font_is_io_error() {
        let result = pollster::block_on(load_font(Path::new("missing/font.typeface.json")));
        assert!(matches!(result, Err(AssetLoadError::Io { .. })));
    }

    #[test]
    fn test_malformed_font_is_parse_error() {
        let path = temp_file("broken.typeface.json", b"{ \"glyphs\": 3 }");
        let result = pollster::block_on(load_font(&path));
        assert!(matches!(result, Err(AssetLoadError::FontParse { .. })));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_loader_thread_delivers_assets() {
        let font_path = temp_file("font.typeface.json", TEST_FONT.as_bytes());
        let matcap_path = temp_file("matcap.png", &png());
        let config = AssetConfig::default()
            .with_font_path(&font_path)
            .with_matcap_path(&matcap_path);

        let mut pending = spawn_loader(config);
        let assets = wait_for(&mut pending).unwrap();
        assert_eq!(assets.font.family_name(), "Test Sans");
        assert_eq!((assets.matcap.width, assets.matcap.height), (4, 4));

        std::fs::remove_file(font_path).ok();
        std::fs::remove_file(matcap_path).ok();
    }

    #[test]
    fn test_loader_thread_reports_missing_files() {
        let config = AssetConfig::default()
            .with_font_path("missing/font.json")
            .with_matcap_path("missing/matcap.png");

        let mut pending = spawn_loader(config);
        assert!(wait_for(&mut pending).is_err());
    }
}
