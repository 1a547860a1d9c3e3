//! Debug rendering: annotated copies of scanned images.
//!
//! Nothing here can change a scan result. Writers report failures as
//! [`DebugWriteError`], and the scanner logs and drops them.

use crate::error::DebugWriteError;
use crate::models::{Bar, BitMatrix};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Whether `IMB_DEBUG` asks for debug artifacts
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("IMB_DEBUG").is_ok())
}

/// Bar outline colour
const OUTLINE: Rgb<u8> = Rgb([0, 255, 0]);

/// Destination for debug artifacts.
///
/// `tag` marks intermediate stages (`"mask"`, `"closed"`); the final
/// annotated image has no tag.
pub trait DebugSink: Send + Sync {
    /// Persist one artifact derived from the input named `file_name`
    fn write(
        &self,
        tag: Option<&str>,
        file_name: &str,
        image: &DynamicImage,
    ) -> Result<(), DebugWriteError>;
}

/// Writes artifacts into one directory, created on first use.
///
/// Output names depend only on the input file name, so two concurrent scans
/// of equally named inputs race on the same file; give them distinct sinks.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    /// Sink writing into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Sink writing into the `out` directory next to `input`
    pub fn beside(input: &Path) -> Self {
        Self::new(sibling_out_dir(input))
    }

    /// Target directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path an artifact would be written to
    pub fn path_for(&self, tag: Option<&str>, file_name: &str) -> PathBuf {
        match tag {
            Some(tag) => self.dir.join(format!("{tag}_{file_name}")),
            None => self.dir.join(file_name),
        }
    }
}

impl DebugSink for DirSink {
    fn write(
        &self,
        tag: Option<&str>,
        file_name: &str,
        image: &DynamicImage,
    ) -> Result<(), DebugWriteError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| DebugWriteError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(tag, file_name);
        image
            .save(&path)
            .map_err(|source| DebugWriteError::Encode { path: path.clone(), source })?;
        log::debug!("debug: wrote {}", path.display());
        Ok(())
    }
}

/// `<dir of input>/out`
pub fn sibling_out_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
        .join("out")
}

/// Copy of `source` with a green outline around every bar.
/// `bars` must already be in source coordinates.
pub fn render_bars(source: &DynamicImage, bars: &[Bar]) -> RgbImage {
    let mut canvas = source.to_rgb8();
    for bar in bars {
        if bar.width <= 0 || bar.height <= 0 {
            continue;
        }
        let rect = Rect::at(bar.x, bar.y).of_size(bar.width as u32, bar.height as u32);
        draw_hollow_rect_mut(&mut canvas, rect, OUTLINE);
    }
    canvas
}

/// Mask as a black-and-white image (bars white)
pub fn render_mask(mask: &BitMatrix) -> DynamicImage {
    DynamicImage::ImageLuma8(mask.to_luma())
}
