use crate::config::ScanConfig;
use crate::debug::{DebugSink, render_bars, render_mask};
use crate::decoder::classify::classify;
use crate::detector::region::RegionLocator;
use crate::error::ScanError;
use crate::models::{BarcodeString, BitMatrix, Region};
use crate::utils::binarization::otsu_binarize_inv;
use crate::utils::blur::gaussian_blur;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Open `path` as an image. Failures are [`ScanError::Load`].
pub fn load_image(path: &Path) -> Result<DynamicImage, ScanError> {
    let image = image::open(path).map_err(|source| ScanError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ScanError::EmptyImage {
            path: path.to_path_buf(),
        });
    }
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Smooth and binarize a grayscale image so bars become foreground.
/// Returns the mask and the Otsu threshold used.
pub fn normalize(gray: &GrayImage, config: &ScanConfig) -> (BitMatrix, u8) {
    let blurred = gaussian_blur(gray, config.blur_kernel);
    let (mask, threshold) = otsu_binarize_inv(&blurred);
    log::debug!(
        "normalize: threshold {}, {} foreground pixels",
        threshold,
        mask.count_set()
    );
    (mask, threshold)
}

/// Everything one scan found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Decoded bar types, or the not-found sentinel
    pub barcode: BarcodeString,
    /// Binarization threshold
    pub threshold: u8,
    /// Accepted region, if any
    pub region: Option<Region>,
}

/// IMb scanner: normalize, locate, extract, classify.
///
/// Each call is independent and synchronous; one `Scanner` can be shared
/// across threads.
pub struct Scanner {
    config: ScanConfig,
    sink: Option<Box<dyn DebugSink>>,
}

impl Scanner {
    /// Scanner with the given configuration and no debug output
    pub fn new(config: ScanConfig) -> Self {
        Self { config, sink: None }
    }

    /// Attach a debug sink for annotated images and intermediate masks
    pub fn with_debug_sink(mut self, sink: impl DebugSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan the image at `path`.
    ///
    /// Only load failures are errors; a missing barcode is
    /// [`BarcodeString::NotFound`].
    pub fn scan_path(&self, path: &Path) -> Result<BarcodeString, ScanError> {
        Ok(self.scan_path_report(path)?.barcode)
    }

    /// Like [`Scanner::scan_path`], keeping intermediate results
    pub fn scan_path_report(&self, path: &Path) -> Result<ScanReport, ScanError> {
        let image = load_image(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scan.png".to_string());
        Ok(self.scan_image_report(&image, &name))
    }

    /// Scan an already decoded image. `name` is only used for debug output.
    pub fn scan_image(&self, image: &DynamicImage, name: &str) -> BarcodeString {
        self.scan_image_report(image, name).barcode
    }

    /// Like [`Scanner::scan_image`], keeping intermediate results
    pub fn scan_image_report(&self, image: &DynamicImage, name: &str) -> ScanReport {
        let gray = image.to_luma8();
        let (mask, threshold) = normalize(&gray, &self.config);

        let locator = RegionLocator::new(&self.config);
        let closed = locator.close(&mask);
        self.emit(Some("mask"), name, || render_mask(&mask));
        self.emit(Some("closed"), name, || render_mask(&closed));

        let region = locator.locate_in(&mask, &closed);
        let barcode = match &region {
            Some(region) => {
                log::debug!(
                    "scan {}: region {}x{} at ({}, {})",
                    name,
                    region.width,
                    region.height,
                    region.x,
                    region.y
                );
                let source_bars = region.bars_in_source();
                self.emit(None, name, || {
                    DynamicImage::ImageRgb8(render_bars(image, &source_bars))
                });
                classify(&region.bars, &self.config)
            }
            None => {
                log::info!("scan {}: no barcode region found", name);
                BarcodeString::NotFound
            }
        };

        ScanReport {
            barcode,
            threshold,
            region,
        }
    }

    fn emit<F>(&self, tag: Option<&str>, name: &str, render: F)
    where
        F: FnOnce() -> DynamicImage,
    {
        let Some(sink) = &self.sink else {
            return;
        };
        if let Err(err) = sink.write(tag, name, &render()) {
            log::warn!("debug output for {} skipped: {}", name, err);
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NUM_BARS;
    use image::Luma;

    fn white(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([255]))
    }

    fn draw(img: &mut GrayImage, x: u32, y: u32, w: u32, h: u32) {
        for yy in y..y + h {
            for xx in x..x + w {
                img.put_pixel(xx, yy, Luma([0]));
            }
        }
    }

    /// All-tracker barcode: 65 identical 4x16 bars
    fn tracker_strip() -> GrayImage {
        let mut img = white(600, 120);
        for i in 0..NUM_BARS as u32 {
            draw(&mut img, 30 + i * 8, 50, 4, 16);
        }
        img
    }

    #[test]
    fn test_normalize_marks_dark_strokes() {
        let mut img = white(40, 40);
        draw(&mut img, 10, 10, 6, 20);
        let (mask, threshold) = normalize(&img, &ScanConfig::default());
        assert!(threshold > 0);
        assert!(mask.get(12, 20));
        assert!(!mask.get(2, 2));
    }

    #[test]
    fn test_scan_tracker_strip() {
        let img = DynamicImage::ImageLuma8(tracker_strip());
        let report = Scanner::default().scan_image_report(&img, "strip.png");
        assert_eq!(report.barcode.to_string(), "T".repeat(NUM_BARS));
        let region = report.region.unwrap();
        assert_eq!((region.x, region.y), (25, 45));
    }

    #[test]
    fn test_blank_image_is_not_found() {
        let img = DynamicImage::ImageLuma8(white(200, 100));
        let barcode = Scanner::default().scan_image(&img, "blank.png");
        assert_eq!(barcode, BarcodeString::NotFound);
        assert_eq!(barcode.to_string().len(), NUM_BARS);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = Scanner::default()
            .scan_path(Path::new("definitely/not/here.png"))
            .unwrap_err();
        assert!(matches!(err, ScanError::Load { .. }));
    }

    #[test]
    fn test_oversized_blur_kernel_still_scans() {
        let config = ScanConfig {
            blur_kernel: 15,
            ..ScanConfig::default()
        };
        let img = DynamicImage::ImageLuma8(tracker_strip());
        let barcode = Scanner::new(config).scan_image(&img, "strip.png");
        assert_eq!(barcode.to_string().chars().count(), NUM_BARS);
    }
}
