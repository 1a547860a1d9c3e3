use super::bars::extract_bars;
use super::contour::external_boxes;
use crate::config::ScanConfig;
use crate::models::{Bar, BitMatrix, Region};
use crate::utils::morphology::close_rect;

/// Finds the part of a binary mask that holds the barcode.
///
/// Bars of one barcode are fused into a single blob by a wide, short closing;
/// blobs that are much wider than tall become candidates, and the first
/// candidate whose crop of the *unclosed* mask yields exactly
/// [`NUM_BARS`](crate::models::NUM_BARS) bars wins.
#[derive(Debug, Clone, Copy)]
pub struct RegionLocator {
    config: ScanConfig,
}

impl RegionLocator {
    /// Create a locator using the closing, aspect and padding settings of `config`
    pub fn new(config: &ScanConfig) -> Self {
        Self { config: *config }
    }

    /// Fuse neighbouring strokes
    pub fn close(&self, mask: &BitMatrix) -> BitMatrix {
        close_rect(mask, self.config.closing_width, self.config.closing_height)
    }

    /// Bounding boxes of closed blobs that pass the aspect test, in tracing order
    pub fn candidates(&self, closed: &BitMatrix) -> Vec<Bar> {
        let ratio = self.config.min_aspect_ratio;
        let boxes = external_boxes(closed);
        log::debug!("region: {} blobs after closing", boxes.len());
        boxes
            .into_iter()
            .filter(|b| b.width as f32 >= ratio * b.height as f32)
            .collect()
    }

    /// Pad `bounds`, crop `mask` to it and extract the bars inside
    pub fn test_candidate(&self, mask: &BitMatrix, bounds: &Bar) -> Region {
        let pad = self.config.region_padding as i32;
        let x0 = (bounds.x - pad).max(0) as usize;
        let y0 = (bounds.y - pad).max(0) as usize;
        let x1 = ((bounds.x + bounds.width + pad).max(0) as usize).min(mask.width());
        let y1 = ((bounds.y + bounds.height + pad).max(0) as usize).min(mask.height());
        let width = x1.saturating_sub(x0);
        let height = y1.saturating_sub(y0);

        let crop = mask.crop(x0, y0, width, height);
        Region {
            x: x0,
            y: y0,
            width,
            height,
            bars: extract_bars(&crop),
        }
    }

    /// Search `mask` using an already closed copy of it
    pub fn locate_in(&self, mask: &BitMatrix, closed: &BitMatrix) -> Option<Region> {
        let candidates = self.candidates(closed);
        let regions = candidates.iter().map(|bounds| {
            let region = self.test_candidate(mask, bounds);
            log::debug!(
                "region: candidate {}x{} at ({}, {}) holds {} bars",
                bounds.width,
                bounds.height,
                bounds.x,
                bounds.y,
                region.bars.len()
            );
            region
        });
        select_region(regions)
    }

    /// Close `mask` and search it
    pub fn locate(&self, mask: &BitMatrix) -> Option<Region> {
        let closed = self.close(mask);
        self.locate_in(mask, &closed)
    }
}

/// First region holding exactly one barcode's worth of bars. Stops consuming
/// `regions` as soon as one qualifies.
pub fn select_region<I>(regions: I) -> Option<Region>
where
    I: IntoIterator<Item = Region>,
{
    regions.into_iter().find(Region::is_barcode)
}
