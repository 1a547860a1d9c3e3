use super::{Bar, NUM_BARS};

/// Candidate sub-rectangle of the source image, with the bars found inside it.
///
/// Bar coordinates are relative to the crop; add [`Region::x`] / [`Region::y`]
/// to map them back onto the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Crop offset (left)
    pub x: usize,
    /// Crop offset (top)
    pub y: usize,
    /// Crop width
    pub width: usize,
    /// Crop height
    pub height: usize,
    /// Bars inside the crop, ordered left to right
    pub bars: Vec<Bar>,
}

impl Region {
    /// Whether this region holds exactly one barcode's worth of bars
    pub fn is_barcode(&self) -> bool {
        self.bars.len() == NUM_BARS
    }

    /// Bars translated into source-image coordinates
    pub fn bars_in_source(&self) -> Vec<Bar> {
        self.bars
            .iter()
            .map(|b| b.translate(self.x as i32, self.y as i32))
            .collect()
    }
}
