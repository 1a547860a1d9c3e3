use super::transitions::{Exceedance, transition};
use crate::config::ScanConfig;
use crate::models::{Bar, BarType, BarcodeString};

/// Index of the shortest bar; ties go to the leftmost
pub fn seed_index(bars: &[Bar]) -> Option<usize> {
    bars.iter()
        .enumerate()
        .min_by_key(|(i, b)| (b.height, *i))
        .map(|(i, _)| i)
}

/// Largest edge movement still treated as "same edge", given the previous
/// bar. The previous height is first reduced to one tracker-height by its
/// type, then divided by `ratio`.
pub fn height_threshold(prev_height: i32, prev_type: BarType, ratio: f32) -> f32 {
    prev_height as f32 / prev_type.height_units() / ratio
}

#[derive(Clone, Copy)]
struct Previous {
    top: i32,
    bottom: i32,
    height: i32,
    ty: BarType,
}

impl Previous {
    fn of(bar: &Bar, ty: BarType) -> Self {
        Self {
            top: bar.top(),
            bottom: bar.bottom(),
            height: bar.height,
            ty,
        }
    }

    fn next_type(&self, bar: &Bar, ratio: f32) -> BarType {
        let top_offset = (bar.top() - self.top).abs() as f32;
        let bottom_offset = (bar.bottom() - self.bottom).abs() as f32;
        let threshold = height_threshold(self.height, self.ty, ratio);

        match Exceedance::from_flags(top_offset > threshold, bottom_offset > threshold) {
            None => self.ty,
            Some(exceedance) => transition(self.ty, exceedance),
        }
    }
}

fn walk<I>(bars: &[Bar], types: &mut [Option<BarType>], seed: usize, order: I, ratio: f32)
where
    I: Iterator<Item = usize>,
{
    let mut prev = Previous::of(&bars[seed], BarType::Tracker);
    for i in order {
        debug_assert!(types[i].is_none(), "bar {i} classified twice");
        let ty = prev.next_type(&bars[i], ratio);
        types[i] = Some(ty);
        prev = Previous::of(&bars[i], ty);
    }
}

/// Classify every bar relative to its neighbour, starting from the shortest
/// bar (a tracker) and walking outwards in both directions.
///
/// Works for any number of bars; an empty slice gives an empty result.
pub fn classify_bars(bars: &[Bar], height_ratio: f32) -> Vec<BarType> {
    let Some(seed) = seed_index(bars) else {
        return Vec::new();
    };
    log::trace!("classify: seed bar {} (height {})", seed, bars[seed].height);

    let mut types: Vec<Option<BarType>> = vec![None; bars.len()];
    types[seed] = Some(BarType::Tracker);

    walk(bars, &mut types, seed, (0..seed).rev(), height_ratio);
    walk(bars, &mut types, seed, seed + 1..bars.len(), height_ratio);

    types
        .into_iter()
        .map(|t| t.unwrap_or(BarType::Tracker))
        .collect()
}

/// Classify an accepted region's bars into a barcode string.
///
/// Anything other than exactly [`NUM_BARS`](crate::models::NUM_BARS) bars
/// yields [`BarcodeString::NotFound`].
pub fn classify(bars: &[Bar], config: &ScanConfig) -> BarcodeString {
    if bars.len() != crate::models::NUM_BARS {
        return BarcodeString::NotFound;
    }
    BarcodeString::from_types(&classify_bars(bars, config.height_ratio))
}
