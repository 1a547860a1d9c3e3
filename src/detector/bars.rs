use super::contour::external_boxes;
use crate::models::{Bar, BitMatrix};

/// Find every bar in a region crop, ordered left to right.
///
/// Each top-level foreground component becomes one [`Bar`]. Touching or
/// duplicate strokes are reported as found; deciding whether the count is
/// plausible is up to the caller. Bars sharing the same `x` keep tracing order.
pub fn extract_bars(mask: &BitMatrix) -> Vec<Bar> {
    let mut bars = external_boxes(mask);
    bars.sort_by_key(|b| b.x);
    bars
}
