use crate::models::{Bar, BitMatrix};
use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};

/// Mask as a luma image with a one-pixel background frame. The tracer only
/// opens an outer border after a background pixel, so shapes touching the
/// left edge would otherwise be missed.
fn framed_luma(matrix: &BitMatrix) -> GrayImage {
    let (width, height) = (matrix.width() as u32, matrix.height() as u32);
    GrayImage::from_fn(width + 2, height + 2, |x, y| {
        let inside = (1..=width).contains(&x) && (1..=height).contains(&y);
        if inside && matrix.get(x as usize - 1, y as usize - 1) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Trace the outer boundary of every top-level foreground component and
/// reduce each one to its bounding box.
///
/// Components nested inside a hole of another component are skipped. The
/// result is in tracing order: components are discovered by a raster scan,
/// so the topmost (then leftmost) starting pixel comes first. Pixels outside
/// the matrix count as background.
pub fn external_boxes(matrix: &BitMatrix) -> Vec<Bar> {
    if matrix.width() == 0 || matrix.height() == 0 {
        return Vec::new();
    }

    let luma = framed_luma(matrix);
    find_contours::<i32>(&luma)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(|c| {
            let first = c.points.first()?;
            let (mut min_x, mut min_y) = (first.x, first.y);
            let (mut max_x, mut max_y) = (first.x, first.y);
            for p in &c.points {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
            Some(Bar::new(
                min_x - 1,
                min_y - 1,
                max_x - min_x + 1,
                max_y - min_y + 1,
            ))
        })
        .collect()
}
