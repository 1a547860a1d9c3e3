//! Binary morphology with rectangular structuring elements.
//!
//! The element is `width x height` with its anchor at `(width / 2, height / 2)`.
//! Pixels outside the matrix never contribute foreground to a dilation and
//! never remove foreground in an erosion. Closing erodes with the reflected
//! element so that it always contains the input, even for even sizes.

use crate::models::BitMatrix;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Op {
    Dilate,
    Erode,
}

/// One sliding-window pass over a single line.
///
/// `out[i]` looks at `line[i - anchor ..= i - anchor + size - 1]`.
fn slide(line: &[bool], out: &mut [bool], size: usize, anchor: usize, op: Op) {
    let len = line.len() as isize;
    let lo_off = -(anchor as isize);
    let hi_off = size as isize - 1 - anchor as isize;

    // Foreground count inside the window, with out-of-range samples counted
    // as foreground for erosion.
    let sample = |i: isize| -> usize {
        if i < 0 || i >= len {
            (op == Op::Erode) as usize
        } else {
            line[i as usize] as usize
        }
    };

    let mut count: usize = (lo_off..=hi_off).map(sample).sum();
    for i in 0..line.len() {
        out[i] = match op {
            Op::Dilate => count > 0,
            Op::Erode => count == size,
        };
        let i = i as isize;
        count -= sample(i + lo_off);
        count += sample(i + hi_off + 1);
    }
}

fn apply(matrix: &BitMatrix, width: usize, height: usize, reflect: bool, op: Op) -> BitMatrix {
    let (w, h) = (matrix.width(), matrix.height());
    let width = width.max(1);
    let height = height.max(1);
    let (anchor_x, anchor_y) = if reflect {
        (width - 1 - width / 2, height - 1 - height / 2)
    } else {
        (width / 2, height / 2)
    };

    let mut horizontal = vec![false; w * h];
    let mut line = vec![false; w];
    for y in 0..h {
        for (x, px) in line.iter_mut().enumerate() {
            *px = matrix.get(x, y);
        }
        slide(&line, &mut horizontal[y * w..(y + 1) * w], width, anchor_x, op);
    }

    let mut out = BitMatrix::new(w, h);
    let mut column = vec![false; h];
    let mut result = vec![false; h];
    for x in 0..w {
        for (y, px) in column.iter_mut().enumerate() {
            *px = horizontal[y * w + x];
        }
        slide(&column, &mut result, height, anchor_y, op);
        for (y, &v) in result.iter().enumerate() {
            if v {
                out.set(x, y, true);
            }
        }
    }
    out
}

/// Grow foreground by a `width x height` rectangle
pub fn dilate_rect(matrix: &BitMatrix, width: usize, height: usize) -> BitMatrix {
    apply(matrix, width, height, false, Op::Dilate)
}

/// Shrink foreground by a `width x height` rectangle
pub fn erode_rect(matrix: &BitMatrix, width: usize, height: usize) -> BitMatrix {
    apply(matrix, width, height, false, Op::Erode)
}

/// Morphological closing (dilate, then erode with the same element)
pub fn close_rect(matrix: &BitMatrix, width: usize, height: usize) -> BitMatrix {
    let dilated = dilate_rect(matrix, width, height);
    apply(&dilated, width, height, true, Op::Erode)
}
