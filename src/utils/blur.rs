use image::GrayImage;

/// Smoothing kernel used by the normalizer
pub const DEFAULT_KERNEL_SIZE: usize = 5;

/// Largest kernel [`gaussian_blur`] applies; bigger sizes are clamped
pub const MAX_KERNEL_SIZE: usize = 13;

/// Binomial weights for an odd kernel size (`5` gives `[1, 4, 6, 4, 1]`)
fn binomial_kernel(size: usize) -> Vec<u64> {
    let mut row = vec![1u64];
    for _ in 1..size {
        let mut next = vec![1u64; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// Mirror an out-of-range index back into `[0, len)` without repeating the
/// edge sample (`-1 -> 1`, `len -> len - 2`).
fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = i;
    while i < 0 || i > last {
        if i < 0 {
            i = -i;
        }
        if i > last {
            i = 2 * last - i;
        }
    }
    i as usize
}

/// Separable Gaussian-style smoothing with a fixed odd kernel.
///
/// Weights are binomial, so the filter stays in integer arithmetic and is
/// exactly reproducible. Even sizes are rounded up to the next odd size and
/// sizes above [`MAX_KERNEL_SIZE`] are clamped to it.
pub fn gaussian_blur(gray: &GrayImage, kernel_size: usize) -> GrayImage {
    let size = (kernel_size.max(1) | 1).min(MAX_KERNEL_SIZE);
    let kernel = binomial_kernel(size);
    let shift = 2 * (size as u32 - 1);
    let radius = (size / 2) as isize;

    let (w, h) = gray.dimensions();
    let (width, height) = (w as usize, h as usize);
    if width == 0 || height == 0 {
        return gray.clone();
    }
    let src = gray.as_raw();

    // Horizontal pass, unnormalized
    let mut rows = vec![0u64; width * height];
    for y in 0..height {
        let line = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0u64;
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - radius, width);
                acc += weight * line[sx] as u64;
            }
            rows[y * width + x] = acc;
        }
    }

    // Vertical pass, then normalize with rounding
    let mut out = vec![0u8; width * height];
    let round = 1u64 << (shift.max(1) - 1);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0u64;
            for (k, &weight) in kernel.iter().enumerate() {
                let sy = reflect_101(y as isize + k as isize - radius, height);
                acc += weight * rows[sy * width + x];
            }
            let value = if shift == 0 { acc } else { (acc + round) >> shift };
            out[y * width + x] = value.min(255) as u8;
        }
    }

    GrayImage::from_raw(w, h, out).unwrap_or_else(|| gray.clone())
}
