use crate::models::BitMatrix;
use image::GrayImage;

/// Binarize with Otsu's threshold, inverted so dark strokes become foreground.
/// Returns the mask and the chosen threshold.
pub fn otsu_binarize_inv(gray: &GrayImage) -> (BitMatrix, u8) {
    let threshold = calculate_otsu_threshold(gray.as_raw());
    (threshold_binarize_inv(gray, threshold), threshold)
}

/// Pixels strictly darker than `threshold` become foreground
pub fn threshold_binarize_inv(gray: &GrayImage, threshold: u8) -> BitMatrix {
    let (width, height) = gray.dimensions();
    let mut binary = BitMatrix::new(width as usize, height as usize);

    for (x, y, pixel) in gray.enumerate_pixels() {
        if pixel.0[0] < threshold {
            binary.set(x as usize, y as usize, true);
        }
    }

    binary
}

/// Calculate Otsu's optimal threshold.
///
/// The returned value `t` splits the histogram into `[0, t)` and `[t, 255]`
/// with maximal between-class variance. Single-intensity images have no
/// split and give 0, so nothing is foreground.
pub fn calculate_otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total_pixels = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut max_variance = 0.0;
    let mut optimal_threshold = 0u8;

    // class1 = intensities below the candidate threshold
    let mut class1_pixels = 0.0f64;
    let mut class1_sum = 0.0f64;

    for threshold in 1..=255usize {
        let count = histogram[threshold - 1] as f64;
        class1_pixels += count;
        class1_sum += (threshold - 1) as f64 * count;

        let class2_pixels = total_pixels - class1_pixels;
        if class1_pixels == 0.0 || class2_pixels == 0.0 {
            continue;
        }

        let class1_mean = class1_sum / class1_pixels;
        let class2_mean = (total_sum - class1_sum) / class2_pixels;

        let weight1 = class1_pixels / total_pixels;
        let weight2 = class2_pixels / total_pixels;

        let variance = weight1 * weight2 * (class1_mean - class2_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold as u8;
        }
    }

    optimal_threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_threshold_binarize_inv() {
        let gray = GrayImage::from_raw(2, 2, vec![100, 150, 200, 50]).unwrap();
        let binary = threshold_binarize_inv(&gray, 128);

        // Pixels < 128 are strokes
        assert!(binary.get(0, 0)); // 100 < 128
        assert!(!binary.get(1, 0)); // 150 >= 128
        assert!(!binary.get(0, 1)); // 200 >= 128
        assert!(binary.get(1, 1)); // 50 < 128
    }

    #[test]
    fn test_otsu_separates_two_classes() {
        let gray = GrayImage::from_fn(10, 10, |_, y| if y < 5 { Luma([50]) } else { Luma([200]) });

        let (binary, threshold) = otsu_binarize_inv(&gray);

        assert!(threshold > 50 && threshold <= 200);
        assert!(binary.get(0, 0)); // Dark
        assert!(!binary.get(0, 7)); // Light
        assert_eq!(binary.count_set(), 50);
    }

    #[test]
    fn test_otsu_uniform_image_has_no_foreground() {
        assert_eq!(calculate_otsu_threshold(&[255u8; 64]), 0);
        assert_eq!(calculate_otsu_threshold(&[]), 0);

        // Uniformly dark is background too
        let gray = GrayImage::from_pixel(8, 8, Luma([50]));
        let (binary, threshold) = otsu_binarize_inv(&gray);
        assert_eq!(threshold, 0);
        assert_eq!(binary.count_set(), 0);
    }

    #[test]
    fn test_otsu_prefers_valley_between_modes() {
        let mut gray = vec![20u8; 300];
        gray.extend(vec![30u8; 100]);
        gray.extend(vec![220u8; 500]);
        gray.extend(vec![240u8; 100]);
        let t = calculate_otsu_threshold(&gray);
        assert!(t > 30 && t <= 220, "threshold {t}");
    }
}
