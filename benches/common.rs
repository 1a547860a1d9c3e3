use image::{GrayImage, Luma};

pub const BARCODE: &str = "TFTDAADTADTTFAFDTDDAFFDFAFFFATDDTAAATDTFTTAAAFATTFAFDDFTATDAFDADF";

/// Synthetic barcode on a `width x height` page
pub fn synthetic_page(width: u32, height: u32) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([255]));
    let y0 = height / 2;
    for (i, c) in BARCODE.chars().enumerate() {
        let x = 30 + i as u32 * 8;
        let top = if matches!(c, 'A' | 'F') { y0 - 16 } else { y0 };
        let bottom = if matches!(c, 'D' | 'F') { y0 + 32 } else { y0 + 16 };
        for y in top..bottom {
            for dx in 0..4 {
                img.put_pixel(x + dx, y, Luma([0]));
            }
        }
    }
    img
}
