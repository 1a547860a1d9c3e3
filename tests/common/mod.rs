//! Synthetic IMb images for integration tests.
#![allow(dead_code)]

use image::{GrayImage, Luma};
use std::fs;
use std::path::{Path, PathBuf};

pub const BARCODE_1: &str = "TFTDAADTADTTFAFDTDDAFFDFAFFFATDDTAAATDTFTTAAAFATTFAFDDFTATDAFDADF";
pub const BARCODE_2: &str = "DTFADTAFFTDADDATTFDAFFTTDADATFFTADTAFDAFTTDAFDTAFDDTAAFTDFADTFADT";

/// How a synthetic barcode is drawn
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// Left edge of the first bar
    pub x0: u32,
    /// Top of the tracker band
    pub y0: u32,
    /// Tracker height; ascenders and descenders add one unit each way
    pub unit: u32,
    pub bar_width: u32,
    pub pitch: u32,
    pub background: u8,
    pub ink: u8,
    /// Shift bars down one pixel every this many bars
    pub drift_every: u32,
    /// Amplitude of deterministic pixel noise
    pub noise: i32,
    /// Add a square blob and a wide rule above the barcode
    pub clutter: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 600,
            height: 160,
            x0: 30,
            y0: 70,
            unit: 16,
            bar_width: 4,
            pitch: 8,
            background: 255,
            ink: 0,
            drift_every: 0,
            noise: 0,
            clutter: false,
        }
    }
}

/// Capture conditions used by the synthetic corpus
pub fn combos() -> Vec<(&'static str, Layout)> {
    let d = Layout::default();
    vec![
        ("clean", d),
        ("noisy", Layout { noise: 12, ..d }),
        (
            "dim",
            Layout {
                background: 200,
                ink: 90,
                ..d
            },
        ),
        ("drift", Layout { drift_every: 8, ..d }),
        ("clutter", Layout { clutter: true, ..d }),
        ("shifted", Layout { x0: 60, y0: 90, ..d }),
    ]
}

fn fill(img: &mut GrayImage, x: u32, y: u32, w: u32, h: u32, value: u8) {
    for yy in y..(y + h).min(img.height()) {
        for xx in x..(x + w).min(img.width()) {
            img.put_pixel(xx, yy, Luma([value]));
        }
    }
}

/// Draw `bars` (a string over T/A/D/F, any length)
pub fn render(bars: &str, layout: &Layout) -> GrayImage {
    let mut img = GrayImage::from_pixel(layout.width, layout.height, Luma([layout.background]));

    for (i, c) in bars.chars().enumerate() {
        let i = i as u32;
        let drift = if layout.drift_every > 0 { i / layout.drift_every } else { 0 };
        let top = match c {
            'A' | 'F' => layout.y0 - layout.unit,
            _ => layout.y0,
        };
        let bottom = match c {
            'D' | 'F' => layout.y0 + 2 * layout.unit,
            _ => layout.y0 + layout.unit,
        };
        fill(
            &mut img,
            layout.x0 + i * layout.pitch,
            top + drift,
            layout.bar_width,
            bottom - top,
            layout.ink,
        );
    }

    if layout.clutter {
        fill(&mut img, 20, 8, 30, 30, layout.ink);
        fill(&mut img, 300, 10, 250, 6, layout.ink);
    }

    if layout.noise > 0 {
        let span = (2 * layout.noise + 1) as u32;
        let mut state: u32 = 12345;
        for pixel in img.pixels_mut() {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345) & 0x7fff_ffff;
            let n = ((state >> 16) % span) as i32 - layout.noise;
            pixel.0[0] = (pixel.0[0] as i32 + n).clamp(0, 255) as u8;
        }
    }

    img
}

/// Write a corpus (images + barcodes.txt) into `dir`; returns the manifest path
pub fn write_corpus(dir: &Path, barcodes: &[&str]) -> PathBuf {
    let combos = combos();
    let mut manifest = String::new();

    for (n, barcode) in barcodes.iter().enumerate() {
        manifest.push_str(barcode);
        for (name, layout) in &combos {
            manifest.push(' ');
            manifest.push_str(name);
            let path = dir.join(format!("t{}_{}.png", n + 1, name));
            render(barcode, layout).save(&path).expect("write corpus image");
        }
        manifest.push('\n');
    }

    let path = dir.join("barcodes.txt");
    fs::write(&path, manifest).expect("write manifest");
    path
}
