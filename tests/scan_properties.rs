//! Properties that must hold for every scan.

mod common;

use common::{BARCODE_1, BARCODE_2, Layout, render};
use image::{DynamicImage, GrayImage, Luma};
use imb_scan::debug::{DebugSink, DirSink};
use imb_scan::error::DebugWriteError;
use imb_scan::{BarcodeString, NUM_BARS, ScanError, Scanner};
use std::sync::{Arc, Mutex};

fn scan_str(bars: &str, layout: &Layout) -> BarcodeString {
    let img = DynamicImage::ImageLuma8(render(bars, layout));
    Scanner::default().scan_image(&img, "synthetic.png")
}

#[test]
fn test_repeated_scans_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t1_noisy.png");
    render(
        BARCODE_2,
        &Layout {
            noise: 12,
            ..Layout::default()
        },
    )
    .save(&path)
    .unwrap();

    let scanner = Scanner::default();
    let first = scanner.scan_path(&path).unwrap();
    assert_eq!(first.to_string(), BARCODE_2);
    for _ in 0..3 {
        assert_eq!(scanner.scan_path(&path).unwrap(), first);
    }
}

#[test]
fn test_output_is_always_65_chars() {
    let layout = Layout::default();
    let inputs = [
        render(BARCODE_1, &layout),
        render("", &layout),
        render(&BARCODE_1[..40], &layout),
        GrayImage::from_pixel(32, 32, Luma([0])),
        GrayImage::from_pixel(1, 1, Luma([255])),
    ];
    for gray in inputs {
        let s = Scanner::default()
            .scan_image(&DynamicImage::ImageLuma8(gray), "x.png")
            .to_string();
        assert_eq!(s.chars().count(), NUM_BARS);
    }
}

#[test]
fn test_near_miss_bar_counts_are_not_found() {
    let layout = Layout::default();
    let short = &BARCODE_1[..NUM_BARS - 1];
    let long = format!("{BARCODE_1}T");

    assert_eq!(scan_str(short, &layout), BarcodeString::NotFound);
    assert_eq!(scan_str(&long, &layout), BarcodeString::NotFound);
    assert_eq!(
        scan_str(short, &layout).to_string(),
        " ".repeat(NUM_BARS)
    );
}

#[test]
fn test_touching_bars_fail_the_count_gate() {
    // No gap between bars: the whole barcode is one component
    let layout = Layout {
        bar_width: 8,
        ..Layout::default()
    };
    assert_eq!(scan_str(BARCODE_1, &layout), BarcodeString::NotFound);
}

#[test]
fn test_unreadable_input_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not an image").unwrap();

    match Scanner::default().scan_path(&path) {
        Err(ScanError::Load { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected load error, got {other:?}"),
    }
}

#[derive(Clone, Default)]
struct MemorySink(Arc<Mutex<Vec<String>>>);

impl DebugSink for MemorySink {
    fn write(
        &self,
        tag: Option<&str>,
        file_name: &str,
        _image: &DynamicImage,
    ) -> Result<(), DebugWriteError> {
        let name = match tag {
            Some(tag) => format!("{tag}_{file_name}"),
            None => file_name.to_string(),
        };
        self.0.lock().unwrap().push(name);
        Ok(())
    }
}

#[test]
fn test_debug_sink_receives_all_stages() {
    let sink = MemorySink::default();
    let scanner = Scanner::default().with_debug_sink(sink.clone());
    let img = DynamicImage::ImageLuma8(render(BARCODE_1, &Layout::default()));

    let barcode = scanner.scan_image(&img, "t1_clean.png");
    assert_eq!(barcode.to_string(), BARCODE_1);
    assert_eq!(
        *sink.0.lock().unwrap(),
        vec!["mask_t1_clean.png", "closed_t1_clean.png", "t1_clean.png"]
    );
}

#[test]
fn test_debug_output_never_changes_result() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("t1_clean.png");
    render(BARCODE_1, &Layout::default()).save(&input).unwrap();

    let plain = Scanner::default().scan_path(&input).unwrap();

    // Writable sibling `out` directory
    let with_out = Scanner::default()
        .with_debug_sink(DirSink::beside(&input))
        .scan_path(&input)
        .unwrap();
    assert!(dir.path().join("out").join("t1_clean.png").exists());
    assert!(dir.path().join("out").join("closed_t1_clean.png").exists());

    // A file blocks the output directory
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, b"x").unwrap();
    let blocked = Scanner::default()
        .with_debug_sink(DirSink::new(&blocker))
        .scan_path(&input)
        .unwrap();

    assert_eq!(plain.to_string(), BARCODE_1);
    assert_eq!(with_out, plain);
    assert_eq!(blocked, plain);
}

#[test]
fn test_barcode_flush_with_left_edge() {
    let layout = Layout {
        x0: 0,
        ..Layout::default()
    };
    let img = DynamicImage::ImageLuma8(render(BARCODE_1, &layout));
    let report = Scanner::default().scan_image_report(&img, "left.png");

    let region = report.region.expect("barcode region");
    assert_eq!(region.x, 0);
    assert_eq!(region.bars.len(), NUM_BARS);
    assert_eq!(region.bars[0].x, 0);
    assert_eq!(report.barcode.to_string(), BARCODE_1);
}

#[test]
fn test_barcode_near_top_left_corner() {
    // Ascenders reach y = 3; the padded crop is clipped on two sides
    let layout = Layout {
        x0: 3,
        y0: 19,
        ..Layout::default()
    };
    assert_eq!(scan_str(BARCODE_2, &layout).to_string(), BARCODE_2);
}
