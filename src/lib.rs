//! imb_scan - Intelligent Mail barcode bar-type reader
//!
//! Finds a USPS Intelligent Mail barcode in an image and reads it as a
//! 65-character string over `{T, A, D, F}` (tracker, ascender, descender,
//! full). Turning that string into digits is left to the caller.
//!
//! ```no_run
//! let barcode = imb_scan::scan("envelope.png").unwrap();
//! if barcode.is_found() {
//!     println!("{barcode}");
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Scan parameters and environment overrides
pub mod config;
/// Debug rendering and artifact sinks
pub mod debug;
/// Bar-type classification
pub mod decoder;
/// Barcode region and bar detection
pub mod detector;
/// Hardware collaborator interfaces
pub mod device;
/// Error types
pub mod error;
/// Core data structures (Bar, BarType, BarcodeString, BitMatrix, Region)
pub mod models;
/// Scan pipeline
pub mod pipeline;
/// Regression corpus tooling
pub mod tools;
/// Image processing helpers (blur, binarization, morphology)
pub mod utils;

pub use config::ScanConfig;
pub use error::{DebugWriteError, ScanError};
pub use models::{Bar, BarType, BarcodeString, NUM_BARS, Region};
pub use pipeline::{ScanReport, Scanner};

use std::path::Path;

/// Scan the image at `path` with the default configuration.
///
/// Returns [`BarcodeString::NotFound`] (65 spaces when printed) if no
/// barcode could be located; only unreadable input is an error.
pub fn scan<P: AsRef<Path>>(path: P) -> Result<BarcodeString, ScanError> {
    Scanner::default().scan_path(path.as_ref())
}
