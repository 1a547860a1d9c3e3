//! Barcode detection modules
//!
//! This module finds the barcode in a binary mask:
//! - Outer-boundary tracing of foreground components
//! - Bar extraction inside a crop
//! - Region location via morphological closing and shape filtering

/// Bar extraction from a region crop
pub mod bars;
/// External contour tracing and bounding boxes
pub mod contour;
/// Barcode region search
pub mod region;
