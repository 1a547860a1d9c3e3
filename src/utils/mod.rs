//! Image processing helpers
//!
//! - Smoothing (fixed binomial kernel)
//! - Binarization (Otsu's method, inverted)
//! - Rectangular binary morphology

pub mod binarization;
pub mod blur;
pub mod morphology;
