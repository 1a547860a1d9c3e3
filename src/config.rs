//! Scan tuning constants, with optional `IMB_*` environment overrides.

use crate::utils::blur::DEFAULT_KERNEL_SIZE;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Closing element width override
pub const ENV_CLOSING_WIDTH: &str = "IMB_CLOSING_WIDTH";
/// Closing element height override
pub const ENV_CLOSING_HEIGHT: &str = "IMB_CLOSING_HEIGHT";
/// Minimum candidate width/height ratio override
pub const ENV_MIN_ASPECT: &str = "IMB_MIN_ASPECT";
/// Crop padding override
pub const ENV_REGION_PADDING: &str = "IMB_REGION_PADDING";
/// Height ratio divisor override
pub const ENV_HEIGHT_RATIO: &str = "IMB_HEIGHT_RATIO";

/// Parameters of one scan.
///
/// [`ScanConfig::default`] carries the reference values; every stage reads
/// its constants from here rather than from globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Smoothing kernel size (odd, clamped to
    /// [`MAX_KERNEL_SIZE`](crate::utils::blur::MAX_KERNEL_SIZE)). Not
    /// overridable from the environment.
    pub blur_kernel: usize,
    /// Width of the closing element that fuses neighbouring bars
    pub closing_width: usize,
    /// Height of the closing element
    pub closing_height: usize,
    /// Candidates narrower than `min_aspect_ratio * height` are rejected
    pub min_aspect_ratio: f32,
    /// Margin added on every side of a candidate before cropping
    pub region_padding: usize,
    /// Divisor applied to the per-type height threshold when classifying
    pub height_ratio: f32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            blur_kernel: DEFAULT_KERNEL_SIZE,
            closing_width: 18,
            closing_height: 6,
            min_aspect_ratio: 3.0,
            region_padding: 5,
            height_ratio: 1.8,
        }
    }
}

impl ScanConfig {
    /// Defaults, overridden by any `IMB_*` variables that parse.
    /// Values are clamped to sane ranges.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            blur_kernel: d.blur_kernel,
            closing_width: parse_env_usize(ENV_CLOSING_WIDTH, d.closing_width).clamp(1, 256),
            closing_height: parse_env_usize(ENV_CLOSING_HEIGHT, d.closing_height).clamp(1, 256),
            min_aspect_ratio: parse_env_f32(ENV_MIN_ASPECT, d.min_aspect_ratio).clamp(0.0, 100.0),
            region_padding: parse_env_usize(ENV_REGION_PADDING, d.region_padding).min(256),
            height_ratio: parse_env_f32(ENV_HEIGHT_RATIO, d.height_ratio).clamp(0.1, 10.0),
        }
    }
}
