//! # Page Frame and Unit Conversion
//!
//! Every field position is authored in one fixed pixel coordinate system:
//! an A4 page rasterised at 96 DPI. This module defines that reference
//! frame and converts its pixels into physical millimetres (for print) and
//! into scaled screen pixels (for the preview).
//!
//! ## Reference Frame
//!
//! | Property | Value |
//! |----------|-------|
//! | Width | 794 px / 210 mm |
//! | Height | 1123 px / 297 mm |
//! | Density | ≈ 3.781 px/mm on both axes |
//!
//! ## Usage
//!
//! ```
//! use overprint::units::{px_to_mm, PageFrame};
//!
//! assert_eq!(px_to_mm(794.0), 210.0);
//! assert!((px_to_mm(1123.0) - 297.0).abs() < 0.1);
//! assert_eq!(PageFrame::A4.scaled_size(0.5), (397.0, 561.5));
//! ```

use serde::{Deserialize, Serialize};

/// Reference page width in pixels (A4 at 96 DPI).
pub const REFERENCE_WIDTH_PX: f64 = 794.0;

/// Reference page height in pixels (A4 at 96 DPI).
pub const REFERENCE_HEIGHT_PX: f64 = 1123.0;

/// Physical A4 width in millimetres.
pub const A4_WIDTH_MM: f64 = 210.0;

/// Physical A4 height in millimetres.
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Convert a reference-frame pixel length to millimetres.
///
/// The same ratio is used for both axes: 794/210 and 1123/297 agree to
/// within rounding, so a single conversion keeps fields square. No rounding
/// is applied; callers decide how many digits to emit.
///
/// ```
/// use overprint::units::px_to_mm;
///
/// assert_eq!(px_to_mm(0.0), 0.0);
/// assert!((px_to_mm(12.0) - 3.1738).abs() < 0.001);
/// ```
#[inline]
pub fn px_to_mm(px: f64) -> f64 {
    px / REFERENCE_WIDTH_PX * A4_WIDTH_MM
}

/// Scale a reference-frame pixel length to on-screen pixels.
#[inline]
pub fn scaled(px: f64, scale: f64) -> f64 {
    px * scale
}

/// Convert a scaled on-screen pixel length back into the reference frame.
///
/// Used by the debug picker; rounds to whole pixels so reported values can
/// be pasted straight into a schema.
#[inline]
pub fn unscale(screen_px: f64, scale: f64) -> f64 {
    (screen_px / scale).round()
}

/// How a page image is stretched into its page box.
///
/// Screen preview and print must agree on this, otherwise fields drift
/// relative to the scanned form on pages whose aspect ratio is not exactly
/// A4. Both renderers read [`PageFrame::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    /// Stretch to exactly fill the page box (may distort).
    Fill,
    /// Letterbox inside the page box (preserves aspect ratio).
    Contain,
}

impl ImageFit {
    /// CSS `object-fit` keyword.
    pub fn css(&self) -> &'static str {
        match self {
            ImageFit::Fill => "fill",
            ImageFit::Contain => "contain",
        }
    }
}

/// # Page Frame
///
/// The fixed page geometry that field schemas are authored against.
///
/// ## Calculations
///
/// ```text
/// px_per_mm = width_px / width_mm
///
/// For A4 @ 96 DPI:
///   794 / 210  ≈ 3.7810
///   1123 / 297 ≈ 3.7811
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    /// Page width in reference pixels
    pub width_px: f64,

    /// Page height in reference pixels
    pub height_px: f64,

    /// Image fit mode shared by preview and print
    pub fit: ImageFit,
}

impl PageFrame {
    /// A4 at 96 DPI, images stretched to fill.
    pub const A4: Self = Self {
        width_px: REFERENCE_WIDTH_PX,
        height_px: REFERENCE_HEIGHT_PX,
        fit: ImageFit::Fill,
    };

    /// On-screen page size at `scale`.
    pub fn scaled_size(&self, scale: f64) -> (f64, f64) {
        (scaled(self.width_px, scale), scaled(self.height_px, scale))
    }
}

impl Default for PageFrame {
    fn default() -> Self {
        Self::A4
    }
}

// ============================================================================
// TESTS
// ============================================================================
