//! Boundary checks against the safety-margined canvas.

use crate::GridConfig;

/// Float noise absorbed by edge comparisons, in pixels.
const EDGE_TOLERANCE: f32 = 0.01;

/// Which axes an item's bounding box crosses the margined canvas edge on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overflow {
    /// Left or right edge is outside `[margin, width - margin]`.
    pub horizontal: bool,
    /// Top or bottom edge is outside `[margin, height - margin]`.
    pub vertical: bool,
}

impl Overflow {
    /// Whether either axis overflows.
    #[must_use]
    pub const fn any(self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Classify how an item centered at `(center_x, center_y)` overflows.
#[must_use]
pub fn overflow(center_x: f32, center_y: f32, config: &GridConfig) -> Overflow {
    let half_w = config.half_width();
    let half_h = config.half_height();
    let margin = config.safety_margin;

    let left = center_x - half_w;
    let right = center_x + half_w;
    let top = center_y - half_h;
    let bottom = center_y + half_h;

    // Written as containment so NaN edges count as overflow
    let fits_horizontally =
        left >= margin - EDGE_TOLERANCE && right <= config.canvas_width - margin + EDGE_TOLERANCE;
    let fits_vertically =
        top >= margin - EDGE_TOLERANCE && bottom <= config.canvas_height - margin + EDGE_TOLERANCE;

    Overflow {
        horizontal: !fits_horizontally,
        vertical: !fits_vertically,
    }
}

/// Whether an item centered at `(center_x, center_y)` leaves the margined canvas.
///
/// Non-finite positions always exceed.
#[must_use]
pub fn exceeds(center_x: f32, center_y: f32, config: &GridConfig) -> bool {
    overflow(center_x, center_y, config).any()
}

/// Clamp a center point so the item stays inside the margined canvas.
#[must_use]
pub fn clamp(center_x: f32, center_y: f32, config: &GridConfig) -> (f32, f32) {
    let margin = config.safety_margin;
    let half_w = config.half_width();
    let half_h = config.half_height();
    (
        clamp_axis(
            center_x,
            margin + half_w,
            config.canvas_width - margin - half_w,
        ),
        clamp_axis(
            center_y,
            margin + half_h,
            config.canvas_height - margin - half_h,
        ),
    )
}

/// Clamp into `[lo, hi]`; an inverted range collapses to its midpoint.
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        return (lo + hi) / 2.0;
    }
    if value.is_nan() {
        return lo;
    }
    value.clamp(lo, hi)
}
