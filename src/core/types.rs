use serde::{Deserialize, Serialize};

/// Amounts are charted in units of 10,000 (万).
pub const DISPLAY_UNIT: f64 = 10_000.0;

/// Converts a raw amount into chart display units.
#[must_use]
pub fn to_display_units(amount: f64) -> f64 {
    amount / DISPLAY_UNIT
}

/// Bitmap or CSS box size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One year of the externally simulated projection.
///
/// Expected (not enforced): `principal <= base_total <= selected_total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyPoint {
    pub year: u32,
    pub principal: f64,
    pub base_total: f64,
    pub selected_total: f64,
}

impl YearlyPoint {
    #[must_use]
    pub fn new(year: u32, principal: f64, base_total: f64, selected_total: f64) -> Self {
        Self {
            year,
            principal,
            base_total,
            selected_total,
        }
    }

    /// Larger of the two running totals.
    #[must_use]
    pub fn peak_total(self) -> f64 {
        self.base_total.max(self.selected_total)
    }
}

/// On-screen pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle in viewport coordinates, shaped like a DOM bounding rect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn top_left(self) -> ScreenPoint {
        ScreenPoint::new(self.left, self.top)
    }

    #[must_use]
    pub fn bottom_right(self) -> ScreenPoint {
        ScreenPoint::new(self.right(), self.bottom())
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Offset of `self`'s top-left corner relative to `origin`'s top-left corner.
    #[must_use]
    pub fn offset_from(self, origin: Rect) -> (f64, f64) {
        (self.left - origin.left, self.top - origin.top)
    }
}
