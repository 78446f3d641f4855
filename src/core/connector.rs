use serde::{Deserialize, Serialize};

use crate::core::types::{Rect, ScreenPoint};

/// Straight connector from a callout anchor to its chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectorGeometry {
    pub length: f64,
    pub angle_degrees: f64,
}

impl ConnectorGeometry {
    pub const LENGTH_VAR: &'static str = "--line-length";
    pub const ANGLE_VAR: &'static str = "--line-angle";

    /// Geometry of the segment `origin -> target`.
    ///
    /// Returns `None` for a zero-length or non-finite result, which happens
    /// while an anchor has not reached its final laid-out size.
    #[must_use]
    pub fn between(origin: ScreenPoint, target: ScreenPoint) -> Option<Self> {
        let dx = target.x - origin.x;
        let dy = target.y - origin.y;
        let geometry = Self {
            length: dx.hypot(dy),
            angle_degrees: dy.atan2(dx).to_degrees(),
        };
        geometry.is_drawable().then_some(geometry)
    }

    #[must_use]
    pub fn is_drawable(self) -> bool {
        self.length.is_finite() && self.angle_degrees.is_finite() && self.length > 0.0
    }

    /// Style variables understood by the callout stylesheet.
    #[must_use]
    pub fn style_vars(self) -> [(&'static str, String); 2] {
        [
            (Self::LENGTH_VAR, format!("{}px", self.length)),
            (Self::ANGLE_VAR, format!("{}deg", self.angle_degrees)),
        ]
    }
}

/// Layout reads needed to place one connector, all in viewport coordinates
/// except `point`, which is relative to the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectorMeasurement {
    pub anchor: Rect,
    pub container: Rect,
    pub surface: Rect,
    pub point: ScreenPoint,
}

impl ConnectorMeasurement {
    /// Anchor's bottom-right corner, relative to the container.
    #[must_use]
    pub fn origin(&self) -> ScreenPoint {
        let corner = self.anchor.bottom_right();
        ScreenPoint::new(corner.x - self.container.left, corner.y - self.container.top)
    }

    /// Chart point, relative to the container.
    #[must_use]
    pub fn target(&self) -> ScreenPoint {
        let (dx, dy) = self.surface.offset_from(self.container);
        self.point.offset(dx, dy)
    }

    #[must_use]
    pub fn geometry(&self) -> Option<ConnectorGeometry> {
        ConnectorGeometry::between(self.origin(), self.target())
    }
}
