use serde::{Deserialize, Serialize};

use crate::core::{Rect, Viewport};

/// The bitmap drawing surface (a canvas element in a browser host).
pub trait DrawingSurface {
    /// Box of the element containing the surface; `None` once detached.
    fn container_box(&self) -> Option<Rect>;
    /// The surface's own bounding rect in viewport coordinates.
    fn bounding_rect(&self) -> Rect;
    fn device_pixel_ratio(&self) -> f64;
    fn set_bitmap_size(&mut self, size: Viewport);
    /// Only the CSS width is set; height is left to the host layout.
    fn set_display_width(&mut self, width_px: f64);
}

/// Surface dimensions for one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
    pub bitmap: Viewport,
}

impl SurfaceSize {
    /// Sizes the bitmap for `container` at `pixel_ratio`.
    ///
    /// A collapsed box falls back to `fallback`; an unusable ratio falls back to 1.
    #[must_use]
    pub fn for_container(container: Rect, pixel_ratio: f64, fallback: (f64, f64)) -> Self {
        let usable = |value: f64| value.is_finite() && value > 0.0;
        let css_width = if usable(container.width) {
            container.width
        } else {
            fallback.0
        };
        let css_height = if usable(container.height) {
            container.height
        } else {
            fallback.1
        };
        let pixel_ratio = if usable(pixel_ratio) { pixel_ratio } else { 1.0 };

        Self {
            css_width,
            css_height,
            pixel_ratio,
            bitmap: Viewport::new(
                (css_width * pixel_ratio).round() as u32,
                (css_height * pixel_ratio).round() as u32,
            ),
        }
    }

    #[must_use]
    pub fn css_viewport(self) -> Viewport {
        Viewport::new(self.css_width.round() as u32, self.css_height.round() as u32)
    }
}

/// Surface that records sizing calls instead of touching a real canvas.
///
/// Used by tests and headless rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurface {
    pub container: Option<Rect>,
    pub rect: Rect,
    pub pixel_ratio: f64,
    pub bitmap: Option<Viewport>,
    pub display_width: Option<f64>,
}

impl HeadlessSurface {
    /// Surface filling `container` at the given ratio.
    #[must_use]
    pub fn new(container: Rect, pixel_ratio: f64) -> Self {
        Self {
            container: Some(container),
            rect: container,
            pixel_ratio,
            bitmap: None,
            display_width: None,
        }
    }

    #[must_use]
    pub fn detached(rect: Rect) -> Self {
        Self {
            container: None,
            rect,
            pixel_ratio: 1.0,
            bitmap: None,
            display_width: None,
        }
    }
}

impl DrawingSurface for HeadlessSurface {
    fn container_box(&self) -> Option<Rect> {
        self.container
    }

    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    fn set_bitmap_size(&mut self, size: Viewport) {
        self.bitmap = Some(size);
    }

    fn set_display_width(&mut self, width_px: f64) {
        self.display_width = Some(width_px);
        self.rect.width = width_px;
    }
}
