use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Linear mapping from a value domain onto a pixel span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps `value` onto `[pixel_start, pixel_end]`.
    ///
    /// `pixel_end < pixel_start` is allowed and yields an inverted axis, which
    /// is how vertical value axes grow upwards on screen.
    pub fn value_to_pixel(self, value: f64, pixel_start: f64, pixel_end: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(ChartError::InvalidData(
                "pixel span must be finite".to_owned(),
            ));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(pixel_start + normalized * (pixel_end - pixel_start))
    }

    pub fn pixel_to_value(self, pixel: f64, pixel_start: f64, pixel_end: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let span = pixel_end - pixel_start;
        if !span.is_finite() || span == 0.0 {
            return Err(ChartError::InvalidData(
                "pixel span must be finite and non-zero".to_owned(),
            ));
        }

        let normalized = (pixel - pixel_start) / span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}
