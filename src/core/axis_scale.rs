use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::types::to_display_units;
use crate::error::{ChartError, ChartResult};

/// Headroom applied above the observed maximum before picking a ceiling.
pub const AXIS_HEADROOM_FACTOR: f64 = 1.1;

/// Magnitude band of the step tier table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTier {
    /// Inclusive upper bound of the margined value, in display units.
    pub upper_bound: f64,
    pub step: f64,
}

impl AxisTier {
    const fn new(upper_bound: f64, step: f64) -> Self {
        Self { upper_bound, step }
    }
}

/// Step tiers keyed by the margined maximum, in display units.
pub const AXIS_TIERS: [AxisTier; 5] = [
    AxisTier::new(100.0, 20.0),
    AxisTier::new(500.0, 100.0),
    AxisTier::new(1_000.0, 100.0),
    AxisTier::new(2_500.0, 200.0),
    AxisTier::new(5_000.0, 500.0),
];

/// Step used above the last tier.
pub const AXIS_OVERFLOW_STEP: f64 = 1_000.0;

/// Value-axis ceiling and tick step, both in display units.
///
/// `max` is always a positive integer multiple of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub max: f64,
    pub step: f64,
}

impl AxisScale {
    /// Rounds `max` up to the next multiple of `step`.
    ///
    /// Idempotent for an already aligned ceiling. Renderers with their own
    /// auto-tick logic otherwise tend to add one tick past the declared max.
    #[must_use]
    pub fn aligned(self) -> Self {
        Self {
            max: round_up_to_step(self.max, self.step),
            step: self.step,
        }
    }

    /// Ceiling converted back to raw amount units.
    #[must_use]
    pub fn max_amount(self) -> f64 {
        self.max * crate::core::DISPLAY_UNIT
    }

    /// Tick values `0, step, 2*step, ..., max`.
    #[must_use]
    pub fn ticks(self) -> SmallVec<[f64; 16]> {
        let mut ticks = SmallVec::new();
        if !self.step.is_finite() || self.step <= 0.0 || !self.max.is_finite() {
            return ticks;
        }
        let count = (self.max / self.step).round() as u64;
        for index in 0..=count {
            ticks.push(index as f64 * self.step);
        }
        ticks
    }
}

fn round_up_to_step(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}

fn step_for(margined: f64) -> f64 {
    AXIS_TIERS
        .iter()
        .find(|tier| margined <= tier.upper_bound)
        .map_or(AXIS_OVERFLOW_STEP, |tier| tier.step)
}

/// Chooses a human-readable value-axis ceiling for `max_value` (raw amount units).
///
/// The value is converted to display units, given 10% headroom, and rounded
/// up to the step of the tier its margined magnitude falls into.
pub fn scale_axis(max_value: f64) -> ChartResult<AxisScale> {
    if !max_value.is_finite() || max_value <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "axis maximum must be finite and > 0, got {max_value}"
        )));
    }

    let margined = to_display_units(max_value) * AXIS_HEADROOM_FACTOR;
    let step = step_for(margined);
    let scale = AxisScale {
        max: round_up_to_step(margined, step),
        step,
    };
    trace!(max_value, margined, max = scale.max, step, "axis scale selected");
    Ok(scale)
}

/// One labelled tick on the horizontal year axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTick {
    pub year: u32,
    pub is_final: bool,
}

/// Year ticks every `interval` years from 0, plus a forced final tick at `horizon_years`.
#[must_use]
pub fn horizon_ticks(horizon_years: u32, interval: u32) -> SmallVec<[YearTick; 16]> {
    let interval = interval.max(1);
    let mut ticks: SmallVec<[YearTick; 16]> = (0..=horizon_years)
        .step_by(interval as usize)
        .map(|year| YearTick {
            year,
            is_final: year == horizon_years,
        })
        .collect();
    if ticks.last().is_none_or(|tick| tick.year != horizon_years) {
        ticks.push(YearTick {
            year: horizon_years,
            is_final: true,
        });
    }
    ticks
}
