use serde::{Deserialize, Serialize};

/// Easing curve applied to one animated point property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Decelerating `1 - (1 - t)^4`.
    EaseOutQuart,
}

impl Easing {
    /// Eased progress for `t`, clamped into `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// Where an animated property starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnimationOrigin {
    /// No start value: the point appears at its final position.
    #[default]
    Unset,
    /// Starts from the value axis' zero pixel.
    ValueAxisZero,
}

/// Per-point animation of one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyAnimation {
    pub easing: Easing,
    pub duration_ms: u64,
    /// Delay added per point index on the point's first start.
    pub stagger_ms: u64,
    #[serde(default)]
    pub origin: AnimationOrigin,
}

impl PropertyAnimation {
    /// Start delay for the point at `index`.
    ///
    /// Only the first start of a point is staggered; later updates start
    /// immediately.
    #[must_use]
    pub fn delay_ms(&self, index: usize, already_started: bool) -> u64 {
        if already_started {
            return 0;
        }
        (index as u64).saturating_mul(self.stagger_ms)
    }

    /// Eased progress of the point at `index`, `elapsed_ms` after the chart started.
    #[must_use]
    pub fn progress(&self, index: usize, elapsed_ms: u64) -> f64 {
        let delay = self.delay_ms(index, false);
        if elapsed_ms <= delay {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        let t = (elapsed_ms - delay) as f64 / self.duration_ms as f64;
        self.easing.apply(t)
    }

    /// Time until the last of `point_count` points settles.
    #[must_use]
    pub fn total_ms(&self, point_count: usize) -> u64 {
        let last = point_count.saturating_sub(1);
        self.delay_ms(last, false).saturating_add(self.duration_ms)
    }
}

/// Entrance animation handed to the renderer.
///
/// The whole-chart duration stays 0 so it never competes with per-point timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSpec {
    pub chart_duration_ms: u64,
    pub x: PropertyAnimation,
    pub y: PropertyAnimation,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            chart_duration_ms: 0,
            x: PropertyAnimation {
                easing: Easing::Linear,
                duration_ms: 300,
                stagger_ms: 50,
                origin: AnimationOrigin::Unset,
            },
            y: PropertyAnimation {
                easing: Easing::EaseOutQuart,
                duration_ms: 600,
                stagger_ms: 50,
                origin: AnimationOrigin::ValueAxisZero,
            },
        }
    }
}

impl AnimationSpec {
    /// Time until every point of a dataset with `point_count` points has settled.
    #[must_use]
    pub fn settle_ms(&self, point_count: usize) -> u64 {
        self.x
            .total_ms(point_count)
            .max(self.y.total_ms(point_count))
            .max(self.chart_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_quart_decelerates() {
        let easing = Easing::EaseOutQuart;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        assert!((easing.apply(0.5) - 0.9375).abs() <= 1e-12);
        assert!(easing.apply(0.5) > Easing::Linear.apply(0.5));
    }

    #[test]
    fn stagger_applies_only_on_first_start() {
        let spec = AnimationSpec::default();
        assert_eq!(spec.x.delay_ms(4, false), 200);
        assert_eq!(spec.x.delay_ms(4, true), 0);
        assert_eq!(spec.y.delay_ms(0, false), 0);
    }

    #[test]
    fn settle_covers_slowest_axis() {
        let spec = AnimationSpec::default();
        // 21 points: last y start at 1000ms plus 600ms duration.
        assert_eq!(spec.settle_ms(21), 1_600);
        assert_eq!(spec.y.progress(20, 1_000), 0.0);
        assert_eq!(spec.y.progress(20, 1_600), 1.0);
    }
}
