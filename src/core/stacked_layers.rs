use serde::{Deserialize, Serialize};

use crate::core::types::{YearlyPoint, to_display_units};

/// One stacked-band sample: `y` is the delta above the band beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedLayer {
    pub x: f64,
    pub y: f64,
}

/// Three additive bands whose stacked height at each year equals
/// `selected_total / DISPLAY_UNIT`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StackedLayers {
    pub principal: Vec<StackedLayer>,
    pub base: Vec<StackedLayer>,
    pub selected: Vec<StackedLayer>,
}

impl StackedLayers {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.principal.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.principal.len()
    }

    /// Cumulative stack height at `index`, in display units.
    #[must_use]
    pub fn stack_height(&self, index: usize) -> Option<f64> {
        Some(self.principal.get(index)?.y + self.base.get(index)?.y + self.selected.get(index)?.y)
    }

    /// Layers bottom to top.
    #[must_use]
    pub fn bands(&self) -> [&[StackedLayer]; 3] {
        [&self.principal, &self.base, &self.selected]
    }
}

/// Converts absolute running totals into stacked deltas in display units.
///
/// An empty series yields empty layers.
#[must_use]
pub fn adapt_series(series: &[YearlyPoint]) -> StackedLayers {
    let mut layers = StackedLayers {
        principal: Vec::with_capacity(series.len()),
        base: Vec::with_capacity(series.len()),
        selected: Vec::with_capacity(series.len()),
    };

    for point in series {
        let x = f64::from(point.year);
        let principal = to_display_units(point.principal);
        let base_total = to_display_units(point.base_total);
        let selected_total = to_display_units(point.selected_total);

        layers.principal.push(StackedLayer { x, y: principal });
        layers.base.push(StackedLayer {
            x,
            y: base_total - principal,
        });
        layers.selected.push(StackedLayer {
            x,
            y: selected_total - base_total,
        });
    }

    layers
}

/// Largest running total across the series, in raw amount units.
///
/// Taken from the absolute totals, never from the stacked deltas. Returns
/// `None` for an empty series; NaN totals propagate so the caller can reject them.
#[must_use]
pub fn series_maximum(series: &[YearlyPoint]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    Some(series.iter().fold(f64::NEG_INFINITY, |max, point| {
        if max.is_nan() || point.base_total.is_nan() || point.selected_total.is_nan() {
            f64::NAN
        } else {
            max.max(point.peak_total())
        }
    }))
}

/// Index of the point whose year equals `horizon_years`, searching from the end.
#[must_use]
pub fn final_year_index(series: &[YearlyPoint], horizon_years: u32) -> Option<usize> {
    series.iter().rposition(|point| point.year == horizon_years)
}
