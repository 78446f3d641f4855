use serde::{Deserialize, Serialize};

use crate::core::YearlyPoint;

/// Inputs of one projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub interest_rate_percent: u32,
    pub monthly_amount: f64,
    pub horizon_years: u32,
}

impl ProjectionRequest {
    #[must_use]
    pub fn new(interest_rate_percent: u32, monthly_amount: f64, horizon_years: u32) -> Self {
        Self {
            interest_rate_percent,
            monthly_amount,
            horizon_years,
        }
    }
}

/// Producer of the yearly projection series.
///
/// Implementations return one point per year from 0 through
/// `horizon_years`, with `base_total` at the reference rate and
/// `selected_total` at the requested rate. An empty series means "nothing
/// to chart". Tax treatment and compounding are entirely the engine's concern.
pub trait SimulationEngine {
    fn yearly_series(&self, request: &ProjectionRequest) -> Vec<YearlyPoint>;
}

impl<F> SimulationEngine for F
where
    F: Fn(&ProjectionRequest) -> Vec<YearlyPoint>,
{
    fn yearly_series(&self, request: &ProjectionRequest) -> Vec<YearlyPoint> {
        self(request)
    }
}

/// Engine that replays a precomputed series regardless of the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedSeries(pub Vec<YearlyPoint>);

impl SimulationEngine for FixedSeries {
    fn yearly_series(&self, _request: &ProjectionRequest) -> Vec<YearlyPoint> {
        self.0.clone()
    }
}
