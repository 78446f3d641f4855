//! projection-chart: presentation core of a savings projection chart.
//!
//! Turns a yearly projection into a stacked-area chart spec with a
//! human-readable value axis, caches the decorative fill pattern, and
//! resolves the geometry of the connector lines between value callouts and
//! their chart points once the external renderer has settled.

pub mod api;
pub mod core;
pub mod error;
pub mod overlay;
pub mod render;
pub mod scheduler;
pub mod telemetry;

pub use api::{ProjectionChartConfig, ProjectionRequest, RenderCoordinator, RenderOutcome};
pub use error::{ChartError, ChartResult};
