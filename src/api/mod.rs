mod chart_config;
mod connector_resolver;
mod pattern_cache;
mod post_draw;
mod render_coordinator;
mod simulation;

pub use chart_config::{
    CalloutLayout, ChartLabels, ChartPalette, ConnectorConfig, DEFAULT_PATTERN_SOURCES,
    MAX_CONNECTOR_RETRIES, PatternConfig, ProjectionChartConfig,
};
pub use connector_resolver::{ConnectorOutcome, ConnectorResolver, Readiness, ReadinessGap};
pub use pattern_cache::{PatternCache, PatternLoader, PatternStatus};
pub use post_draw::{
    POST_DRAW_HOOKS, PostDrawContext, PostDrawHook, PostDrawOutput, final_point_index,
    run_post_draw_hooks,
};
pub use render_coordinator::{RenderAbort, RenderCoordinator, RenderOutcome, RenderReport};
pub use simulation::{FixedSeries, ProjectionRequest, SimulationEngine};
