pub mod axis_scale;
pub mod connector;
pub mod scale;
pub mod stacked_layers;
pub mod types;

pub use axis_scale::{
    AXIS_HEADROOM_FACTOR, AXIS_OVERFLOW_STEP, AXIS_TIERS, AxisScale, AxisTier, YearTick,
    horizon_ticks, scale_axis,
};
pub use connector::{ConnectorGeometry, ConnectorMeasurement};
pub use scale::LinearScale;
pub use stacked_layers::{
    StackedLayer, StackedLayers, adapt_series, final_year_index, series_maximum,
};
pub use types::{DISPLAY_UNIT, Rect, ScreenPoint, Viewport, YearlyPoint, to_display_units};
