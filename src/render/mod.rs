mod animation;
mod chart_spec;
mod frame;
mod null_renderer;
mod primitives;
mod surface;

pub use animation::{AnimationOrigin, AnimationSpec, Easing, PropertyAnimation};
pub use chart_spec::{
    AreaFill, AxisSpec, AxisTick, ChartSpec, DatasetSpec, DatasetStyle, LayoutPadding,
    PROJECTION_STACK_GROUP,
};
pub use frame::PostDrawFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, PatternFill, TextHAlign, TextPrimitive};
pub use surface::{DrawingSurface, HeadlessSurface, SurfaceSize};

use futures::future::LocalBoxFuture;

use crate::core::{Rect, ScreenPoint};
use crate::error::ChartResult;

/// Contract implemented by the charting engine that lays out and animates
/// the stacked projection.
///
/// Coordinates reported back (`chart_area`, `point_position`,
/// `value_to_pixel_y`) are CSS pixels relative to the drawing surface and are
/// only meaningful once the engine has finished its layout, so every read is
/// fallible.
pub trait ChartRenderer {
    /// Paintable fill resource produced by a matching pattern loader.
    type Pattern: Clone + 'static;

    /// Builds the chart from `spec`, replacing nothing: callers destroy first.
    fn build(&mut self, spec: &ChartSpec) -> ChartResult<()>;

    /// Drops the current chart instance, if any.
    fn destroy(&mut self);

    fn is_built(&self) -> bool;

    /// Resolves once the entrance animation of the current chart has completed.
    fn animation_complete(&mut self) -> LocalBoxFuture<'static, ()>;

    fn chart_area(&self) -> Option<Rect>;

    /// Number of laid-out points for `dataset`.
    fn dataset_len(&self, dataset: usize) -> usize;

    /// Final on-screen position of one point, after stacking.
    fn point_position(&self, dataset: usize, index: usize) -> Option<ScreenPoint>;

    /// Vertical pixel of `value` on the value axis.
    fn value_to_pixel_y(&self, value: f64) -> Option<f64>;

    /// Paints `frame` above the datasets on every subsequent draw.
    fn draw_post_frame(&mut self, frame: PostDrawFrame<Self::Pattern>) -> ChartResult<()>;
}
