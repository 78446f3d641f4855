use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use indexmap::IndexMap;
use tracing::trace;

use crate::core::{LinearScale, Rect, ScreenPoint};
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartRenderer, ChartSpec, PostDrawFrame};

/// Width reserved left of the plot for value-axis tick labels.
const VALUE_AXIS_GUTTER_PX: f64 = 40.0;
/// Height reserved below the plot for year-axis tick labels.
const YEAR_AXIS_GUTTER_PX: f64 = 24.0;

/// Headless renderer with a deterministic linear layout.
///
/// Animation completes immediately. Used by tests and by hosts that only
/// need the computed geometry.
#[derive(Debug)]
pub struct NullRenderer<P = ()> {
    spec: Option<ChartSpec>,
    chart_area: Option<Rect>,
    value_scale: Option<LinearScale>,
    positions: Vec<Vec<ScreenPoint>>,
    last_post_frame: Option<PostDrawFrame<P>>,
    pub build_count: usize,
    pub destroy_count: usize,
}

impl<P> Default for NullRenderer<P> {
    fn default() -> Self {
        Self {
            spec: None,
            chart_area: None,
            value_scale: None,
            positions: Vec::new(),
            last_post_frame: None,
            build_count: 0,
            destroy_count: 0,
        }
    }
}

impl<P> NullRenderer<P> {
    #[must_use]
    pub fn spec(&self) -> Option<&ChartSpec> {
        self.spec.as_ref()
    }

    #[must_use]
    pub fn last_post_frame(&self) -> Option<&PostDrawFrame<P>> {
        self.last_post_frame.as_ref()
    }

    fn layout(spec: &ChartSpec) -> ChartResult<(Rect, LinearScale, Vec<Vec<ScreenPoint>>)> {
        if !spec.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: spec.viewport.width,
                height: spec.viewport.height,
            });
        }
        let width = f64::from(spec.viewport.width);
        let height = f64::from(spec.viewport.height);
        let area = Rect::from_edges(
            spec.padding.left + VALUE_AXIS_GUTTER_PX,
            spec.padding.top,
            width - spec.padding.right,
            height - spec.padding.bottom - YEAR_AXIS_GUTTER_PX,
        );
        if !(area.width > 0.0 && area.height > 0.0) {
            return Err(ChartError::InvalidViewport {
                width: spec.viewport.width,
                height: spec.viewport.height,
            });
        }

        let year_scale = LinearScale::new(spec.x_axis.min, spec.x_axis.max)?;
        let value_scale = LinearScale::new(spec.y_axis.min, spec.y_axis.max)?;

        let mut stack_heights: IndexMap<&str, Vec<f64>> = IndexMap::new();
        let mut positions = Vec::with_capacity(spec.datasets.len());
        for dataset in &spec.datasets {
            let heights = stack_heights
                .entry(dataset.stack_group.as_str())
                .or_default();
            if heights.len() < dataset.points.len() {
                heights.resize(dataset.points.len(), 0.0);
            }

            let mut points = Vec::with_capacity(dataset.points.len());
            for (index, point) in dataset.points.iter().enumerate() {
                let stacked = if spec.y_axis.stacked {
                    heights[index] += point.y;
                    heights[index]
                } else {
                    point.y
                };
                points.push(ScreenPoint::new(
                    year_scale.value_to_pixel(point.x, area.left, area.right())?,
                    value_scale.value_to_pixel(stacked, area.bottom(), area.top)?,
                ));
            }
            positions.push(points);
        }

        Ok((area, value_scale, positions))
    }
}

impl<P: Clone + 'static> ChartRenderer for NullRenderer<P> {
    type Pattern = P;

    fn build(&mut self, spec: &ChartSpec) -> ChartResult<()> {
        let (area, value_scale, positions) = Self::layout(spec)?;
        trace!(
            datasets = positions.len(),
            area_width = area.width,
            area_height = area.height,
            "null renderer laid out chart"
        );
        self.spec = Some(spec.clone());
        self.chart_area = Some(area);
        self.value_scale = Some(value_scale);
        self.positions = positions;
        self.build_count += 1;
        Ok(())
    }

    fn destroy(&mut self) {
        self.spec = None;
        self.chart_area = None;
        self.value_scale = None;
        self.positions.clear();
        self.last_post_frame = None;
        self.destroy_count += 1;
    }

    fn is_built(&self) -> bool {
        self.spec.is_some()
    }

    fn animation_complete(&mut self) -> LocalBoxFuture<'static, ()> {
        future::ready(()).boxed_local()
    }

    fn chart_area(&self) -> Option<Rect> {
        self.chart_area
    }

    fn dataset_len(&self, dataset: usize) -> usize {
        self.positions.get(dataset).map_or(0, Vec::len)
    }

    fn point_position(&self, dataset: usize, index: usize) -> Option<ScreenPoint> {
        self.positions.get(dataset)?.get(index).copied()
    }

    fn value_to_pixel_y(&self, value: f64) -> Option<f64> {
        let area = self.chart_area?;
        self.value_scale?
            .value_to_pixel(value, area.bottom(), area.top)
            .ok()
    }

    fn draw_post_frame(&mut self, frame: PostDrawFrame<P>) -> ChartResult<()> {
        frame.validate()?;
        self.last_post_frame = Some(frame);
        Ok(())
    }
}
