use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{
    ConnectorOutcome, ConnectorResolver, PatternCache, PostDrawContext, ProjectionChartConfig,
    ProjectionRequest, ReadinessGap, SimulationEngine, final_point_index, run_post_draw_hooks,
};
use crate::core::{
    AxisScale, StackedLayer, StackedLayers, adapt_series, horizon_ticks, scale_axis, series_maximum,
};
use crate::error::ChartResult;
use crate::overlay::OverlayHost;
use crate::render::{
    AxisSpec, AxisTick, ChartRenderer, ChartSpec, Color, DatasetSpec, DatasetStyle,
    DrawingSurface, PROJECTION_STACK_GROUP, SurfaceSize,
};
use crate::scheduler::{FrameScheduler, frame_then_sleep};

/// Why a render cycle stopped before building a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderAbort {
    /// The surface has no containing element to size against.
    MissingContainer,
    /// The simulation engine produced no points.
    EmptySeries,
    /// The largest total was non-finite or not positive.
    InvalidMaximum { maximum: f64 },
    /// The renderer rejected the chart spec.
    RendererFailed,
}

/// Everything one completed render cycle produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    pub cycle: u64,
    pub surface: SurfaceSize,
    pub scale: AxisScale,
    pub layers: StackedLayers,
    pub pattern_applied: bool,
    pub callouts: usize,
    pub connectors: ConnectorOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderOutcome {
    Rendered(RenderReport),
    Aborted(RenderAbort),
}

impl RenderOutcome {
    #[must_use]
    pub fn report(&self) -> Option<&RenderReport> {
        match self {
            Self::Rendered(report) => Some(report),
            Self::Aborted(_) => None,
        }
    }
}

/// Owns one chart instance with its surface and overlay, and drives full redraws.
///
/// `render` borrows the coordinator mutably for the whole cycle, so cycles of
/// one instance never overlap. Independent coordinators may share a
/// `PatternCache`.
pub struct RenderCoordinator<E, R, S, O>
where
    R: ChartRenderer,
{
    config: ProjectionChartConfig,
    simulation: E,
    renderer: R,
    surface: S,
    overlay: O,
    patterns: PatternCache<R::Pattern>,
    scheduler: Rc<dyn FrameScheduler>,
    resolver: ConnectorResolver,
    palette: (Color, Color, Color),
    cycle: u64,
}

impl<E, R, S, O> RenderCoordinator<E, R, S, O>
where
    E: SimulationEngine,
    R: ChartRenderer,
    S: DrawingSurface,
    O: OverlayHost,
{
    pub fn new(
        config: ProjectionChartConfig,
        simulation: E,
        renderer: R,
        surface: S,
        overlay: O,
        patterns: PatternCache<R::Pattern>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> ChartResult<Self> {
        config.validate()?;
        let palette = config.resolved_palette()?;
        let resolver = ConnectorResolver::new(config.connector.retry, Rc::clone(&scheduler));
        Ok(Self {
            config,
            simulation,
            renderer,
            surface,
            overlay,
            patterns,
            scheduler,
            resolver,
            palette,
            cycle: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ProjectionChartConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// Mutable overlay access for hosts that restructure the layout tree.
    pub fn overlay_mut(&mut self) -> &mut O {
        &mut self.overlay
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternCache<R::Pattern> {
        &self.patterns
    }

    /// Number of render cycles started so far.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    #[must_use]
    pub fn into_parts(self) -> (R, S, O) {
        (self.renderer, self.surface, self.overlay)
    }

    /// Runs one full redraw and resolves once connector geometry is settled
    /// or abandoned.
    ///
    /// Never fails: invalid input aborts the cycle with the previous chart
    /// and callouts already torn down, a missing pattern only drops the fill,
    /// and unready layout only drops the connectors.
    pub async fn render(&mut self, request: ProjectionRequest) -> RenderOutcome {
        self.cycle += 1;
        let cycle = self.cycle;
        debug!(cycle, ?request, "render cycle started");

        self.teardown();

        let Some(container) = self.surface.container_box() else {
            return Self::abort(cycle, RenderAbort::MissingContainer);
        };
        let size = SurfaceSize::for_container(
            container,
            self.surface.device_pixel_ratio(),
            self.config.fallback_size_px,
        );
        self.surface.set_bitmap_size(size.bitmap);
        self.surface.set_display_width(size.css_width);

        let series = self.simulation.yearly_series(&request);
        let Some(maximum) = series_maximum(&series) else {
            return Self::abort(cycle, RenderAbort::EmptySeries);
        };
        let scale = match scale_axis(maximum) {
            Ok(scale) => scale.aligned(),
            Err(err) => {
                debug!(cycle, error = %err, "rejecting series maximum");
                return Self::abort(cycle, RenderAbort::InvalidMaximum { maximum });
            }
        };
        let layers = adapt_series(&series);
        debug!(
            cycle,
            points = layers.len(),
            axis_max = scale.max,
            axis_step = scale.step,
            "series adapted"
        );

        let pattern = self
            .patterns
            .acquire(self.config.pattern.sources.as_slice())
            .await;

        let spec = self.chart_spec(&request, size, scale, &layers);
        if let Err(err) = self.renderer.build(&spec) {
            warn!(cycle, error = %err, "renderer rejected chart spec");
            return Self::abort(cycle, RenderAbort::RendererFailed);
        }

        self.renderer.animation_complete().await;
        frame_then_sleep(self.scheduler.as_ref(), self.config.connector.settle_delay()).await;

        let surface_offset = self
            .overlay
            .container_rect()
            .map(|container| self.surface.bounding_rect().offset_from(container));
        let output = run_post_draw_hooks(
            &self.renderer,
            &PostDrawContext {
                config: &self.config,
                request: &request,
                series: &series,
                scale,
                pattern: pattern.as_ref(),
                axis_label_color: self.palette.2,
                surface_offset,
            },
        );
        let pattern_applied = output.frame.pattern_fill.is_some();
        if let Err(err) = self.renderer.draw_post_frame(output.frame) {
            warn!(cycle, error = %err, "post-draw frame rejected");
        }
        let callouts = output.callouts.len();
        for callout in output.callouts {
            self.overlay.insert_callout(callout);
        }

        let connectors = match final_point_index(&self.renderer, request.horizon_years) {
            Some(index) => {
                self.resolver
                    .resolve(&self.renderer, &self.surface, &mut self.overlay, index)
                    .await
            }
            None => ConnectorOutcome::Abandoned {
                attempts: 0,
                gap: ReadinessGap::Points,
            },
        };

        debug!(
            cycle,
            pattern_applied,
            callouts,
            resolved = connectors.is_resolved(),
            "render cycle finished"
        );
        RenderOutcome::Rendered(RenderReport {
            cycle,
            surface: size,
            scale,
            layers,
            pattern_applied,
            callouts,
            connectors,
        })
    }

    /// Drops the previous chart and every overlay element of the previous cycle.
    fn teardown(&mut self) {
        if self.renderer.is_built() {
            self.renderer.destroy();
        }
        self.overlay.clear();
    }

    fn abort(cycle: u64, reason: RenderAbort) -> RenderOutcome {
        debug!(cycle, ?reason, "render cycle aborted");
        RenderOutcome::Aborted(reason)
    }

    fn chart_spec(
        &self,
        request: &ProjectionRequest,
        size: SurfaceSize,
        scale: AxisScale,
        layers: &StackedLayers,
    ) -> ChartSpec {
        let labels = &self.config.labels;
        let (base_color, selected_color, _) = self.palette;
        let dataset = |label: String, points: &[StackedLayer], style: DatasetStyle| DatasetSpec {
            label,
            points: points.to_vec(),
            style,
            stack_group: PROJECTION_STACK_GROUP.to_owned(),
        };

        let year_ticks = horizon_ticks(request.horizon_years, self.config.year_tick_interval)
            .into_iter()
            .map(|tick| AxisTick {
                value: f64::from(tick.year),
                label: if tick.is_final {
                    labels.final_year_tick(tick.year)
                } else {
                    tick.year.to_string()
                },
            })
            .collect();
        let value_ticks = scale
            .ticks()
            .into_iter()
            .map(|value| AxisTick {
                value,
                label: value.to_string(),
            })
            .collect();

        ChartSpec {
            viewport: size.css_viewport(),
            pixel_ratio: size.pixel_ratio,
            datasets: vec![
                dataset(
                    labels.principal.clone(),
                    &layers.principal,
                    DatasetStyle::transparent(),
                ),
                dataset(
                    labels.growth_label(self.config.reference_rate_percent),
                    &layers.base,
                    DatasetStyle::solid(base_color),
                ),
                dataset(
                    labels.growth_label(request.interest_rate_percent),
                    &layers.selected,
                    DatasetStyle::solid(selected_color),
                ),
            ],
            x_axis: AxisSpec {
                min: 0.0,
                max: f64::from(request.horizon_years),
                stacked: true,
                ticks: year_ticks,
                font_size_px: self.config.tick_font_size_px,
            },
            y_axis: AxisSpec {
                min: 0.0,
                max: scale.max,
                stacked: true,
                ticks: value_ticks,
                font_size_px: self.config.tick_font_size_px,
            },
            padding: self.config.layout_padding,
            animation: self.config.animation,
            show_legend: false,
            show_tooltips: false,
        }
    }
}
