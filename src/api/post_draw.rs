//! Fixed, ordered drawing passes run once the renderer's layout has settled.

use tracing::trace;

use crate::api::{ProjectionChartConfig, ProjectionRequest};
use crate::core::{AxisScale, ScreenPoint, YearlyPoint, final_year_index};
use crate::overlay::{TrackedSeries, ValueCallout, format_amount};
use crate::render::{
    ChartRenderer, Color, PatternFill, PostDrawFrame, TextHAlign, TextPrimitive,
};

/// Dataset painted with the decorative fill.
const PRINCIPAL_DATASET: usize = 0;
const AXIS_UNIT_FONT_PX: f64 = 12.0;
const AXIS_UNIT_GAP_X_PX: f64 = 10.0;
const AXIS_UNIT_GAP_Y_PX: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostDrawHook {
    /// Fills the principal band with the cached pattern.
    PatternFill,
    /// Unit caption above the top value tick.
    AxisUnitLabel,
    /// Base/selected value callouts in the overlay.
    ValueCallouts,
}

/// Hooks in execution order.
pub const POST_DRAW_HOOKS: [PostDrawHook; 3] = [
    PostDrawHook::PatternFill,
    PostDrawHook::AxisUnitLabel,
    PostDrawHook::ValueCallouts,
];

/// Read-only inputs shared by every hook.
pub struct PostDrawContext<'a, P> {
    pub config: &'a ProjectionChartConfig,
    pub request: &'a ProjectionRequest,
    pub series: &'a [YearlyPoint],
    pub scale: AxisScale,
    pub pattern: Option<&'a P>,
    pub axis_label_color: Color,
    /// Surface offset relative to the overlay container; `None` without a container.
    pub surface_offset: Option<(f64, f64)>,
}

/// What the hooks produced: canvas drawing plus overlay callouts.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDrawOutput<P> {
    pub frame: PostDrawFrame<P>,
    pub callouts: Vec<ValueCallout>,
}

/// Index of the tracked point: the horizon year, clamped to what the renderer laid out.
#[must_use]
pub fn final_point_index<R: ChartRenderer + ?Sized>(
    renderer: &R,
    horizon_years: u32,
) -> Option<usize> {
    let base_len = renderer.dataset_len(TrackedSeries::Base.dataset_index());
    let selected_len = renderer.dataset_len(TrackedSeries::Selected.dataset_index());
    let last = base_len.min(selected_len).checked_sub(1)?;
    Some(last.min(horizon_years as usize))
}

pub fn run_post_draw_hooks<R: ChartRenderer + ?Sized>(
    renderer: &R,
    ctx: &PostDrawContext<'_, R::Pattern>,
) -> PostDrawOutput<R::Pattern> {
    let mut output = PostDrawOutput {
        frame: PostDrawFrame::default(),
        callouts: Vec::new(),
    };

    for hook in POST_DRAW_HOOKS {
        match hook {
            PostDrawHook::PatternFill => {
                if let Some(fill) = pattern_fill(renderer, ctx) {
                    output.frame = output.frame.with_pattern_fill(fill);
                }
            }
            PostDrawHook::AxisUnitLabel => {
                if let Some(label) = axis_unit_label(renderer, ctx) {
                    output.frame = output.frame.with_text(label);
                }
            }
            PostDrawHook::ValueCallouts => {
                output.callouts = value_callouts(renderer, ctx);
            }
        }
        trace!(?hook, "post-draw hook ran");
    }

    output
}

fn pattern_fill<R: ChartRenderer + ?Sized>(
    renderer: &R,
    ctx: &PostDrawContext<'_, R::Pattern>,
) -> Option<PatternFill<R::Pattern>> {
    let pattern = ctx.pattern?;
    let area = renderer.chart_area()?;
    let count = renderer.dataset_len(PRINCIPAL_DATASET);
    if count == 0 {
        return None;
    }

    let points = (0..count)
        .map(|index| renderer.point_position(PRINCIPAL_DATASET, index))
        .collect::<Option<Vec<_>>>()?;
    let first = points.first()?;
    let last = points.last()?;

    let mut polygon = Vec::with_capacity(points.len() + 2);
    polygon.push(ScreenPoint::new(first.x, area.bottom()));
    polygon.extend(points.iter().copied());
    polygon.push(ScreenPoint::new(last.x, area.bottom()));

    Some(PatternFill {
        pattern: pattern.clone(),
        polygon,
    })
}

fn axis_unit_label<R: ChartRenderer + ?Sized>(
    renderer: &R,
    ctx: &PostDrawContext<'_, R::Pattern>,
) -> Option<TextPrimitive> {
    let area = renderer.chart_area()?;
    let top_tick_y = renderer.value_to_pixel_y(ctx.scale.max)?;
    Some(TextPrimitive::new(
        ctx.config.labels.axis_unit.clone(),
        area.left - AXIS_UNIT_GAP_X_PX,
        top_tick_y - AXIS_UNIT_GAP_Y_PX,
        AXIS_UNIT_FONT_PX,
        ctx.axis_label_color,
        TextHAlign::Right,
    ))
}

fn value_callouts<R: ChartRenderer + ?Sized>(
    renderer: &R,
    ctx: &PostDrawContext<'_, R::Pattern>,
) -> Vec<ValueCallout> {
    let Some((offset_x, _)) = ctx.surface_offset else {
        return Vec::new();
    };
    let Some(area) = renderer.chart_area() else {
        return Vec::new();
    };
    let horizon = ctx.request.horizon_years;
    let Some(index) = final_point_index(renderer, horizon) else {
        return Vec::new();
    };
    let tracked_points_ready = TrackedSeries::ALL.iter().all(|series| {
        renderer
            .point_position(series.dataset_index(), index)
            .is_some_and(ScreenPoint::is_finite)
    });
    if !tracked_points_ready || !offset_x.is_finite() {
        return Vec::new();
    }
    let Some(final_point) = final_year_index(ctx.series, horizon).map(|i| ctx.series[i]) else {
        trace!(horizon, "no series point for horizon year, skipping callouts");
        return Vec::new();
    };

    let labels = &ctx.config.labels;
    let layout = ctx.config.callout_layout;
    let base_x = offset_x + area.left + layout.margin_px;

    vec![
        ValueCallout {
            series: TrackedSeries::Base,
            description: labels.callout_description(ctx.config.reference_rate_percent),
            amount_text: format_amount(final_point.base_total),
            unit: labels.currency_unit.clone(),
            label_x_px: base_x,
            label_y_percent: layout.base_y_percent,
        },
        ValueCallout {
            series: TrackedSeries::Selected,
            description: labels.callout_description(ctx.request.interest_rate_percent),
            amount_text: format_amount(final_point.selected_total),
            unit: labels.currency_unit.clone(),
            label_x_px: base_x * layout.selected_x_factor,
            label_y_percent: layout.selected_y_percent,
        },
    ]
}
