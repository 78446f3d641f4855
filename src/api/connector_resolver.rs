use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ConnectorGeometry, ConnectorMeasurement};
use crate::overlay::{OverlayHost, TrackedSeries};
use crate::render::{ChartRenderer, DrawingSurface};
use crate::scheduler::{FrameScheduler, RetryPolicy, RetryStep, frame_then_sleep};

/// First externally owned artifact found missing by a readiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessGap {
    /// The overlay container is gone; a newer render cycle replaced it.
    Container,
    /// A callout's amount element is not laid out yet.
    Anchors,
    /// The renderer has not published its chart area.
    ChartArea,
    /// The renderer cannot place the tracked point yet.
    Points,
}

/// Result of one readiness check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Readiness {
    Ready([(TrackedSeries, ConnectorMeasurement); 2]),
    NotReady(ReadinessGap),
}

/// How connector resolution for one render cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConnectorOutcome {
    /// Everything was measurable. Each series carries its geometry, or
    /// `None` when its measurement was degenerate and nothing was applied.
    Resolved {
        attempts: u32,
        base: Option<ConnectorGeometry>,
        selected: Option<ConnectorGeometry>,
    },
    /// The attempt budget ran out; no connector was drawn.
    Abandoned { attempts: u32, gap: ReadinessGap },
}

impl ConnectorOutcome {
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match *self {
            Self::Resolved { attempts, .. } | Self::Abandoned { attempts, .. } => attempts,
        }
    }

    #[must_use]
    pub fn geometry(&self, series: TrackedSeries) -> Option<ConnectorGeometry> {
        match (*self, series) {
            (Self::Resolved { base, .. }, TrackedSeries::Base) => base,
            (Self::Resolved { selected, .. }, TrackedSeries::Selected) => selected,
            (Self::Abandoned { .. }, _) => None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Polls for callout anchors and renderer layout after the entrance
/// animation, then publishes connector geometry for both tracked series.
pub struct ConnectorResolver {
    policy: RetryPolicy,
    scheduler: Rc<dyn FrameScheduler>,
}

impl ConnectorResolver {
    pub fn new(policy: RetryPolicy, scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self { policy, scheduler }
    }

    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Reads every layout input once, without waiting.
    pub fn check_readiness<R, S, O>(
        renderer: &R,
        surface: &S,
        overlay: &O,
        point_index: usize,
    ) -> Readiness
    where
        R: ChartRenderer + ?Sized,
        S: DrawingSurface + ?Sized,
        O: OverlayHost + ?Sized,
    {
        let Some(container) = overlay.container_rect() else {
            return Readiness::NotReady(ReadinessGap::Container);
        };
        let (Some(base_anchor), Some(selected_anchor)) = (
            overlay.anchor_rect(TrackedSeries::Base),
            overlay.anchor_rect(TrackedSeries::Selected),
        ) else {
            return Readiness::NotReady(ReadinessGap::Anchors);
        };
        if renderer.chart_area().is_none() {
            return Readiness::NotReady(ReadinessGap::ChartArea);
        }
        let (Some(base_point), Some(selected_point)) = (
            renderer.point_position(TrackedSeries::Base.dataset_index(), point_index),
            renderer.point_position(TrackedSeries::Selected.dataset_index(), point_index),
        ) else {
            return Readiness::NotReady(ReadinessGap::Points);
        };

        let surface_rect = surface.bounding_rect();
        let measure = |anchor, point| ConnectorMeasurement {
            anchor,
            container,
            surface: surface_rect,
            point,
        };
        Readiness::Ready([
            (TrackedSeries::Base, measure(base_anchor, base_point)),
            (TrackedSeries::Selected, measure(selected_anchor, selected_point)),
        ])
    }

    /// Runs the bounded polling loop and applies whatever geometry is valid.
    ///
    /// Every attempt, the first included, waits one frame plus the policy
    /// delay. A missing container ends the loop at once, as if the budget
    /// were spent.
    pub async fn resolve<R, S, O>(
        &self,
        renderer: &R,
        surface: &S,
        overlay: &mut O,
        point_index: usize,
    ) -> ConnectorOutcome
    where
        R: ChartRenderer + ?Sized,
        S: DrawingSurface + ?Sized,
        O: OverlayHost + ?Sized,
    {
        let mut retry = self.policy.start();
        let mut checks = 0;
        let mut gap = ReadinessGap::Anchors;

        loop {
            let attempt = match retry.next_step() {
                RetryStep::Attempt { attempt } => attempt,
                RetryStep::Exhausted { .. } => {
                    debug!(attempts = checks, ?gap, "connector resolution abandoned");
                    return ConnectorOutcome::Abandoned {
                        attempts: checks,
                        gap,
                    };
                }
            };

            frame_then_sleep(self.scheduler.as_ref(), self.policy.delay()).await;
            checks += 1;

            match Self::check_readiness(renderer, surface, &*overlay, point_index) {
                Readiness::Ready(measurements) => {
                    return Self::apply(overlay, measurements, checks);
                }
                Readiness::NotReady(missing) => {
                    trace!(attempt, ?missing, "connector layout not ready");
                    gap = missing;
                    if missing == ReadinessGap::Container {
                        retry.deplete();
                    }
                }
            }
        }
    }

    fn apply<O: OverlayHost + ?Sized>(
        overlay: &mut O,
        measurements: [(TrackedSeries, ConnectorMeasurement); 2],
        attempts: u32,
    ) -> ConnectorOutcome {
        let mut base = None;
        let mut selected = None;

        for (series, measurement) in measurements {
            let Some(geometry) = measurement.geometry() else {
                debug!(?series, ?measurement, "rejected degenerate connector geometry");
                continue;
            };
            for (name, value) in geometry.style_vars() {
                overlay.set_style_var(series, name, value);
            }
            match series {
                TrackedSeries::Base => base = Some(geometry),
                TrackedSeries::Selected => selected = Some(geometry),
            }
        }

        debug!(
            attempts,
            base_applied = base.is_some(),
            selected_applied = selected.is_some(),
            "connector geometry resolved"
        );
        ConnectorOutcome::Resolved {
            attempts,
            base,
            selected,
        }
    }
}
