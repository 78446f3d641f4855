#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use projection_chart::ChartError;
use projection_chart::api::{
    PatternCache, PatternLoader, ProjectionChartConfig, ProjectionRequest, RenderCoordinator,
};
use projection_chart::core::{Rect, YearlyPoint};
use projection_chart::overlay::RecordingOverlay;
use projection_chart::render::{HeadlessSurface, NullRenderer};
use projection_chart::scheduler::{FrameScheduler, ImmediateScheduler};

pub const REFERENCE_RATE_PERCENT: u32 = 2;

/// Monthly-compounded savings series, standing in for the simulation engine.
pub fn compound_series(request: &ProjectionRequest) -> Vec<YearlyPoint> {
    let future_value = |rate_percent: u32, months: u32| {
        let monthly_rate = f64::from(rate_percent) / 100.0 / 12.0;
        if monthly_rate == 0.0 {
            return request.monthly_amount * f64::from(months);
        }
        request.monthly_amount * ((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate
    };

    (0..=request.horizon_years)
        .map(|year| {
            let months = year * 12;
            YearlyPoint::new(
                year,
                request.monthly_amount * f64::from(months),
                future_value(REFERENCE_RATE_PERCENT, months).round(),
                future_value(request.interest_rate_percent, months).round(),
            )
        })
        .collect()
}

pub fn container() -> Rect {
    Rect::new(0.0, 0.0, 535.0, 390.0)
}

/// Loader that resolves immediately, failing for locations in `missing`.
pub struct ReadyLoader {
    pub calls: Cell<u32>,
    pub missing: Vec<String>,
}

impl ReadyLoader {
    pub fn new() -> Self {
        Self {
            calls: Cell::new(0),
            missing: Vec::new(),
        }
    }

    pub fn missing(locations: &[&str]) -> Self {
        Self {
            calls: Cell::new(0),
            missing: locations.iter().map(|l| (*l).to_owned()).collect(),
        }
    }
}

impl PatternLoader for ReadyLoader {
    type Pattern = String;

    fn load(&self, location: &str) -> LocalBoxFuture<'static, Result<String, ChartError>> {
        self.calls.set(self.calls.get() + 1);
        let result = if self.missing.iter().any(|m| m == location) {
            Err(ChartError::PatternLoad {
                location: location.to_owned(),
                reason: "not found".to_owned(),
            })
        } else {
            Ok(format!("pattern:{location}"))
        };
        future::ready(result).boxed_local()
    }
}

/// Loader that takes `delay` of tokio time, failing for locations in `missing`.
pub struct SlowLoader {
    pub calls: Cell<u32>,
    pub delay: Duration,
    pub missing: Vec<String>,
}

impl SlowLoader {
    pub fn new(delay: Duration) -> Self {
        Self {
            calls: Cell::new(0),
            delay,
            missing: Vec::new(),
        }
    }
}

impl PatternLoader for SlowLoader {
    type Pattern = String;

    fn load(&self, location: &str) -> LocalBoxFuture<'static, Result<String, ChartError>> {
        self.calls.set(self.calls.get() + 1);
        let delay = self.delay;
        let fails = self.missing.iter().any(|m| m == location);
        let location = location.to_owned();
        async move {
            tokio::time::sleep(delay).await;
            if fails {
                Err(ChartError::PatternLoad {
                    location,
                    reason: "decode error".to_owned(),
                })
            } else {
                Ok(format!("pattern:{location}"))
            }
        }
        .boxed_local()
    }
}

/// Loader whose loads never complete.
pub struct HangingLoader {
    pub calls: Cell<u32>,
}

impl PatternLoader for HangingLoader {
    type Pattern = String;

    fn load(&self, _location: &str) -> LocalBoxFuture<'static, Result<String, ChartError>> {
        self.calls.set(self.calls.get() + 1);
        future::pending().boxed_local()
    }
}

pub type HeadlessCoordinator<O> = RenderCoordinator<
    fn(&ProjectionRequest) -> Vec<YearlyPoint>,
    NullRenderer<String>,
    HeadlessSurface,
    O,
>;

pub struct Harness<O, L = ReadyLoader> {
    pub coordinator: HeadlessCoordinator<O>,
    pub scheduler: ImmediateScheduler,
    pub loader: Rc<L>,
}

pub fn harness_with_overlay<O, L>(loader: L, overlay: O) -> Harness<O, L>
where
    O: projection_chart::overlay::OverlayHost,
    L: PatternLoader<Pattern = String> + 'static,
{
    let config = ProjectionChartConfig::default();
    let scheduler = ImmediateScheduler::new();
    let shared_scheduler: Rc<dyn FrameScheduler> = Rc::new(scheduler.clone());
    let loader = Rc::new(loader);
    let patterns = PatternCache::new(
        Rc::clone(&loader) as Rc<dyn PatternLoader<Pattern = String>>,
        config.pattern.timeout(),
    );
    let coordinator = RenderCoordinator::new(
        config,
        compound_series as fn(&ProjectionRequest) -> Vec<YearlyPoint>,
        NullRenderer::default(),
        HeadlessSurface::new(container(), 2.0),
        overlay,
        patterns,
        shared_scheduler,
    )
    .expect("coordinator");

    Harness {
        coordinator,
        scheduler,
        loader,
    }
}

pub fn harness() -> Harness<RecordingOverlay> {
    harness_with_overlay(ReadyLoader::new(), RecordingOverlay::new(container()))
}
