use indexmap::IndexMap;

use crate::core::Rect;
use crate::overlay::{OverlayHost, TrackedSeries, ValueCallout};

/// Line box height of the callout description.
const DESCRIPTION_LINE_PX: f64 = 20.0;
/// Line box height of the amount element.
const AMOUNT_LINE_PX: f64 = 24.0;
/// Advance used to estimate the amount element's width.
const AMOUNT_GLYPH_ADVANCE_PX: f64 = 9.0;

/// Overlay host that keeps callouts in memory and lays them out with a
/// fixed-advance text model.
///
/// Used by tests and headless rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingOverlay {
    pub container: Option<Rect>,
    pub callouts: Vec<ValueCallout>,
    pub style_vars: IndexMap<TrackedSeries, IndexMap<&'static str, String>>,
    pub clear_count: usize,
}

impl RecordingOverlay {
    #[must_use]
    pub fn new(container: Rect) -> Self {
        Self {
            container: Some(container),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn callout(&self, series: TrackedSeries) -> Option<&ValueCallout> {
        self.callouts.iter().find(|callout| callout.series == series)
    }

    #[must_use]
    pub fn style_var(&self, series: TrackedSeries, name: &str) -> Option<&str> {
        self.style_vars.get(&series)?.get(name).map(String::as_str)
    }
}

impl OverlayHost for RecordingOverlay {
    fn container_rect(&self) -> Option<Rect> {
        self.container
    }

    fn clear(&mut self) {
        self.callouts.clear();
        self.style_vars.clear();
        self.clear_count += 1;
    }

    fn insert_callout(&mut self, callout: ValueCallout) {
        let series = callout.series;
        self.callouts.retain(|existing| existing.series != series);
        let vars = self.style_vars.entry(series).or_default();
        for (name, value) in callout.style_vars() {
            vars.insert(name, value);
        }
        self.callouts.push(callout);
    }

    fn anchor_rect(&self, series: TrackedSeries) -> Option<Rect> {
        let container = self.container?;
        let callout = self.callout(series)?;
        let glyphs = callout.amount_text.chars().count() + callout.unit.chars().count();
        let top = container.top
            + container.height * callout.label_y_percent / 100.0
            + DESCRIPTION_LINE_PX;
        Some(Rect::new(
            container.left + callout.label_x_px,
            top,
            glyphs as f64 * AMOUNT_GLYPH_ADVANCE_PX,
            AMOUNT_LINE_PX,
        ))
    }

    fn set_style_var(&mut self, series: TrackedSeries, name: &'static str, value: String) {
        self.style_vars
            .entry(series)
            .or_default()
            .insert(name, value);
    }
}
