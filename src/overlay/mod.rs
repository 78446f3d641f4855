//! Overlay host seam: the layout tree holding value callouts above the chart.

mod format;
mod recording;

pub use format::{format_amount, group_thousands};
pub use recording::RecordingOverlay;

use serde::{Deserialize, Serialize};

use crate::core::Rect;

/// Series that get a callout and a connector line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedSeries {
    /// Total at the fixed reference rate.
    Base,
    /// Total at the user-selected rate.
    Selected,
}

impl TrackedSeries {
    pub const ALL: [Self; 2] = [Self::Base, Self::Selected];

    /// Index of the dataset whose stacked top is this series' total.
    #[must_use]
    pub fn dataset_index(self) -> usize {
        match self {
            Self::Base => 1,
            Self::Selected => 2,
        }
    }
}

/// One value callout: a description line above a formatted amount.
///
/// The amount element's box is the connector anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCallout {
    pub series: TrackedSeries,
    pub description: String,
    pub amount_text: String,
    pub unit: String,
    /// `--label-x`, relative to the overlay container.
    pub label_x_px: f64,
    /// `--label-y`, as a percentage of the container height.
    pub label_y_percent: f64,
}

impl ValueCallout {
    pub const LABEL_X_VAR: &'static str = "--label-x";
    pub const LABEL_Y_VAR: &'static str = "--label-y";

    #[must_use]
    pub fn style_vars(&self) -> [(&'static str, String); 2] {
        [
            (Self::LABEL_X_VAR, format!("{}px", self.label_x_px)),
            (Self::LABEL_Y_VAR, format!("{}%", self.label_y_percent)),
        ]
    }
}

/// Host-side layout tree the callouts live in.
pub trait OverlayHost {
    /// Bounding rect of the overlay container; `None` once it is gone.
    fn container_rect(&self) -> Option<Rect>;

    /// Removes every callout and connector of the previous cycle, including
    /// any style variables applied to them.
    fn clear(&mut self);

    fn insert_callout(&mut self, callout: ValueCallout);

    /// Laid-out box of the callout's amount element, if it exists yet.
    fn anchor_rect(&self, series: TrackedSeries) -> Option<Rect>;

    fn set_style_var(&mut self, series: TrackedSeries, name: &'static str, value: String);
}
