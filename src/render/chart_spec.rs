use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{StackedLayer, Viewport};
use crate::render::{AnimationSpec, Color};

/// Stack group shared by every projection dataset.
pub const PROJECTION_STACK_GROUP: &str = "projection";

/// How a dataset's area is painted by the renderer itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AreaFill {
    /// Left unpainted; a post-draw hook fills it instead.
    Transparent,
    Solid(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStyle {
    pub fill: AreaFill,
    pub border: Color,
    /// Bezier smoothing factor of the area outline.
    pub tension: f64,
    /// Point markers are hidden at 0.
    pub point_radius: f64,
}

impl DatasetStyle {
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self {
            fill: AreaFill::Solid(color),
            border: color,
            tension: 0.4,
            point_radius: 0.0,
        }
    }

    #[must_use]
    pub fn transparent() -> Self {
        Self {
            fill: AreaFill::Transparent,
            border: Color::TRANSPARENT,
            tension: 0.4,
            point_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub label: String,
    pub points: Vec<StackedLayer>,
    pub style: DatasetStyle,
    pub stack_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

/// Linear axis with an explicit, renderer-authoritative tick list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub stacked: bool,
    pub ticks: SmallVec<[AxisTick; 16]>,
    pub font_size_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutPadding {
    pub left: f64,
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
}

/// Everything the renderer needs to (re)build the projection chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// CSS box of the drawing surface.
    pub viewport: Viewport,
    pub pixel_ratio: f64,
    /// Bottom to top: principal, base growth, selected growth.
    pub datasets: Vec<DatasetSpec>,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub padding: LayoutPadding,
    pub animation: AnimationSpec,
    pub show_legend: bool,
    pub show_tooltips: bool,
}

impl ChartSpec {
    #[must_use]
    pub fn dataset(&self, index: usize) -> Option<&DatasetSpec> {
        self.datasets.get(index)
    }
}
