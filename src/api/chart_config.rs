use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{AnimationSpec, Color, LayoutPadding};
use crate::scheduler::RetryPolicy;

/// Candidate locations of the principal-band fill image, covering
/// relative and absolute resolution.
pub const DEFAULT_PATTERN_SOURCES: [&str; 3] = [
    "images/border-bg.webp",
    "./images/border-bg.webp",
    "/images/border-bg.webp",
];

/// Decorative fill loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub sources: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_PATTERN_SOURCES
                .iter()
                .map(|source| (*source).to_owned())
                .collect(),
            timeout_ms: 3_000,
        }
    }
}

impl PatternConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Upper bound accepted for `ConnectorConfig::retry.max_retries`.
pub const MAX_CONNECTOR_RETRIES: u32 = 1_000;

/// Connector resolution timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    pub retry: RetryPolicy,
    /// Extra wait after the animation-complete signal, following one frame.
    pub settle_delay_ms: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::new(10, 50),
            settle_delay_ms: 100,
        }
    }
}

impl ConnectorConfig {
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Colors as `#RRGGBB[AA]` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPalette {
    pub base_fill: String,
    pub selected_fill: String,
    pub axis_unit_label: String,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            base_fill: "#D5EFFF".to_owned(),
            selected_fill: "#44AD9D".to_owned(),
            axis_unit_label: "#666666".to_owned(),
        }
    }
}

/// User-facing strings. `{rate}` is replaced with the rate in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLabels {
    pub principal: String,
    pub growth_template: String,
    pub callout_template: String,
    pub axis_unit: String,
    pub year_suffix: String,
    pub currency_unit: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            principal: "元本".to_owned(),
            growth_template: "利率{rate}%で増えたお金".to_owned(),
            callout_template: "利率{rate}%で貯まるお金".to_owned(),
            axis_unit: "(万円)".to_owned(),
            year_suffix: "年".to_owned(),
            currency_unit: "円".to_owned(),
        }
    }
}

impl ChartLabels {
    #[must_use]
    pub fn growth_label(&self, rate_percent: u32) -> String {
        self.growth_template
            .replace("{rate}", &rate_percent.to_string())
    }

    #[must_use]
    pub fn callout_description(&self, rate_percent: u32) -> String {
        self.callout_template
            .replace("{rate}", &rate_percent.to_string())
    }

    #[must_use]
    pub fn final_year_tick(&self, year: u32) -> String {
        format!("{year}{}", self.year_suffix)
    }
}

/// Callout placement relative to the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalloutLayout {
    /// Gap between the plot's left edge and the base callout.
    pub margin_px: f64,
    pub base_y_percent: f64,
    pub selected_y_percent: f64,
    /// Selected callout x as a multiple of the base callout x.
    pub selected_x_factor: f64,
}

impl Default for CalloutLayout {
    fn default() -> Self {
        Self {
            margin_px: 10.0,
            base_y_percent: 35.0,
            selected_y_percent: 10.0,
            selected_x_factor: 1.5,
        }
    }
}

/// Configuration of one projection chart instance.
///
/// Serializable so hosts can ship chart tuning as JSON next to their assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionChartConfig {
    /// Fixed rate the simulation engine uses for the base total.
    #[serde(default = "default_reference_rate_percent")]
    pub reference_rate_percent: u32,
    #[serde(default)]
    pub pattern: PatternConfig,
    #[serde(default)]
    pub connector: ConnectorConfig,
    /// Surface size used when the container box has collapsed.
    #[serde(default = "default_fallback_size_px")]
    pub fallback_size_px: (f64, f64),
    #[serde(default = "default_year_tick_interval")]
    pub year_tick_interval: u32,
    #[serde(default = "default_tick_font_size_px")]
    pub tick_font_size_px: f64,
    #[serde(default = "default_layout_padding")]
    pub layout_padding: LayoutPadding,
    #[serde(default)]
    pub animation: AnimationSpec,
    #[serde(default)]
    pub palette: ChartPalette,
    #[serde(default)]
    pub labels: ChartLabels,
    #[serde(default)]
    pub callout_layout: CalloutLayout,
}

impl Default for ProjectionChartConfig {
    fn default() -> Self {
        Self {
            reference_rate_percent: default_reference_rate_percent(),
            pattern: PatternConfig::default(),
            connector: ConnectorConfig::default(),
            fallback_size_px: default_fallback_size_px(),
            year_tick_interval: default_year_tick_interval(),
            tick_font_size_px: default_tick_font_size_px(),
            layout_padding: default_layout_padding(),
            animation: AnimationSpec::default(),
            palette: ChartPalette::default(),
            labels: ChartLabels::default(),
            callout_layout: CalloutLayout::default(),
        }
    }
}

impl ProjectionChartConfig {
    /// Replaces the pattern candidate list.
    #[must_use]
    pub fn with_pattern_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pattern.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_connector_retry(mut self, retry: RetryPolicy) -> Self {
        self.connector.retry = retry;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = animation;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.pattern.timeout_ms == 0 {
            return Err(ChartError::InvalidConfig(
                "pattern timeout must be > 0".to_owned(),
            ));
        }
        if self.connector.retry.max_retries > MAX_CONNECTOR_RETRIES {
            return Err(ChartError::InvalidConfig(format!(
                "connector retries must be <= {MAX_CONNECTOR_RETRIES}, got {}",
                self.connector.retry.max_retries
            )));
        }
        if self.year_tick_interval == 0 {
            return Err(ChartError::InvalidConfig(
                "year tick interval must be > 0".to_owned(),
            ));
        }
        let (width, height) = self.fallback_size_px;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "fallback surface size must be finite and > 0".to_owned(),
            ));
        }
        if !self.tick_font_size_px.is_finite() || self.tick_font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "tick font size must be finite and > 0".to_owned(),
            ));
        }
        let layout = self.callout_layout;
        if ![
            layout.margin_px,
            layout.base_y_percent,
            layout.selected_y_percent,
            layout.selected_x_factor,
        ]
        .iter()
        .all(|value| value.is_finite())
        {
            return Err(ChartError::InvalidConfig(
                "callout layout values must be finite".to_owned(),
            ));
        }
        self.resolved_palette().map(|_| ())
    }

    /// Parsed palette colors: base fill, selected fill, axis unit label.
    pub fn resolved_palette(&self) -> ChartResult<(Color, Color, Color)> {
        let parse = |value: &str| {
            Color::from_hex(value).map_err(|e| ChartError::InvalidConfig(e.to_string()))
        };
        Ok((
            parse(&self.palette.base_fill)?,
            parse(&self.palette.selected_fill)?,
            parse(&self.palette.axis_unit_label)?,
        ))
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON. Missing fields take defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_reference_rate_percent() -> u32 {
    2
}

fn default_fallback_size_px() -> (f64, f64) {
    (535.0, 390.0)
}

fn default_year_tick_interval() -> u32 {
    5
}

fn default_tick_font_size_px() -> f64 {
    10.0
}

fn default_layout_padding() -> LayoutPadding {
    LayoutPadding {
        left: 5.0,
        top: 30.0,
        right: 0.0,
        bottom: 0.0,
    }
}
