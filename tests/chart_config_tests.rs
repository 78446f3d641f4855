use std::time::Duration;

use projection_chart::api::{DEFAULT_PATTERN_SOURCES, MAX_CONNECTOR_RETRIES};
use projection_chart::render::{AnimationOrigin, Color, Easing};
use projection_chart::scheduler::RetryPolicy;
use projection_chart::{ChartError, ProjectionChartConfig};

#[test]
fn defaults_match_the_projection_chart_tuning() {
    let config = ProjectionChartConfig::default();

    assert_eq!(config.reference_rate_percent, 2);
    assert_eq!(config.pattern.sources, DEFAULT_PATTERN_SOURCES.to_vec());
    assert_eq!(config.pattern.timeout(), Duration::from_millis(3_000));
    assert_eq!(config.connector.retry, RetryPolicy::new(10, 50));
    assert_eq!(config.connector.settle_delay(), Duration::from_millis(100));
    assert_eq!(config.fallback_size_px, (535.0, 390.0));
    assert_eq!(config.year_tick_interval, 5);
    assert_eq!(config.layout_padding.left, 5.0);
    assert_eq!(config.layout_padding.top, 30.0);

    assert_eq!(config.animation.chart_duration_ms, 0);
    assert_eq!(config.animation.x.easing, Easing::Linear);
    assert_eq!(config.animation.y.easing, Easing::EaseOutQuart);
    assert_eq!(config.animation.y.origin, AnimationOrigin::ValueAxisZero);

    assert_eq!(config.labels.growth_label(7), "利率7%で増えたお金");
    assert_eq!(config.labels.final_year_tick(30), "30年");
    assert!(config.validate().is_ok());
}

#[test]
fn palette_resolves_to_colors() {
    let (base, selected, axis) = ProjectionChartConfig::default()
        .resolved_palette()
        .expect("palette");
    let channel = |value: u8| f64::from(value) / 255.0;
    assert_eq!(base, Color::rgb(channel(0xD5), channel(0xEF), 1.0));
    assert_eq!(selected, Color::rgb(channel(0x44), channel(0xAD), channel(0x9D)));
    assert_eq!(axis, Color::rgb(channel(0x66), channel(0x66), channel(0x66)));
}

#[test]
fn partial_json_takes_defaults_for_missing_fields() {
    let config = ProjectionChartConfig::from_json_str(
        r#"{
            "reference_rate_percent": 3,
            "pattern": { "timeout_ms": 500 },
            "connector": { "retry": { "max_retries": 4, "delay_ms": 20 } }
        }"#,
    )
    .expect("config");

    assert_eq!(config.reference_rate_percent, 3);
    assert_eq!(config.pattern.timeout_ms, 500);
    assert_eq!(config.pattern.sources.len(), 3);
    assert_eq!(config.connector.retry, RetryPolicy::new(4, 20));
    assert_eq!(config.connector.settle_delay_ms, 100);
    assert_eq!(config.labels, ProjectionChartConfig::default().labels);
}

#[test]
fn json_round_trip_keeps_customizations() {
    let config = ProjectionChartConfig::default()
        .with_pattern_sources(["assets/fill.png"])
        .with_connector_retry(RetryPolicy::new(3, 10));
    let json = config.to_json_pretty().expect("serialize");
    let restored = ProjectionChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn invalid_palette_color_is_rejected() {
    let err = ProjectionChartConfig::from_json_str(r#"{ "palette": { "base_fill": "blue" } }"#)
        .expect_err("invalid color");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn zero_timeout_and_zero_tick_interval_are_rejected() {
    let mut config = ProjectionChartConfig::default();
    config.pattern.timeout_ms = 0;
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));

    let mut config = ProjectionChartConfig::default();
    config.year_tick_interval = 0;
    assert!(matches!(config.validate(), Err(ChartError::InvalidConfig(_))));
}

#[test]
fn malformed_json_is_reported() {
    let err = ProjectionChartConfig::from_json_str("{ not json").expect_err("parse error");
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn retry_budget_beyond_the_cap_is_rejected() {
    let json = r#"{ "connector": { "retry": { "max_retries": 4294967295, "delay_ms": 50 } } }"#;
    let err = ProjectionChartConfig::from_json_str(json).expect_err("unbounded retries");
    assert!(matches!(err, ChartError::InvalidConfig(_)));

    let config = ProjectionChartConfig::default()
        .with_connector_retry(RetryPolicy::new(MAX_CONNECTOR_RETRIES, 50));
    assert!(config.validate().is_ok());
}
