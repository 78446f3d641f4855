use projection_chart::telemetry::{init_default_tracing, init_tracing_with_filter};

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_setup_is_a_no_op_without_the_feature() {
    assert!(!init_default_tracing());
    assert!(!init_tracing_with_filter("projection_chart=trace"));
}

#[cfg(feature = "telemetry")]
#[test]
fn tracing_installs_once_per_process() {
    assert!(!init_tracing_with_filter("projection_chart=notalevel"));
    assert!(init_tracing_with_filter("projection_chart=trace"));
    assert!(!init_default_tracing());
}
