use projection_chart::core::{AxisScale, horizon_ticks, scale_axis};

#[test]
fn twelve_million_scales_to_fourteen_hundred_in_steps_of_two_hundred() {
    let scale = scale_axis(12_000_000.0).expect("scale");
    assert_eq!(scale, AxisScale { max: 1_400.0, step: 200.0 });
}

#[test]
fn step_follows_the_tier_of_the_margined_value() {
    let cases = [
        (500_000.0, 60.0, 20.0),
        (3_000_000.0, 400.0, 100.0),
        (8_000_000.0, 900.0, 100.0),
        (30_000_000.0, 3_500.0, 500.0),
        (60_000_000.0, 7_000.0, 1_000.0),
    ];
    for (value, max, step) in cases {
        let scale = scale_axis(value).expect("scale");
        assert_eq!(scale.step, step, "step for {value}");
        assert_eq!(scale.max, max, "max for {value}");
    }
}

#[test]
fn tier_bound_is_checked_after_headroom() {
    // 95 display units sit in the first tier, but 104.5 with headroom does not.
    let scale = scale_axis(950_000.0).expect("scale");
    assert_eq!(scale.step, 100.0);
    assert_eq!(scale.max, 200.0);
}

#[test]
fn non_positive_or_non_finite_maximum_is_rejected() {
    for value in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(scale_axis(value).is_err(), "{value} must be rejected");
    }
}

#[test]
fn aligned_scale_is_unchanged_and_ticks_end_at_max() {
    let scale = AxisScale { max: 1_400.0, step: 200.0 };
    assert_eq!(scale.aligned(), scale);

    let ticks = scale.ticks();
    assert_eq!(ticks.len(), 8);
    assert_eq!(ticks.first().copied(), Some(0.0));
    assert_eq!(ticks.last().copied(), Some(1_400.0));
    assert_eq!(scale.max_amount(), 14_000_000.0);
}

#[test]
fn unaligned_ceiling_rounds_up_to_step() {
    let scale = AxisScale { max: 1_310.0, step: 200.0 }.aligned();
    assert_eq!(scale.max, 1_400.0);
}

#[test]
fn year_ticks_land_on_interval_and_horizon() {
    let years: Vec<u32> = horizon_ticks(20, 5).iter().map(|tick| tick.year).collect();
    assert_eq!(years, vec![0, 5, 10, 15, 20]);

    let ticks = horizon_ticks(12, 5);
    let years: Vec<u32> = ticks.iter().map(|tick| tick.year).collect();
    assert_eq!(years, vec![0, 5, 10, 12]);
    assert!(ticks.last().expect("final tick").is_final);
    assert!(ticks.iter().filter(|tick| tick.is_final).count() == 1);
}
