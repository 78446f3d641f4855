use projection_chart::core::{AXIS_HEADROOM_FACTOR, DISPLAY_UNIT, scale_axis};
use proptest::prelude::*;

proptest! {
    #[test]
    fn axis_max_is_a_step_multiple_covering_the_margined_value(value in 1.0f64..1.0e12) {
        let scale = scale_axis(value).expect("scale");
        let margined = value / DISPLAY_UNIT * AXIS_HEADROOM_FACTOR;

        prop_assert!(scale.step > 0.0);
        prop_assert!(scale.max > 0.0);
        prop_assert!(scale.max >= margined * (1.0 - 1e-12));
        prop_assert!(scale.max - scale.step < margined);

        let multiples = scale.max / scale.step;
        prop_assert!((multiples - multiples.round()).abs() <= 1e-9 * multiples.max(1.0));
    }

    #[test]
    fn aligning_a_computed_scale_is_idempotent(value in 1.0f64..1.0e12) {
        let scale = scale_axis(value).expect("scale");
        let aligned = scale.aligned();
        prop_assert_eq!(aligned, aligned.aligned());
        prop_assert!((aligned.max - scale.max).abs() <= 1e-9 * scale.max);
    }

    #[test]
    fn tick_list_spans_zero_to_max(value in 1.0f64..1.0e10) {
        let scale = scale_axis(value).expect("scale").aligned();
        let ticks = scale.ticks();
        prop_assert_eq!(ticks.first().copied(), Some(0.0));
        let last = ticks.last().copied().expect("last tick");
        prop_assert!((last - scale.max).abs() <= 1e-6 * scale.max);
    }
}
