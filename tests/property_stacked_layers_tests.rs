use approx::relative_eq;
use projection_chart::core::{YearlyPoint, adapt_series, series_maximum};
use proptest::prelude::*;

fn series_strategy() -> impl Strategy<Value = Vec<YearlyPoint>> {
    proptest::collection::vec(
        (0.0f64..1.0e8, 0.0f64..1.0e7, 0.0f64..1.0e7),
        1..50,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(year, (principal, base_gain, selected_gain))| {
                let base_total = principal + base_gain;
                YearlyPoint::new(
                    year as u32,
                    principal,
                    base_total,
                    base_total + selected_gain,
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn bands_sum_to_selected_total(series in series_strategy()) {
        let layers = adapt_series(&series);
        prop_assert_eq!(layers.len(), series.len());

        for (index, point) in series.iter().enumerate() {
            let height = layers.stack_height(index).expect("height");
            prop_assert!(relative_eq!(
                height,
                point.selected_total / 10_000.0,
                epsilon = 1e-6,
                max_relative = 1e-9
            ));
            prop_assert_eq!(layers.selected[index].x, f64::from(point.year));
        }
    }

    #[test]
    fn maximum_bounds_every_total(series in series_strategy()) {
        let maximum = series_maximum(&series).expect("maximum");
        for point in &series {
            prop_assert!(maximum >= point.base_total);
            prop_assert!(maximum >= point.selected_total);
        }
    }
}
