use proptest::prelude::*;
use timechart_core::core::{Point, simplify};

fn ordered_points() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0.001f64..10.0, -1_000.0f64..1_000.0), 0..200).prop_map(|steps| {
        let mut timestamp = 0.0;
        steps
            .into_iter()
            .map(|(step, value)| {
                timestamp += step;
                Point::new(timestamp, value)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn simplify_preserves_endpoints_and_order(
        points in ordered_points(),
        tolerance in 0.0f64..50.0,
        highest_quality in any::<bool>()
    ) {
        let simplified = simplify(&points, Some(tolerance), highest_quality);

        prop_assert!(simplified.len() <= points.len());
        prop_assert_eq!(simplified.first(), points.first());
        prop_assert_eq!(simplified.last(), points.last());
        prop_assert!(simplified.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        prop_assert!(simplified.iter().all(|p| points.contains(p)));
    }

    #[test]
    fn simplify_is_idempotent_in_highest_quality(
        points in ordered_points(),
        tolerance in 0.0f64..50.0
    ) {
        let once = simplify(&points, Some(tolerance), true);
        let twice = simplify(&once, Some(tolerance), true);
        prop_assert!(twice.len() <= once.len());
    }
}
