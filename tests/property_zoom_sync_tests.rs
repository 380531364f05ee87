use proptest::prelude::*;
use timechart_core::core::{SeriesId, Transform};
use timechart_core::interaction::{Margins, SyncConfig, ZoomSynchronizer};

fn synchronizer(total_width: f64) -> ZoomSynchronizer {
    let config = SyncConfig {
        total_width,
        axis_width: 40.0,
        margins: Margins::new(10.0, 10.0),
        ..SyncConfig::default()
    };
    ZoomSynchronizer::new(config, (0.0, 1_000_000.0)).expect("synchronizer")
}

proptest! {
    #[test]
    fn any_gesture_keeps_window_inside_full_domain(
        total_width in 200.0f64..4_000.0,
        series_count in 0u32..4,
        scale_factor in 0.01f64..10_000.0,
        translate_x in -10_000_000.0f64..10_000_000.0
    ) {
        let mut sync = synchronizer(total_width);
        for raw_id in 0..series_count {
            sync.add_series(SeriesId::new(raw_id)).expect("add series");
        }

        let applied = sync.apply_zoom_delta(Transform::new(scale_factor, translate_x));
        let (min_k, max_k) = sync.scale_factor_bounds();
        prop_assert!(applied.scale_factor >= min_k && applied.scale_factor <= max_k);
        prop_assert!(applied.translate_x <= 0.0);

        let (start, end) = sync.visible_window();
        prop_assert!(start >= 0.0);
        prop_assert!(end <= 1_000_000.0);
        prop_assert!(start <= end);
    }

    #[test]
    fn adding_a_series_preserves_the_visible_window(
        scale_factor in 1.0f64..50.0,
        pan_ratio in 0.0f64..1.0
    ) {
        let mut sync = synchronizer(2_000.0);
        let width = sync.chart_width();
        let translate_x = -pan_ratio * width * (scale_factor - 1.0);
        sync.apply_zoom_delta(Transform::new(scale_factor, translate_x));
        let before = sync.visible_window();

        sync.add_series(SeriesId::new(7)).expect("add series");
        let after = sync.visible_window();

        let tolerance = 1e-6 * 1_000_000.0;
        prop_assert!((before.0 - after.0).abs() <= tolerance);
        prop_assert!((before.1 - after.1).abs() <= tolerance);
    }
}
