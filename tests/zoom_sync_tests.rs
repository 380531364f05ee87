use approx::assert_abs_diff_eq;
use timechart_core::ChartError;
use timechart_core::core::{SeriesId, Transform, VerticalRescale};
use timechart_core::interaction::{
    InteractionMode, Margins, RenderNotification, SyncConfig, ZoomSynchronizer,
};

fn config(total_width: f64, axis_width: f64) -> SyncConfig {
    SyncConfig {
        total_width,
        axis_width,
        margins: Margins::default(),
        scale_extent: (1.0, 1000.0),
    }
}

fn build(total_width: f64, axis_width: f64) -> ZoomSynchronizer {
    ZoomSynchronizer::new(config(total_width, axis_width), (0.0, 1000.0)).expect("sync init")
}

fn assert_window_inside_full(sync: &ZoomSynchronizer) {
    let (start, end) = sync.visible_window();
    let (full_start, full_end) = sync.full_domain();
    assert!(start >= full_start, "start {start} before {full_start}");
    assert!(end <= full_end, "end {end} after {full_end}");
    assert!(start <= end);
}

#[test]
fn starts_at_identity_showing_full_domain() {
    let sync = build(1000.0, 0.0);
    assert!(sync.transform().is_identity());
    assert_eq!(sync.visible_window(), (0.0, 1000.0));
    assert_eq!(sync.interaction_mode(), InteractionMode::Active);
}

#[test]
fn set_visible_window_derives_affine_transform() {
    let mut sync = build(1000.0, 0.0);
    let transform = sync.set_visible_window((250.0, 750.0)).expect("set window");

    assert_abs_diff_eq!(transform.scale_factor, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(transform.translate_x, -500.0, epsilon = 1e-9);
    let (start, end) = sync.visible_window();
    assert_abs_diff_eq!(start, 250.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end, 750.0, epsilon = 1e-9);
}

#[test]
fn set_visible_window_clamps_out_of_range_requests() {
    let mut sync = build(1000.0, 0.0);
    sync.set_visible_window((900.0, 1100.0)).expect("set window");
    let (start, end) = sync.visible_window();
    assert_abs_diff_eq!(start, 800.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end, 1000.0, epsilon = 1e-9);
}

#[test]
fn set_visible_window_rejects_reversed_range() {
    let mut sync = build(1000.0, 0.0);
    let err = sync.set_visible_window((10.0, 5.0)).expect_err("reversed");
    assert_eq!(err, ChartError::InvalidRange { start: 10.0, end: 5.0 });
}

#[test]
fn extreme_zoom_in_is_capped() {
    let mut sync = build(1000.0, 0.0);
    let transform = sync.apply_zoom_delta(Transform::new(1e9, 1e9));
    assert_eq!(transform.scale_factor, 1000.0);
    assert_eq!(transform.translate_x, 0.0);

    let (start, end) = sync.visible_window();
    assert_abs_diff_eq!(start, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end, 1.0, epsilon = 1e-9);
}

#[test]
fn zoom_out_never_exceeds_full_domain() {
    let mut sync = build(1000.0, 0.0);
    let transform = sync.apply_zoom_delta(Transform::new(0.01, 12_345.0));
    assert_eq!(transform, Transform::IDENTITY);
    assert_eq!(sync.visible_window(), (0.0, 1000.0));
}

#[test]
fn pan_past_the_end_is_clamped() {
    let mut sync = build(1000.0, 0.0);
    sync.apply_zoom_delta(Transform::new(4.0, -1e12));
    let (start, end) = sync.visible_window();
    assert_abs_diff_eq!(end, 1000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(start, 750.0, epsilon = 1e-9);
}

#[test]
fn more_series_shrink_extent_and_keep_bounds() {
    let mut sync = build(1000.0, 50.0);
    sync.apply_zoom_delta(Transform::new(3.0, -900.0));
    sync.on_series_set_changed(4);
    assert_eq!(sync.chart_width(), 800.0);

    for raw in [
        Transform::new(1e6, -1e9),
        Transform::new(1e6, 1e9),
        Transform::new(2.5, -1e9),
        Transform::new(0.0001, 3.0),
        Transform::new(17.0, -5_000.0),
    ] {
        sync.apply_zoom_delta(raw);
        assert_window_inside_full(&sync);
    }
}

#[test]
fn series_set_change_preserves_visible_window() {
    let mut sync = build(1000.0, 50.0);
    sync.set_visible_window((200.0, 400.0)).expect("set window");
    sync.add_series(SeriesId::new(1)).expect("add");
    sync.add_series(SeriesId::new(2)).expect("add");

    assert_eq!(sync.chart_width(), 900.0);
    let (start, end) = sync.visible_window();
    assert_abs_diff_eq!(start, 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end, 400.0, epsilon = 1e-9);
}

#[test]
fn degenerate_width_falls_back_to_identity() {
    let mut sync = build(100.0, 50.0);
    sync.set_visible_window((100.0, 200.0)).expect("set window");
    sync.add_series(SeriesId::new(1)).expect("add");
    sync.add_series(SeriesId::new(2)).expect("add");

    assert_eq!(sync.chart_width(), 0.0);
    assert_eq!(sync.interaction_mode(), InteractionMode::Suspended);
    assert!(sync.transform().is_identity());
    assert_eq!(
        sync.chart_width_checked(),
        Err(ChartError::DegenerateExtent { width: 0.0 })
    );
    assert_eq!(sync.apply_zoom_delta(Transform::new(5.0, -10.0)), Transform::IDENTITY);
    assert_eq!(
        sync.set_visible_window((10.0, 20.0)).expect("set window"),
        Transform::IDENTITY
    );
    assert_eq!(sync.visible_window(), (0.0, 1000.0));
}

#[test]
fn interaction_resumes_after_resize() {
    let mut sync = build(100.0, 60.0);
    sync.add_series(SeriesId::new(1)).expect("add");
    sync.add_series(SeriesId::new(2)).expect("add");
    assert_eq!(sync.interaction_mode(), InteractionMode::Suspended);

    sync.resize(1120.0).expect("resize");
    assert_eq!(sync.chart_width(), 1000.0);
    assert_eq!(sync.interaction_mode(), InteractionMode::Active);
    let transform = sync.apply_zoom_delta(Transform::new(2.0, -100.0));
    assert_eq!(transform, Transform::new(2.0, -100.0));
}

#[test]
fn rescale_touches_only_its_series() {
    let mut sync = build(1000.0, 40.0);
    let a = SeriesId::new(1);
    let b = SeriesId::new(2);
    sync.add_series(a).expect("add a");
    sync.add_series(b).expect("add b");
    sync.apply_zoom_delta(Transform::new(2.0, -300.0));
    let transform = sync.transform();
    sync.take_notifications();

    sync.update_series_rescale(a, VerticalRescale::new(3.0, -50.0))
        .expect("rescale");

    assert_eq!(sync.series_rescale(a), Some(VerticalRescale::new(3.0, -50.0)));
    assert_eq!(sync.series_rescale(b), Some(VerticalRescale::IDENTITY));
    assert_eq!(sync.transform(), transform);
    assert_eq!(
        sync.take_notifications(),
        vec![RenderNotification::SeriesAxis(a)]
    );
}

#[test]
fn rescale_rejects_unknown_series_and_bad_values() {
    let mut sync = build(1000.0, 0.0);
    let err = sync
        .update_series_rescale(SeriesId::new(7), VerticalRescale::IDENTITY)
        .expect_err("unknown");
    assert_eq!(err, ChartError::UnknownSeries(SeriesId::new(7)));

    sync.add_series(SeriesId::new(7)).expect("add");
    let err = sync
        .update_series_rescale(SeriesId::new(7), VerticalRescale::new(0.0, 0.0))
        .expect_err("zero scale");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn duplicate_and_missing_series_are_rejected() {
    let mut sync = build(1000.0, 0.0);
    sync.add_series(SeriesId::new(1)).expect("add");
    assert_eq!(
        sync.add_series(SeriesId::new(1)),
        Err(ChartError::DuplicateSeries(SeriesId::new(1)))
    );
    assert_eq!(
        sync.remove_series(SeriesId::new(2)),
        Err(ChartError::UnknownSeries(SeriesId::new(2)))
    );
    sync.remove_series(SeriesId::new(1)).expect("remove");
    assert!(sync.series_ids().is_empty());
    assert_eq!(sync.series_rescale(SeriesId::new(1)), None);
}

#[test]
fn growing_full_domain_keeps_window() {
    let mut sync = build(1000.0, 0.0);
    sync.set_visible_window((100.0, 300.0)).expect("set window");
    sync.set_full_domain((0.0, 2000.0)).expect("grow");

    let (start, end) = sync.visible_window();
    assert_abs_diff_eq!(start, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(end, 300.0, epsilon = 1e-9);
}

#[test]
fn zoom_emits_time_axis_notification() {
    let mut sync = build(1000.0, 0.0);
    sync.take_notifications();
    sync.apply_zoom_delta(Transform::new(2.0, 0.0));
    assert_eq!(sync.take_notifications(), vec![RenderNotification::TimeAxis]);

    sync.apply_zoom_delta(Transform::new(2.0, 0.0));
    assert!(sync.take_notifications().is_empty());
}
