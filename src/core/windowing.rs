use crate::core::Point;

/// Fits a requested visible window into the full domain.
///
/// The requested width is preserved whenever it fits, so zoom level stays
/// stable while panning against an edge. Results always lie inside `full`.
///
/// A request entirely past the end is pinned to the trailing edge; one
/// entirely before the start is pinned to the leading edge, keeping it on
/// the side it was requested from.
#[must_use]
pub fn compute_visible_window(full: (f64, f64), requested: (f64, f64)) -> (f64, f64) {
    let (full_start, full_end) = full;
    let (requested_start, requested_end) = requested;
    let requested_width = requested_end - requested_start;
    let full_width = full_end - full_start;

    if requested_start > full_end || requested_end < full_start {
        if requested_width > full_width {
            return full;
        }
        return if requested_start > full_end {
            (full_end - requested_width, full_end)
        } else {
            (full_start, full_start + requested_width)
        };
    }

    if requested_width > full_width {
        return full;
    }

    if requested_end > full_end {
        let overflow = requested_end - full_end;
        return ((requested_start - overflow).max(full_start), full_end);
    }

    if requested_start < full_start {
        let overflow = full_start - requested_start;
        return (full_start, (requested_end + overflow).min(full_end));
    }

    requested
}

/// Returns points whose timestamp falls inside an inclusive time window.
#[must_use]
pub fn points_in_time_window(points: &[Point], start: f64, end: f64) -> Vec<Point> {
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    points
        .iter()
        .copied()
        .filter(|point| point.timestamp >= min_t && point.timestamp <= max_t)
        .collect()
}

/// Borrows the points inside `[start, end]` plus one neighbor on each side,
/// so a polyline drawn from the slice reaches both window edges.
///
/// `points` must be sorted by timestamp.
#[must_use]
pub fn visible_slice_with_neighbors(points: &[Point], start: f64, end: f64) -> &[Point] {
    let lower = points
        .partition_point(|point| point.timestamp < start)
        .saturating_sub(1);
    let upper = (points.partition_point(|point| point.timestamp <= end) + 1).min(points.len());
    if lower >= upper {
        return &[];
    }
    &points[lower..upper]
}
