//! Polyline decimation for rendering dense series.
//!
//! Two passes over `(timestamp, value)` space: a cheap radial-distance filter
//! followed by Ramer–Douglas–Peucker. All comparisons use squared distances.

use smallvec::SmallVec;

use crate::core::{Point, Series};

pub const DEFAULT_TOLERANCE: f64 = 1.0;

/// Reduces `points` to a visually equivalent subsequence.
///
/// `tolerance` defaults to [`DEFAULT_TOLERANCE`]. With `highest_quality` the
/// radial pre-pass is skipped. First and last points always survive and
/// order is preserved; inputs of two points or fewer are returned as-is.
#[must_use]
pub fn simplify(points: &[Point], tolerance: Option<f64>, highest_quality: bool) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let sq_tolerance = tolerance * tolerance;

    if highest_quality {
        simplify_douglas_peucker(points, sq_tolerance)
    } else {
        let reduced = simplify_radial_distance(points, sq_tolerance);
        simplify_douglas_peucker(&reduced, sq_tolerance)
    }
}

#[must_use]
pub fn simplify_series(series: &Series, tolerance: Option<f64>, highest_quality: bool) -> Vec<Point> {
    simplify(series.points(), tolerance, highest_quality)
}

fn sq_distance(a: Point, b: Point) -> f64 {
    let dx = a.timestamp - b.timestamp;
    let dy = a.value - b.value;
    dx * dx + dy * dy
}

/// Squared distance from `p` to the segment `a..b`.
fn sq_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let mut x = a.timestamp;
    let mut y = a.value;
    let dx = b.timestamp - x;
    let dy = b.value - y;

    if dx != 0.0 || dy != 0.0 {
        let t = ((p.timestamp - x) * dx + (p.value - y) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            x = b.timestamp;
            y = b.value;
        } else if t > 0.0 {
            x += dx * t;
            y += dy * t;
        }
    }

    let dx = p.timestamp - x;
    let dy = p.value - y;
    dx * dx + dy * dy
}

fn simplify_radial_distance(points: &[Point], sq_tolerance: f64) -> Vec<Point> {
    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut kept = vec![first];
    let mut prev = first;
    let mut last_kept_is_tail = rest.is_empty();

    for &point in rest {
        last_kept_is_tail = false;
        if sq_distance(point, prev) > sq_tolerance {
            kept.push(point);
            prev = point;
            last_kept_is_tail = true;
        }
    }

    if !last_kept_is_tail {
        if let Some(&tail) = points.last() {
            kept.push(tail);
        }
    }
    kept
}

fn simplify_douglas_peucker(points: &[Point], sq_tolerance: f64) -> Vec<Point> {
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut spans: SmallVec<[(usize, usize); 32]> = SmallVec::new();
    spans.push((0, last));

    while let Some((first, last)) = spans.pop() {
        let mut max_sq_distance = sq_tolerance;
        let mut split = None;

        for index in first + 1..last {
            let sq_distance = sq_segment_distance(points[index], points[first], points[last]);
            if sq_distance > max_sq_distance {
                max_sq_distance = sq_distance;
                split = Some(index);
            }
        }

        if let Some(index) = split {
            keep[index] = true;
            if index - first > 1 {
                spans.push((first, index));
            }
            if last - index > 1 {
                spans.push((index, last));
            }
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then_some(*point))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radial_pass_keeps_tail_even_when_close() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.1, 0.0),
        ];
        let reduced = simplify_radial_distance(&points, 1.0);
        assert_eq!(reduced.len(), 3);
        assert_eq!(reduced[2], points[2]);
    }

    #[test]
    fn radial_pass_drops_clustered_points() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(0.1, 0.0),
            Point::new(0.2, 0.0),
            Point::new(3.0, 0.0),
        ];
        let reduced = simplify_radial_distance(&points, 1.0);
        assert_eq!(reduced, vec![points[0], points[3]]);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        assert_eq!(sq_segment_distance(Point::new(1.0, 3.0), a, b), 9.0);
        assert_eq!(sq_segment_distance(Point::new(4.0, 0.0), a, b), 4.0);
        assert_eq!(sq_segment_distance(Point::new(-1.0, 1.0), a, b), 2.0);
    }

    #[test]
    fn douglas_peucker_keeps_peak() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.1),
            Point::new(2.0, 10.0),
            Point::new(3.0, 0.1),
            Point::new(4.0, 0.0),
        ];
        let reduced = simplify_douglas_peucker(&points, 1.0);
        assert_eq!(reduced, vec![points[0], points[2], points[4]]);
    }
}
