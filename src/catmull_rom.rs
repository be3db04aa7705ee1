//! Catmull-Rom path smoothing.
//!
//! The capture layer polls the pointer on a timer, so raw strokes are
//! sparse where the pointer moves fast and jittery where it moves slow.
//! [`smooth`] re-traces such a polyline as a Catmull-Rom spline sampled
//! at an even target spacing, which is what both the on-screen stroke
//! preview and the recognizer are fed.

use crate::point::Point;

/// Spacing between smoothed samples used by the capture layer, in world units.
pub const DEFAULT_SPACING: f32 = 10.0;

/// Default knot parameterization exponent. Small positive values keep the
/// centripetal behavior (no cusps or self-intersections on sharp turns)
/// while staying close to the control polygon.
pub const DEFAULT_ALPHA: f32 = 0.1;

/// Floor for knot intervals; keeps the spline evaluation total when a
/// virtual neighbor coincides with a segment end point.
const MIN_KNOT_INTERVAL: f32 = 1e-6;

/// Re-traces a polyline as a Catmull-Rom spline sampled roughly `spacing`
/// apart along each segment.
///
/// `alpha` selects the knot parameterization: 0.0 is uniform, 0.5
/// centripetal, 1.0 chordal. The curve passes through every distinct
/// input point, including both ends. Inputs with fewer than two points
/// come back unchanged, and coincident consecutive points contribute no
/// interpolation steps; neither case is an error.
pub fn smooth(points: &[Point], spacing: f32, alpha: f32) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut out = Vec::new();
    for i in 0..points.len() - 1 {
        let p1 = points[i];
        let p2 = points[i + 1];

        let segment = p1.distance(&p2);
        if segment <= f32::EPSILON {
            // zero-length segment, an expected artifact of timer sampling
            continue;
        }

        // virtual neighbors extrapolated at the open ends, so the first and
        // last real points are interpolated through rather than skipped
        let p0 = if i == 0 { p1 + (p1 - p2) } else { points[i - 1] };
        let p3 = if i + 2 < points.len() {
            points[i + 2]
        } else {
            p2 + (p2 - p1)
        };

        let t0 = 0.0;
        let t1 = t0 + knot_interval(&p0, &p1, alpha);
        let t2 = t1 + knot_interval(&p1, &p2, alpha);
        let t3 = t2 + knot_interval(&p2, &p3, alpha);

        let steps = (segment / spacing).ceil().max(1.0) as usize;
        for s in 0..steps {
            let u = t1 + (t2 - t1) * (s as f32 / steps as f32);
            out.push(interpolate(&p0, &p1, &p2, &p3, [t0, t1, t2, t3], u));
        }
    }

    // each span emits only its leading samples; close with the last control point
    out.push(points[points.len() - 1]);
    out
}

/// Knot spacing between consecutive control points: |b - a|^alpha.
fn knot_interval(a: &Point, b: &Point, alpha: f32) -> f32 {
    a.distance(b).powf(alpha).max(MIN_KNOT_INTERVAL)
}

/// Barry-Goldman pyramidal evaluation of the spline at `u` in [t1, t2].
fn interpolate(p0: &Point, p1: &Point, p2: &Point, p3: &Point, t: [f32; 4], u: f32) -> Point {
    let [t0, t1, t2, t3] = t;

    let a1 = *p0 * ((t1 - u) / (t1 - t0)) + *p1 * ((u - t0) / (t1 - t0));
    let a2 = *p1 * ((t2 - u) / (t2 - t1)) + *p2 * ((u - t1) / (t2 - t1));
    let a3 = *p2 * ((t3 - u) / (t3 - t2)) + *p3 * ((u - t2) / (t3 - t2));

    let b1 = a1 * ((t2 - u) / (t2 - t0)) + a2 * ((u - t0) / (t2 - t0));
    let b2 = a2 * ((t3 - u) / (t3 - t1)) + a3 * ((u - t1) / (t3 - t1));

    b1 * ((t2 - u) / (t2 - t1)) + b2 * ((u - t1) / (t2 - t1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_inputs_pass_through() {
        assert!(smooth(&[], 10.0, 0.5).is_empty());

        let single = [Point::new(3.0, 4.0)];
        assert_eq!(smooth(&single, 10.0, 0.5), single);
    }

    #[test]
    fn straight_line_stays_on_line() {
        let line = [
            Point::new(0.0, 1.0),
            Point::new(10.0, 1.0),
            Point::new(20.0, 1.0),
            Point::new(30.0, 1.0),
        ];
        let smoothed = smooth(&line, 2.0, 0.5);

        for p in &smoothed {
            assert!((p.y - 1.0).abs() < 1e-3, "off the line: {p:?}");
        }
        // arc-length coverage never regresses along a straight path
        for w in smoothed.windows(2) {
            assert!(w[1].x >= w[0].x - 1e-3, "went backwards: {w:?}");
        }
        assert!(smoothed[0].distance(&line[0]) < 1e-3);
        assert_eq!(*smoothed.last().unwrap(), line[3]);
    }

    #[test]
    fn spacing_controls_output_density() {
        let segment = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        // ceil(100 / 10) samples plus the closing end point
        assert_eq!(smooth(&segment, 10.0, 0.5).len(), 11);
        assert_eq!(smooth(&segment, 5.0, 0.5).len(), 21);
    }

    #[test]
    fn output_length_tracks_path_not_input_count() {
        let sparse = [Point::new(0.0, 0.0), Point::new(200.0, 0.0)];
        let dense: Vec<Point> = (0..=20).map(|i| Point::new(i as f32 * 10.0, 0.0)).collect();
        assert_eq!(
            smooth(&sparse, 10.0, 0.5).len(),
            smooth(&dense, 10.0, 0.5).len()
        );
    }

    #[test]
    fn coincident_control_points_are_skipped() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
        ];
        let smoothed = smooth(&points, 1.0, 0.5);
        assert!(!smoothed.is_empty());
        for p in &smoothed {
            assert!(p.x.is_finite() && p.y.is_finite(), "non-finite sample: {p:?}");
        }
    }

    #[test]
    fn all_input_points_are_on_the_curve() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 15.0),
            Point::new(25.0, 5.0),
            Point::new(40.0, 20.0),
        ];
        let smoothed = smooth(&points, 1.0, 0.5);
        for control in &points {
            let nearest = smoothed
                .iter()
                .map(|p| p.distance(control))
                .fold(f32::MAX, f32::min);
            assert!(nearest < 1e-2, "control point {control:?} missed by {nearest}");
        }
    }
}
