/*
 * The $P Point-Cloud Recognizer (rust version)
 *
 * Original authors:
 *
 * 	    Radu-Daniel Vatavu, Ph.D.
 *	    University Stefan cel Mare of Suceava
 *	    Suceava 720229, Romania
 *	    vatavu@eed.usv.ro
 *
 *	    Lisa Anthony, Ph.D.
 *      UMBC
 *      Information Systems Department
 *      1000 Hilltop Circle
 *      Baltimore, MD 21250
 *      lanthony@umbc.edu
 *
 *	    Jacob O. Wobbrock, Ph.D.
 * 	    The Information School
 *	    University of Washington
 *	    Seattle, WA 98195-2840
 *	    wobbrock@uw.edu
 *
 * The academic publication for the $P recognizer, and what should be
 * used to cite it, is:
 *
 *	Vatavu, R.-D., Anthony, L. and Wobbrock, J.O. (2012).
 *	  Gestures as point clouds: A $P recognizer for user interface
 *	  prototypes. Proceedings of the ACM Int'l Conference on
 *	  Multimodal Interfaces (ICMI '12). Santa Monica, California
 *	  (October 22-26, 2012). New York: ACM Press, pp. 273-280.
 *
 * This software is distributed under the "New BSD License" agreement:
 *
 * Copyright (c) 2012, Radu-Daniel Vatavu, Lisa Anthony, and
 * Jacob O. Wobbrock. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without
 * modification, are permitted provided that the following conditions are met:
 *    * Redistributions of source code must retain the above copyright
 *      notice, this list of conditions and the following disclaimer.
 *    * Redistributions in binary form must reproduce the above copyright
 *      notice, this list of conditions and the following disclaimer in the
 *      documentation and/or other materials provided with the distribution.
 *    * Neither the names of the University Stefan cel Mare of Suceava,
 *	    University of Washington, nor UMBC, nor the names of its contributors
 *	    may be used to endorse or promote products derived from this software
 *	    without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS
 * IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO,
 * THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
 * PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL Radu-Daniel Vatavu OR Lisa Anthony
 * OR Jacob O. Wobbrock BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
 * EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT
 * OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
 * INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
 * STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY
 * OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF
 * SUCH DAMAGE.
**/

use std::sync::OnceLock;

use crate::{geometry, point::Point};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

/// Number of points every gesture cloud is resampled to before matching.
/// Clouds must share a cardinality because greedy matching pairs points
/// bijectively.
pub const SAMPLING_RESOLUTION: usize = 32;

/// A named, ordered stroke of points.
///
/// `points` holds the raw capture in the order it was drawn; that order is
/// never changed. The normalized cloud the recognizer compares (resampled,
/// scaled, translated to origin) is derived lazily on first use and cached,
/// so a training set pays the normalization cost once per gesture no matter
/// how many queries run against it.
///
/// `name` may stay empty for a capture still in flight; a
/// [`TrainingSet`](crate::training_set::TrainingSet) refuses unlabeled
/// gestures on append.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gesture {
    /// Gesture class
    pub name: String,
    /// Raw gesture points, in temporal order
    pub points: Vec<Point>,
    /// Normalized point cloud, built on first comparison
    #[cfg_attr(feature = "serde", serde(skip))]
    cloud: OnceLock<Vec<Point>>,
}

impl Gesture {
    /// Constructs a new gesture from a list of points and a name.
    pub fn new(points: Vec<Point>, name: &str) -> Self {
        Self {
            name: name.into(),
            points,
            cloud: OnceLock::new(),
        }
    }

    /// A gesture with no label yet, e.g. a capture being classified.
    pub fn unlabeled(points: Vec<Point>) -> Self {
        Self::new(points, "")
    }

    /// Whether the gesture has no points. Empty gestures are rejected as
    /// queries and skipped as templates.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length of the raw stroke.
    pub fn path_length(&self) -> f32 {
        geometry::path_length(&self.points)
    }

    /// Centroid of the raw stroke.
    pub fn centroid(&self) -> Point {
        geometry::centroid(&self.points)
    }

    /// Diagonal of the raw stroke's bounding box; 0.0 for an empty gesture.
    pub fn bounding_box_diagonal(&self) -> f32 {
        geometry::bounding_box(&self.points)
            .map(|(min, max)| min.distance(&max))
            .unwrap_or(0.0)
    }

    /// The normalized point cloud compared during classification: resampled
    /// to [`SAMPLING_RESOLUTION`] points, scaled with shape preservation,
    /// centroid translated to the origin. Empty for an empty gesture.
    pub fn cloud(&self) -> &[Point] {
        self.cloud.get_or_init(|| Self::normalize(&self.points))
    }

    fn normalize(points: &[Point]) -> Vec<Point> {
        if points.is_empty() {
            return Vec::new();
        }
        let resampled = Self::resample(points, SAMPLING_RESOLUTION);
        let scaled = Self::scale(&resampled);
        let c = geometry::centroid(&scaled);
        Self::translate_to(&scaled, &c)
    }

    /// Performs scale normalization with shape preservation into [0..1]x[0..1]
    fn scale(points: &[Point]) -> Vec<Point> {
        let (mut minx, mut miny, mut minz) = (f32::MAX, f32::MAX, f32::MAX);
        let (mut maxx, mut maxy) = (f32::MIN, f32::MIN);
        for p in points {
            if p.x < minx { minx = p.x; }
            if p.y < miny { miny = p.y; }
            if p.z < minz { minz = p.z; }
            if p.x > maxx { maxx = p.x; }
            if p.y > maxy { maxy = p.y; }
        }
        let scale = (maxx - minx).max(maxy - miny);
        if scale <= f32::EPSILON {
            // zero-extent cloud (all samples coincide): nothing to scale
            return points.to_vec();
        }
        points
            .iter()
            .map(|p| {
                Point::new_3d(
                    (p.x - minx) / scale,
                    (p.y - miny) / scale,
                    (p.z - minz) / scale,
                )
            })
            .collect()
    }

    /// Translates the array of points so that p maps to the origin
    fn translate_to(points: &[Point], p: &Point) -> Vec<Point> {
        points.iter().map(|point| *point - *p).collect()
    }

    /// Resamples the array of points into n equally-distanced points
    fn resample(points: &[Point], n: usize) -> Vec<Point> {
        let mut new_points = Vec::with_capacity(n);
        new_points.push(points[0]);

        let interval = geometry::path_length(points) / (n as f32 - 1.0);
        if interval <= f32::EPSILON {
            // a stroke with no extent resamples to copies of its location
            new_points.resize(n, points[0]);
            return new_points;
        }

        let mut d = 0.0;
        for i in 1..points.len() {
            let mut dist = geometry::euclidean_distance(&points[i - 1], &points[i]);
            if (d + dist) >= interval {
                let mut first_point = points[i - 1];
                while (d + dist) >= interval {
                    let t = if dist != 0.0 {
                        ((interval - d) / dist).clamp(0.0, 1.0)
                    } else {
                        0.5
                    };
                    let q = first_point + (points[i] - first_point) * t;
                    new_points.push(q);

                    // update partial length
                    dist = d + dist - interval;
                    d = 0.0;
                    first_point = q;
                }
                d = dist;
            } else {
                d += dist;
            }
        }
        // sometimes we fall a rounding-error short of adding the last point
        while new_points.len() < n {
            new_points.push(*points.last().unwrap());
        }
        new_points.truncate(n);
        new_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Vec<Point> {
        vec![
            Point::new(10.0, 10.0),
            Point::new(60.0, 80.0),
            Point::new(120.0, 20.0),
            Point::new(180.0, 90.0),
        ]
    }

    #[test]
    fn cloud_has_fixed_cardinality() {
        let gesture = Gesture::new(zigzag(), "zigzag");
        assert_eq!(gesture.cloud().len(), SAMPLING_RESOLUTION);
    }

    #[test]
    fn cloud_centroid_is_at_origin() {
        let gesture = Gesture::new(zigzag(), "zigzag");
        let c = geometry::centroid(gesture.cloud());
        assert!(c.magnitude() < 1e-4, "centroid not at origin: {c:?}");
    }

    #[test]
    fn cloud_is_computed_once() {
        let gesture = Gesture::new(zigzag(), "zigzag");
        let first = gesture.cloud().as_ptr();
        let second = gesture.cloud().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_gesture_has_empty_cloud() {
        let gesture = Gesture::unlabeled(Vec::new());
        assert!(gesture.is_empty());
        assert!(gesture.cloud().is_empty());
        assert_eq!(gesture.path_length(), 0.0);
        assert_eq!(gesture.bounding_box_diagonal(), 0.0);
    }

    #[test]
    fn zero_extent_stroke_stays_finite() {
        let dot = vec![Point::new(5.0, 5.0); 4];
        let gesture = Gesture::new(dot, "dot");
        let cloud = gesture.cloud();
        assert_eq!(cloud.len(), SAMPLING_RESOLUTION);
        for p in cloud {
            assert!(p.x.is_finite() && p.y.is_finite(), "non-finite: {p:?}");
        }
    }

    #[test]
    fn derived_geometry() {
        let gesture = Gesture::new(
            vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)],
            "segment",
        );
        assert_eq!(gesture.path_length(), 5.0);
        assert_eq!(gesture.centroid(), Point::new(1.5, 2.0));
        assert_eq!(gesture.bounding_box_diagonal(), 5.0);
    }

    #[test]
    fn resample_spacing_is_even() {
        let gesture = Gesture::new(
            vec![Point::new(0.0, 0.0), Point::new(310.0, 0.0)],
            "segment",
        );
        let cloud = gesture.cloud();
        let expected = geometry::path_length(cloud) / (cloud.len() as f32 - 1.0);
        for w in cloud.windows(2) {
            let step = w[0].distance(&w[1]);
            assert!(
                (step - expected).abs() < 1e-3,
                "uneven step {step} vs {expected}"
            );
        }
    }
}
