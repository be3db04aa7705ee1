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

use thiserror::Error;
use tracing::{debug, warn};

use crate::{geometry, gesture::Gesture, point::Point};

/// Precondition failures at the classification boundary. Once inputs pass
/// these checks every internal step is total.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// The query gesture has no points. Deliberately distinct from an empty
    /// result, which means the training set had nothing to compare against.
    #[error("cannot classify an empty gesture")]
    EmptyGesture,
}

/// Distance used when pairing points during greedy matching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CloudMetric {
    /// Euclidean point-to-point distance.
    #[default]
    Euclidean,
    /// City-block (L1) point-to-point distance.
    CityBlock,
}

impl CloudMetric {
    fn distance(self, a: &Point, b: &Point) -> f32 {
        match self {
            CloudMetric::Euclidean => geometry::euclidean_distance(a, b),
            CloudMetric::CityBlock => geometry::city_block_distance(a, b),
        }
    }
}

/// Tuning knobs for the greedy cloud matcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchParameters {
    /// Point-pair distance to accumulate.
    pub metric: CloudMetric,
    /// Controls the number of greedy trial alignments (eps is in [0..1]);
    /// 1 tries every start point, 0 tries only the first.
    pub search_eps: f32,
}

impl Default for MatchParameters {
    fn default() -> Self {
        MatchParameters {
            metric: CloudMetric::Euclidean,
            search_eps: 0.5,
        }
    }
}

/// One training gesture scored against a query. The score is a
/// distance-like quantity, lower meaning more similar; it is not a
/// probability.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    /// Gesture class of the scored template
    pub class: String,
    /// Normalized cloud distance between query and template
    pub score: f32,
}

/// Classifies a candidate gesture against a set of training samples with
/// default [`MatchParameters`].
///
/// Returns every template's score, ranked best (lowest) first. An empty
/// training set yields an empty ranking; an empty candidate is an error.
pub fn classify(
    candidate: &Gesture,
    training_set: &[Gesture],
) -> Result<Vec<Classification>, ClassifyError> {
    classify_with(candidate, training_set, &MatchParameters::default())
}

/// [`classify`] with explicit matcher parameters.
///
/// Every template is scored; there is no early pruning, so the true best
/// match is never skipped. The sort is stable: templates with equal scores
/// keep their training-set order, making the ranking deterministic for
/// deterministic input. Neither the candidate nor the training set is
/// mutated.
pub fn classify_with(
    candidate: &Gesture,
    training_set: &[Gesture],
    params: &MatchParameters,
) -> Result<Vec<Classification>, ClassifyError> {
    if candidate.is_empty() {
        return Err(ClassifyError::EmptyGesture);
    }

    let cloud = candidate.cloud();
    let mut results = Vec::with_capacity(training_set.len());
    for template in training_set {
        if template.is_empty() {
            warn!(name = %template.name, "skipping empty training gesture");
            continue;
        }
        let score = greedy_cloud_match(cloud, template.cloud(), params);
        results.push(Classification {
            class: template.name.clone(),
            score,
        });
    }
    results.sort_by(|a, b| a.score.total_cmp(&b.score));

    debug!(
        templates = results.len(),
        best = results.first().map(|r| r.class.as_str()),
        "classified gesture"
    );
    Ok(results)
}

/// Implements greedy search for a minimum-distance matching between two
/// point clouds, trying several start alignments in both matching
/// directions and keeping the best. The result is normalized by cloud
/// cardinality.
fn greedy_cloud_match(points1: &[Point], points2: &[Point], params: &MatchParameters) -> f32 {
    // the two clouds have the same number of points by construction
    let n = points1.len();

    let eps = params.search_eps.clamp(0.0, 1.0);
    let step = ((n as f32).powf(1.0 - eps).floor() as usize).max(1);

    let mut min_distance = f32::MAX;
    for i in (0..n).step_by(step) {
        // match points1 --> points2 starting with index point i
        let dist1 = cloud_distance(points1, points2, i, params.metric);
        // match points2 --> points1 starting with index point i
        let dist2 = cloud_distance(points2, points1, i, params.metric);
        min_distance = min_distance.min(dist1).min(dist2);
    }
    min_distance / n as f32
}

/// Computes the distance between two point clouds by performing a
/// minimum-distance greedy matching starting with point start_index
fn cloud_distance(
    points1: &[Point],
    points2: &[Point],
    start_index: usize,
    metric: CloudMetric,
) -> f32 {
    let n = points1.len();
    // matched[j] signals whether point j from the 2nd cloud has been already matched
    let mut matched = vec![false; n];
    // sum of weighted distances between matched points
    let mut sum = 0.0;
    let mut i = start_index;
    loop {
        let mut index = 0;
        let mut min_dist = f32::MAX;
        for (j, q) in points2.iter().enumerate() {
            if !matched[j] {
                let dist = metric.distance(&points1[i], q);
                if dist < min_dist {
                    min_dist = dist;
                    index = j;
                }
            }
        }
        // point index from the 2nd cloud is matched to point i from the 1st cloud
        matched[index] = true;
        // weight each distance with a confidence coefficient that decreases from 1 to 0
        let weight = 1.0 - (((i + n - start_index) % n) as f32 / n as f32);
        sum += weight * min_dist;
        i = (i + 1) % n;
        if i == start_index {
            break;
        }
    }
    sum
}
