//! End-to-end walk-through of the recognition pipeline, without a GUI:
//! load (or seed) a training set, smooth a synthetic noisy capture,
//! classify it, and persist the set.
//!
//! Run with `cargo run --example recognize`; set `RUST_LOG=debug` for the
//! recognizer's trace output.

use std::f32::consts::TAU;

use stroke_recognizer::catmull_rom::{self, DEFAULT_ALPHA, DEFAULT_SPACING};
use stroke_recognizer::gesture::Gesture;
use stroke_recognizer::loader;
use stroke_recognizer::point::Point;
use stroke_recognizer::point_cloud_recognizer as recognizer;
use stroke_recognizer::training_set::TrainingSet;
use tracing_subscriber::EnvFilter;

const GESTURE_FILE: &str = "gestures.json";

/// Rankings whose best score exceeds this are reported as "no match".
/// Acceptance is caller policy, not part of the classifier.
const ACCEPT_THRESHOLD: f32 = 0.12;

fn circle(n: usize, radius: f32, cx: f32, cy: f32) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = i as f32 / n as f32 * TAU;
            Point::new(cx + radius * a.cos(), cy + radius * a.sin())
        })
        .collect()
}

fn line(n: usize, from: Point, to: Point) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            from + (to - from) * t
        })
        .collect()
}

/// A jittery, sparsely sampled near-circle, shaped like what the timer
/// polling hands over after a real mouse stroke.
fn noisy_capture() -> Vec<Point> {
    (0..10)
        .map(|i| {
            let a = i as f32 / 10.0 * TAU;
            let r = 80.0 * (1.0 + 0.07 * (7.0 * a).sin());
            Point::new(240.0 + r * a.cos(), 180.0 + r * a.sin())
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut training = loader::read_gestures(GESTURE_FILE)?;
    if training.is_empty() {
        println!("seeding a fresh training set");
        training.push(Gesture::new(circle(16, 80.0, 0.0, 0.0), "circle"))?;
        training.push(Gesture::new(
            line(8, Point::new(0.0, 0.0), Point::new(200.0, 0.0)),
            "line",
        ))?;
    }

    let raw = noisy_capture();
    let smoothed = catmull_rom::smooth(&raw, DEFAULT_SPACING, DEFAULT_ALPHA);
    println!(
        "captured {} raw samples, smoothed to {} points",
        raw.len(),
        smoothed.len()
    );

    let query = Gesture::unlabeled(smoothed);
    let ranking = recognizer::classify(&query, training.gestures())?;
    for result in &ranking {
        println!("  {:>10}  {:.4}", result.class, result.score);
    }

    match ranking.first() {
        Some(best) if best.score <= ACCEPT_THRESHOLD => {
            println!("recognized: {}", best.class);
        }
        Some(best) => println!("no match (best distance {:.3})", best.score),
        None => println!("training set is empty, nothing to compare against"),
    }

    loader::save_gestures(GESTURE_FILE, &training)?;
    Ok(())
}
