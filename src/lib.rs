//! Trajectory-based gesture recognition.
//!
//! Turns a raw, noisy pointer capture into a smoothed stroke
//! ([`catmull_rom::smooth`]) and matches it against a set of labeled
//! example gestures ([`point_cloud_recognizer::classify`]), returning
//! every template ranked by a translation- and scale-invariant cloud
//! distance. The training "model" is literally the stored example
//! strokes; there is no learning step.
//!
//! Both entry points are pure functions over immutable inputs: they touch
//! no shared state and are safe to call concurrently as long as their
//! inputs are not mutated mid-call. A capture loop that appends to a
//! [`training_set::TrainingSet`] while classifying should hand the
//! classifier a cloned snapshot.
//!
//! With the `storage` feature (on by default), [`loader`] persists
//! gesture sets as JSON, still reading the older RON exports.

pub mod catmull_rom;
pub mod geometry;
pub mod gesture;
#[cfg(feature = "storage")]
pub mod loader;
pub mod point;
pub mod point_cloud_recognizer;
pub mod training_set;
