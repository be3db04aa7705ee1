//! Reading and writing persisted gesture sets.
//!
//! Two wire formats coexist for backward compatibility: pretty-printed
//! JSON is the canonical format written on save, and RON is still accepted
//! on load for sets exported by older tooling. Readers are tried in order
//! until one parses; only when every format fails is the file reported as
//! unreadable.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::gesture::Gesture;
use crate::training_set::{TrainingSet, TrainingSetError};

/// Failures while loading or saving a gesture set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// None of the supported formats could parse the file.
    #[error("gesture file matches no supported format ({tried})")]
    UnknownFormat { tried: String },
    /// A stored gesture failed training-set validation.
    #[error("rejected stored gesture at index {index}")]
    InvalidGesture {
        index: usize,
        #[source]
        source: TrainingSetError,
    },
    #[error("failed to encode gesture set")]
    Encode(#[source] serde_json::Error),
}

/// Format readers, in the order they are tried. Canonical format first.
const READERS: &[(&str, fn(&str) -> Result<Vec<Gesture>, String>)] =
    &[("json", read_json), ("ron", read_ron)];

fn read_json(text: &str) -> Result<Vec<Gesture>, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

fn read_ron(text: &str) -> Result<Vec<Gesture>, String> {
    ron::from_str(text).map_err(|e| e.to_string())
}

/// Loads a training set from `path`.
///
/// A missing file is the normal cold-start state and yields an empty set.
/// Gestures are validated on the way in; a stored gesture with no label or
/// no points fails the load rather than poisoning later classification.
pub fn read_gestures(path: impl AsRef<Path>) -> Result<TrainingSet, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no gesture file yet, starting empty");
        return Ok(TrainingSet::new());
    }

    let text = fs::read_to_string(path)?;
    let mut failures = Vec::with_capacity(READERS.len());
    for (format, read) in READERS {
        match read(&text) {
            Ok(gestures) => {
                debug!(count = gestures.len(), format, "loaded gesture set");
                return validated(gestures);
            }
            Err(err) => failures.push(format!("{format}: {err}")),
        }
    }
    Err(LoadError::UnknownFormat {
        tried: failures.join("; "),
    })
}

fn validated(gestures: Vec<Gesture>) -> Result<TrainingSet, LoadError> {
    let mut set = TrainingSet::new();
    for (index, gesture) in gestures.into_iter().enumerate() {
        set.push(gesture)
            .map_err(|source| LoadError::InvalidGesture { index, source })?;
    }
    Ok(set)
}

/// Saves a training set to `path` in the canonical format.
///
/// Only raw points and labels are persisted; normalized clouds are
/// recomputed after loading.
pub fn save_gestures(path: impl AsRef<Path>, set: &TrainingSet) -> Result<(), LoadError> {
    let text = serde_json::to_string_pretty(set.gestures()).map_err(LoadError::Encode)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use std::path::PathBuf;

    struct TempFile(PathBuf);

    impl TempFile {
        fn new(name: &str) -> Self {
            Self(std::env::temp_dir().join(format!("stroke-recognizer-{name}")))
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    fn sample_set() -> TrainingSet {
        let mut set = TrainingSet::new();
        set.push(Gesture::new(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)],
            "swipe",
        ))
        .unwrap();
        set.push(Gesture::new(
            vec![
                Point::new(3.0, 1.0),
                Point::new(4.0, 8.0),
                Point::new(9.0, 2.0),
            ],
            "vee",
        ))
        .unwrap();
        set
    }

    #[test]
    fn round_trips_through_canonical_format() {
        let file = TempFile::new("roundtrip.json");
        let set = sample_set();

        save_gestures(&file.0, &set).unwrap();
        let loaded = read_gestures(&file.0).unwrap();

        assert_eq!(loaded.len(), set.len());
        for (a, b) in loaded.iter().zip(set.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.points, b.points);
        }
    }

    #[test]
    fn reads_legacy_ron_files() {
        let file = TempFile::new("legacy.ron");
        let set = sample_set();
        let text = ron::to_string(&set.gestures().to_vec()).unwrap();
        fs::write(&file.0, text).unwrap();

        let loaded = read_gestures(&file.0).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.gestures()[0].name, "swipe");
    }

    #[test]
    fn missing_file_is_an_empty_set() {
        let set = read_gestures("/nonexistent/gestures.json").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn unreadable_content_names_every_format_tried() {
        let file = TempFile::new("garbage.json");
        fs::write(&file.0, "definitely not a gesture file").unwrap();

        match read_gestures(&file.0) {
            Err(LoadError::UnknownFormat { tried }) => {
                assert!(tried.contains("json:"));
                assert!(tried.contains("ron:"));
            }
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
    }

    #[test]
    fn stored_gestures_without_labels_are_rejected() {
        let file = TempFile::new("unlabeled.json");
        fs::write(
            &file.0,
            r#"[{"name": "", "points": [{"x": 1.0, "y": 2.0}]}]"#,
        )
        .unwrap();

        match read_gestures(&file.0) {
            Err(LoadError::InvalidGesture { index, .. }) => assert_eq!(index, 0),
            other => panic!("expected InvalidGesture, got {other:?}"),
        }
    }

    #[test]
    fn points_without_z_load_as_2d() {
        let file = TempFile::new("legacy-2d.json");
        fs::write(
            &file.0,
            r#"[{"name": "tap", "points": [{"x": 1.0, "y": 2.0}]}]"#,
        )
        .unwrap();

        let loaded = read_gestures(&file.0).unwrap();
        assert_eq!(loaded.gestures()[0].points[0], Point::new(1.0, 2.0));
    }
}
