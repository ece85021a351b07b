//! Segments and segmentations: the solver's output types.

use serde::{Deserialize, Serialize};

use crate::stroke::Stroke;

/// One phrase of the input and the stroke chosen to write it.
///
/// Serializes as `{"text": "...", "steno": ["CHORD", ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub steno: Stroke,
}

impl Segment {
    pub fn new<T: Into<String>>(text: T, steno: Stroke) -> Self {
        Self {
            text: text.into(),
            steno,
        }
    }
}

/// Effort needed to write a segmentation. Orders by strokes, then keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cost {
    /// Total chords across all segments.
    pub strokes: usize,
    /// Total keys across all chords.
    pub keys: usize,
}

/// A complete, gap-free partition of the input tokens into segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segmentation(Vec<Segment>);

impl Segmentation {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new segmentation with `segment` in front.
    pub fn prepend(&self, segment: Segment) -> Segmentation {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.push(segment);
        segments.extend_from_slice(&self.0);
        Segmentation(segments)
    }

    pub fn stroke_count(&self) -> usize {
        self.0.iter().map(|s| s.steno.len()).sum()
    }

    pub fn key_count(&self) -> usize {
        self.0.iter().map(|s| s.steno.key_count()).sum()
    }

    pub fn cost(&self) -> Cost {
        Cost {
            strokes: self.stroke_count(),
            keys: self.key_count(),
        }
    }

    /// Segment phrases joined with single spaces.
    pub fn text(&self) -> String {
        self.0
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<&str>>()
            .join(" ")
    }

    /// All chords in writing order.
    pub fn strokes(&self) -> Stroke {
        self.0
            .iter()
            .flat_map(|s| s.steno.chords().iter().cloned())
            .collect()
    }
}

impl IntoIterator for Segmentation {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
