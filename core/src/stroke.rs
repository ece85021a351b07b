//! Chord and stroke value types.
//!
//! A `Chord` is one physical press of keys, written the way Plover
//! dictionaries write it (`KPA`, `-T`, `TPHAO`). A `Stroke` is the ordered
//! sequence of chords that produces a piece of text; in dictionary files it is
//! written with `/` between chords (`TPHU/KWRORBG`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One chord of simultaneously pressed keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chord(pub(crate) String);

impl Chord {
    /// Create a chord from its written form. Returns `None` for empty text or
    /// text containing a chord separator or whitespace.
    pub fn new<T: Into<String>>(keys: T) -> Option<Self> {
        let keys = keys.into();
        if keys.is_empty() || keys.chars().any(|c| c == '/' || c.is_whitespace()) {
            return None;
        }
        Some(Self(keys))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of keys written in this chord.
    ///
    /// Every written character counts, including the `-` that disambiguates
    /// right-bank keys, so `-T` counts as two.
    pub fn key_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered sequence of chords.
///
/// Ordering is lexicographic over chords, which gives the resolver a total,
/// deterministic tiebreak.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke(Vec<Chord>);

impl Stroke {
    pub fn new(chords: Vec<Chord>) -> Self {
        Self(chords)
    }

    /// Parse the dictionary form `CHORD/CHORD/...`.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidStroke(text.to_string()));
        }
        text.split('/')
            .map(|part| Chord::new(part).ok_or_else(|| Error::InvalidStroke(text.to_string())))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn chords(&self) -> &[Chord] {
        &self.0
    }

    /// Number of chords.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total keys across all chords.
    pub fn key_count(&self) -> usize {
        self.0.iter().map(Chord::key_count).sum()
    }

    /// A new stroke made of `self` followed by `other`.
    pub fn concat(&self, other: &Stroke) -> Stroke {
        let mut chords = Vec::with_capacity(self.len() + other.len());
        chords.extend_from_slice(&self.0);
        chords.extend_from_slice(&other.0);
        Stroke(chords)
    }
}

impl FromStr for Stroke {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stroke::parse(s)
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chord) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(chord.as_str())?;
        }
        Ok(())
    }
}

impl FromIterator<Chord> for Stroke {
    fn from_iter<I: IntoIterator<Item = Chord>>(iter: I) -> Self {
        Stroke(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let s = Stroke::parse("TPHU/KWRORBG").unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.chords()[0].as_str(), "TPHU");
        assert_eq!(s.to_string(), "TPHU/KWRORBG");
    }

    #[test]
    fn key_count_counts_written_characters() {
        let s = Stroke::parse("KPA/-T").unwrap();
        assert_eq!(s.key_count(), 5);
    }

    #[test]
    fn parse_rejects_empty_chords() {
        assert!(Stroke::parse("").is_err());
        assert!(Stroke::parse("KAT//HAT").is_err());
        assert!(Stroke::parse("/KAT").is_err());
    }

    #[test]
    fn concat_keeps_order() {
        let cap = Stroke::parse("KPA").unwrap();
        let cat = Stroke::parse("K/A/T").unwrap();
        assert_eq!(cap.concat(&cat).to_string(), "KPA/K/A/T");
    }

    #[test]
    fn serializes_as_chord_list() {
        let s = Stroke::parse("KPA/KAT").unwrap();
        assert_eq!(serde_json::to_string(&s).unwrap(), r#"["KPA","KAT"]"#);
    }
}
