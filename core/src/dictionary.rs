//! Dictionary capability used by the solver.
//!
//! The solver only ever asks one question of a dictionary: which strokes
//! write this phrase? That question is the `ReverseLookup` trait. Two
//! implementations live here:
//! - `StenoDictionary`: in-memory stroke → translation map with a reverse
//!   index, loadable from Plover's JSON dictionary format
//! - `DictionaryStack`: several dictionaries in priority order, where a
//!   higher dictionary that redefines a stroke hides the lower definition
//!
//! Notes:
//! - Translations are stored verbatim; the reverse index is keyed by their
//!   NFC form, so composed and decomposed spellings find the same strokes.
//! - Plover formatting such as `{,}` or
//!   `{-|}` is not interpreted; the resolver asks for the bracketed form
//!   explicitly when it wants a command.
//! - `longest_phrase` is measured in tokens and is only a performance bound
//!   for the solver. `None` means "unknown", which the solver treats as
//!   unbounded.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::stroke::Stroke;
use crate::tokenizer::tokenize;

/// Reverse lookup: phrase text → every stroke that writes it.
pub trait ReverseLookup {
    /// All strokes whose translation is exactly `phrase`. Order is not
    /// significant; an empty set means no entry.
    fn reverse_lookup(&self, phrase: &str) -> HashSet<Stroke>;

    /// The longest phrase, in tokens, that `reverse_lookup` can match.
    fn longest_phrase(&self) -> Option<usize> {
        None
    }
}

impl<T: ReverseLookup + ?Sized> ReverseLookup for &T {
    fn reverse_lookup(&self, phrase: &str) -> HashSet<Stroke> {
        (**self).reverse_lookup(phrase)
    }

    fn longest_phrase(&self) -> Option<usize> {
        (**self).longest_phrase()
    }
}

impl<T: ReverseLookup + ?Sized> ReverseLookup for Box<T> {
    fn reverse_lookup(&self, phrase: &str) -> HashSet<Stroke> {
        (**self).reverse_lookup(phrase)
    }

    fn longest_phrase(&self) -> Option<usize> {
        (**self).longest_phrase()
    }
}

impl<T: ReverseLookup + ?Sized> ReverseLookup for Rc<T> {
    fn reverse_lookup(&self, phrase: &str) -> HashSet<Stroke> {
        (**self).reverse_lookup(phrase)
    }

    fn longest_phrase(&self) -> Option<usize> {
        (**self).longest_phrase()
    }
}

impl<T: ReverseLookup + ?Sized> ReverseLookup for Arc<T> {
    fn reverse_lookup(&self, phrase: &str) -> HashSet<Stroke> {
        (**self).reverse_lookup(phrase)
    }

    fn longest_phrase(&self) -> Option<usize> {
        (**self).longest_phrase()
    }
}

/// In-memory steno dictionary.
///
/// Keeps the forward map (stroke → translation) plus a reverse index
/// (translation → strokes) that is updated on every insert and remove.
#[derive(Debug, Clone, Default)]
pub struct StenoDictionary {
    entries: BTreeMap<Stroke, String>,
    reverse: HashMap<String, BTreeSet<Stroke>>,
    /// Histogram of translation lengths in tokens (length → entry count).
    phrase_lengths: BTreeMap<usize, usize>,
    /// Histogram of stroke lengths in chords (length → entry count).
    stroke_lengths: BTreeMap<usize, usize>,
}

impl StenoDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `stroke` as writing `translation`, replacing any previous
    /// definition of that stroke.
    pub fn insert<T: Into<String>>(&mut self, stroke: Stroke, translation: T) {
        let translation = translation.into();
        self.remove(&stroke);

        bump(&mut self.phrase_lengths, phrase_len(&translation));
        bump(&mut self.stroke_lengths, stroke.len());
        self.reverse
            .entry(index_key(&translation))
            .or_default()
            .insert(stroke.clone());
        self.entries.insert(stroke, translation);
    }

    /// Remove the definition of `stroke`, returning its translation.
    pub fn remove(&mut self, stroke: &Stroke) -> Option<String> {
        let translation = self.entries.remove(stroke)?;
        drop_one(&mut self.phrase_lengths, phrase_len(&translation));
        drop_one(&mut self.stroke_lengths, stroke.len());
        let key = index_key(&translation);
        if let Some(strokes) = self.reverse.get_mut(&key) {
            strokes.remove(stroke);
            if strokes.is_empty() {
                self.reverse.remove(&key);
            }
        }
        Some(translation)
    }

    /// Forward lookup.
    pub fn lookup(&self, stroke: &Stroke) -> Option<&str> {
        self.entries.get(stroke).map(String::as_str)
    }

    pub fn contains(&self, stroke: &Stroke) -> bool {
        self.entries.contains_key(stroke)
    }

    /// Strokes writing `translation` (compared in NFC), in stroke order.
    pub fn strokes_for(&self, translation: &str) -> impl Iterator<Item = &Stroke> {
        self.reverse.get(&index_key(translation)).into_iter().flatten()
    }

    /// Longest stroke in chords, 0 when empty.
    pub fn longest_stroke(&self) -> usize {
        self.stroke_lengths.keys().next_back().copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Stroke, &str)> {
        self.entries.iter().map(|(s, t)| (s, t.as_str()))
    }

    /// Number of strokes defined.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a Plover JSON dictionary: an object mapping `"CHORD/CHORD"` keys
    /// to translation strings.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut dict = Self::new();
        for (key, translation) in raw {
            dict.insert(Stroke::parse(&key)?, translation);
        }
        Ok(dict)
    }

    /// Load a Plover JSON dictionary file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize back to Plover JSON, keys in stroke order.
    pub fn to_json_string(&self) -> Result<String> {
        let raw: BTreeMap<String, &str> = self
            .entries
            .iter()
            .map(|(s, t)| (s.to_string(), t.as_str()))
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    /// Small built-in dictionary for smoke-testing and the CLI fallback.
    pub fn load_demo() -> Self {
        const DEMO: &[(&str, &str)] = &[
            ("KAT", "cat"),
            ("HAT", "hat"),
            ("-T", "the"),
            ("SKP", "and"),
            ("EU", "I"),
            ("A", "a"),
            ("TPHU", "New"),
            ("KWRORBG", "York"),
            ("TPHAORBG", "New York"),
            ("TPHAORBG/STEU", "New York City"),
            ("STEU", "city"),
            ("TKOPBT", "don't"),
            ("HEL/HRO", "hello"),
            ("WORLD", "world"),
            ("KW-BG", "{,}"),
            ("TP-PL", "{.}"),
            ("TP-BG", "{!}"),
            ("H-F", "{?}"),
            ("KPA", "{-|}"),
            ("#O", "0"),
            ("#S", "1"),
            ("#T-", "2"),
            ("#P-", "3"),
            ("#H", "4"),
            ("#A", "5"),
            ("#F", "6"),
            ("#-P", "7"),
            ("#L", "8"),
            ("#-T", "9"),
        ];
        let mut dict = Self::new();
        for (stroke, translation) in DEMO {
            if let Ok(stroke) = Stroke::parse(stroke) {
                dict.insert(stroke, *translation);
            }
        }
        dict
    }
}

impl ReverseLookup for StenoDictionary {
    fn reverse_lookup(&self, phrase: &str) -> HashSet<Stroke> {
        self.strokes_for(phrase).cloned().collect()
    }

    fn longest_phrase(&self) -> Option<usize> {
        self.phrase_lengths.keys().next_back().copied()
    }
}

/// Dictionaries in priority order, highest first.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStack {
    dictionaries: Vec<StenoDictionary>,
}

impl DictionaryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack from dictionaries listed highest priority first.
    pub fn from_dictionaries(dictionaries: Vec<StenoDictionary>) -> Self {
        Self { dictionaries }
    }

    /// Add a dictionary below every existing one.
    pub fn push(&mut self, dictionary: StenoDictionary) {
        self.dictionaries.push(dictionary);
    }

    pub fn dictionaries(&self) -> &[StenoDictionary] {
        &self.dictionaries
    }

    /// Forward lookup through the stack: the highest definition wins.
    pub fn lookup(&self, stroke: &Stroke) -> Option<&str> {
        self.dictionaries.iter().find_map(|d| d.lookup(stroke))
    }

    pub fn longest_stroke(&self) -> usize {
        self.dictionaries
            .iter()
            .map(StenoDictionary::longest_stroke)
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }
}

impl ReverseLookup for DictionaryStack {
    fn reverse_lookup(&self, phrase: &str) -> HashSet<Stroke> {
        let mut found = HashSet::new();
        for (idx, dict) in self.dictionaries.iter().enumerate() {
            let higher = &self.dictionaries[..idx];
            for stroke in dict.strokes_for(phrase) {
                if !higher.iter().any(|h| h.contains(stroke)) {
                    found.insert(stroke.clone());
                }
            }
        }
        found
    }

    fn longest_phrase(&self) -> Option<usize> {
        self.dictionaries
            .iter()
            .filter_map(StenoDictionary::longest_phrase)
            .max()
    }
}

/// Token length of a translation, never less than one so that translations
/// without word characters (e.g. a lone space) still count.
fn phrase_len(translation: &str) -> usize {
    tokenize(translation).len().max(1)
}

fn index_key(translation: &str) -> String {
    translation.nfc().collect()
}

fn bump(histogram: &mut BTreeMap<usize, usize>, len: usize) {
    *histogram.entry(len).or_insert(0) += 1;
}

fn drop_one(histogram: &mut BTreeMap<usize, usize>, len: usize) {
    if let Some(count) = histogram.get_mut(&len) {
        *count -= 1;
        if *count == 0 {
            histogram.remove(&len);
        }
    }
}

impl From<StenoDictionary> for DictionaryStack {
    fn from(dictionary: StenoDictionary) -> Self {
        Self::from_dictionaries(vec![dictionary])
    }
}
