//! steno-lookup-core
//!
//! Finds the strokes that write a piece of text, given a steno dictionary
//! that can answer reverse lookups (text → strokes).
//!
//! Pipeline: `tokenizer` → `solver` (asks `resolver` for each candidate
//! prefix) → `ranking` → caller. `engine::Engine` wraps the pipeline with
//! input normalization, bounds and a result cache.
//!
//! Public API:
//! - `Stroke`, `Chord` - stroke value types
//! - `tokenize` - text → tokens
//! - `ReverseLookup` - the one capability the solver needs from a dictionary
//! - `StenoDictionary`, `DictionaryStack` - in-memory dictionaries
//! - `PhraseResolver` - ranked strokes for one phrase
//! - `Solver` - all segmentations of a token sequence
//! - `rank` - order segmentations by effort
//! - `Engine` - cached end-to-end lookups
//! - `Config` - TOML-backed configuration
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod stroke;
pub use stroke::{Chord, Stroke};

pub mod tokenizer;
pub use tokenizer::{join_tokens, tokenize, Token, TokenKind};

pub mod dictionary;
pub use dictionary::{DictionaryStack, ReverseLookup, StenoDictionary};

pub mod resolver;
pub use resolver::{MatchKind, PhraseResolver, RankedStroke, ResolverOptions};

pub mod segmentation;
pub use segmentation::{Cost, Segment, Segmentation};

pub mod solver;
pub use solver::{SolveStats, Solver, SolverOptions};

pub mod ranking;
pub use ranking::{is_ranked, rank};

pub mod engine;
pub use engine::{Engine, Lookup};

/// Plover's "capitalize next word" stroke.
pub const CAPITALIZE_NEXT: &str = "KPA";

/// Configuration for lookups.
///
/// Every field has a default, so a TOML file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Stroke prepended to a lowercase match to capitalize it, written in
    /// dictionary form (`KPA`, or several chords joined by `/`).
    pub capitalization_stroke: String,

    /// Look up a lone symbol such as `!` as its command form `{!}` as well.
    pub command_lookup: bool,

    /// Compose numbers from per-digit strokes when the dictionary has no
    /// entry for the whole number.
    pub numeric_composition: bool,

    /// NFC-normalize input text before tokenizing.
    pub normalize_unicode: bool,

    /// Reuse solver results for repeated token suffixes within one lookup.
    pub memoize: bool,

    /// Longest phrase, in tokens, the solver tries as one segment. Unset uses
    /// the dictionary's own longest entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_phrase_tokens: Option<usize>,

    /// Reject inputs with more tokens than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_tokens: Option<usize>,

    /// Keep only this many ranked segmentations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,

    /// Entries in the engine's result cache. 0 disables caching.
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capitalization_stroke: CAPITALIZE_NEXT.to_string(),
            command_lookup: true,
            numeric_composition: true,
            normalize_unicode: true,
            memoize: true,
            max_phrase_tokens: None,
            max_input_tokens: None,
            max_results: None,
            max_cache_size: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check fields that need parsing.
    pub fn validate(&self) -> Result<()> {
        Stroke::parse(&self.capitalization_stroke)?;
        Ok(())
    }
}

/// Look up `text` with default options: every segmentation, best first.
///
/// # Example
/// ```
/// use steno_lookup_core::{lookup, StenoDictionary, Stroke};
///
/// let mut dict = StenoDictionary::new();
/// dict.insert(Stroke::parse("KAT").unwrap(), "cat");
/// dict.insert(Stroke::parse("HAT").unwrap(), "hat");
///
/// let results = lookup(&dict, "cat hat");
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].strokes().to_string(), "KAT/HAT");
/// ```
pub fn lookup<D: ReverseLookup + ?Sized>(dictionary: &D, text: &str) -> Vec<Segmentation> {
    let tokens = tokenize(text);
    let mut solver = Solver::new(dictionary, SolverOptions::default());
    rank(solver.solve(&tokens))
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrips_through_toml() {
        let cfg = Config::default();
        let text = cfg.to_toml_string().unwrap();
        assert!(text.contains("capitalization_stroke = \"KPA\""));
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = Config::from_toml_str("numeric_composition = false\nmax_results = 3\n").unwrap();
        assert!(!cfg.numeric_composition);
        assert_eq!(cfg.max_results, Some(3));
        assert_eq!(cfg.capitalization_stroke, CAPITALIZE_NEXT);
    }

    #[test]
    fn toml_with_bad_stroke_fails_validation() {
        let err = Config::from_toml_str("capitalization_stroke = \"\"").unwrap_err();
        assert!(matches!(err, Error::InvalidStroke(_)));
    }

    #[test]
    fn save_and_load_toml() {
        let tmp = std::env::temp_dir().join(format!(
            "steno_lookup_config_{}.toml",
            std::process::id()
        ));
        let cfg = Config {
            max_input_tokens: Some(40),
            ..Config::default()
        };
        cfg.save_toml(&tmp).unwrap();
        assert_eq!(Config::load_toml(&tmp).unwrap(), cfg);
        let _ = std::fs::remove_file(tmp);
    }

    #[test]
    fn normalize_composes_and_trims() {
        assert_eq!(utils::normalize("  cafe\u{301} "), "café");
    }
}
