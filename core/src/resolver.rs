//! Phrase candidate resolver.
//!
//! Turns one phrase into the ranked list of strokes that can write it. Four
//! sources are consulted, in this order:
//! 1. the phrase exactly as given
//! 2. for a lone symbol such as `!`, the command form `{!}`
//! 3. the lowercase form, with the capitalization stroke prepended
//! 4. per-digit composition for numbers (`15` → stroke for `1` + stroke for `5`)
//!
//! Exact and command matches always rank ahead of derived ones. Within a
//! class, fewer chords wins, then fewer keys, then stroke order.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::dictionary::ReverseLookup;
use crate::error::Result;
use crate::stroke::{Chord, Stroke};
use crate::tokenizer::is_decimal_digit;
use crate::{Config, CAPITALIZE_NEXT};

/// Where a candidate stroke came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Dictionary entry for the phrase as written.
    Exact,
    /// Dictionary entry for the bracketed command form of a symbol.
    Command,
    /// Lowercase entry behind the capitalization stroke.
    Capitalized,
    /// Concatenated per-digit strokes.
    Numeric,
}

impl MatchKind {
    /// Exact and command matches outrank everything derived.
    pub fn is_priority(self) -> bool {
        matches!(self, MatchKind::Exact | MatchKind::Command)
    }
}

/// A candidate stroke with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStroke {
    pub stroke: Stroke,
    pub kind: MatchKind,
}

/// Options controlling which fallbacks the resolver tries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Stroke prepended to lowercase matches to capitalize the next word.
    pub capitalization: Stroke,
    /// Try `{x}` for single non-alphanumeric characters.
    pub command_lookup: bool,
    /// Compose numbers digit by digit.
    pub numeric_composition: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            capitalization: Stroke::new(vec![Chord(CAPITALIZE_NEXT.to_string())]),
            command_lookup: true,
            numeric_composition: true,
        }
    }
}

impl ResolverOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            capitalization: Stroke::parse(&config.capitalization_stroke)?,
            command_lookup: config.command_lookup,
            numeric_composition: config.numeric_composition,
        })
    }
}

/// Resolves phrases against a borrowed dictionary.
pub struct PhraseResolver<'d, D: ?Sized> {
    dictionary: &'d D,
    options: ResolverOptions,
}

impl<'d, D: ReverseLookup + ?Sized> PhraseResolver<'d, D> {
    pub fn new(dictionary: &'d D, options: ResolverOptions) -> Self {
        Self {
            dictionary,
            options,
        }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Ranked strokes for `phrase`, best first, or `None` when nothing in the
    /// dictionary writes it.
    pub fn resolve(&self, phrase: &str) -> Option<Vec<RankedStroke>> {
        trace!(phrase, "resolve");

        // First insertion wins, so a stroke found by several sources keeps
        // its highest-priority origin.
        let mut found: HashMap<Stroke, MatchKind> = HashMap::new();

        for stroke in self.dictionary.reverse_lookup(phrase) {
            found.entry(stroke).or_insert(MatchKind::Exact);
        }

        if self.options.command_lookup && is_lone_symbol(phrase) {
            let command = format!("{{{phrase}}}");
            trace!(command = %command, "command lookup");
            for stroke in self.dictionary.reverse_lookup(&command) {
                found.entry(stroke).or_insert(MatchKind::Command);
            }
        }

        let lower = phrase.to_lowercase();
        if lower != phrase {
            for stroke in self.dictionary.reverse_lookup(&lower) {
                found
                    .entry(self.options.capitalization.concat(&stroke))
                    .or_insert(MatchKind::Capitalized);
            }
        }

        if self.options.numeric_composition {
            if let Some(stroke) = self.compose_digits(phrase) {
                found.entry(stroke).or_insert(MatchKind::Numeric);
            }
        }

        if found.is_empty() {
            if phrase.contains(' ') {
                debug!(phrase, "no strokes for phrase");
            } else {
                warn!(word = phrase, "no strokes for word");
            }
            return None;
        }

        let mut ranked: Vec<RankedStroke> = found
            .into_iter()
            .map(|(stroke, kind)| RankedStroke { stroke, kind })
            .collect();
        ranked.sort_by(|a, b| {
            (!a.kind.is_priority())
                .cmp(&!b.kind.is_priority())
                .then_with(|| by_effort(&a.stroke, &b.stroke))
        });
        Some(ranked)
    }

    /// Best stroke for `phrase`.
    pub fn best(&self, phrase: &str) -> Option<Stroke> {
        self.resolve(phrase)
            .and_then(|ranked| ranked.into_iter().next())
            .map(|r| r.stroke)
    }

    /// Write a number digit by digit, using the shortest stroke for each
    /// digit. Currency symbols and grouping commas are dropped first.
    fn compose_digits(&self, phrase: &str) -> Option<Stroke> {
        let digits: String = phrase
            .chars()
            .filter(|c| !matches!(c, '$' | '€' | '£' | ','))
            .collect();
        if digits.is_empty() || !digits.chars().all(is_decimal_digit) {
            return None;
        }

        let mut chords: Vec<Chord> = Vec::new();
        for digit in digits.chars() {
            let mut buf = [0u8; 4];
            let shortest = self
                .dictionary
                .reverse_lookup(digit.encode_utf8(&mut buf))
                .into_iter()
                .min_by(by_effort)?;
            chords.extend_from_slice(shortest.chords());
        }
        Some(Stroke::new(chords))
    }
}

/// Fewer chords, then fewer keys, then stroke order.
fn by_effort(a: &Stroke, b: &Stroke) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.key_count().cmp(&b.key_count()))
        .then_with(|| a.cmp(b))
}

fn is_lone_symbol(phrase: &str) -> bool {
    let mut chars = phrase.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::StenoDictionary;

    fn stroke(s: &str) -> Stroke {
        Stroke::parse(s).unwrap()
    }

    fn dict(entries: &[(&str, &str)]) -> StenoDictionary {
        let mut d = StenoDictionary::new();
        for (s, t) in entries {
            d.insert(stroke(s), *t);
        }
        d
    }

    fn strokes(ranked: &[RankedStroke]) -> Vec<String> {
        ranked.iter().map(|r| r.stroke.to_string()).collect()
    }

    #[test]
    fn exact_match_sorted_by_effort() {
        let d = dict(&[("KAT", "cat"), ("KA*T", "cat"), ("K/A/T", "cat")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        let ranked = r.resolve("cat").unwrap();
        assert_eq!(strokes(&ranked), ["KAT", "KA*T", "K/A/T"]);
        assert!(ranked.iter().all(|c| c.kind == MatchKind::Exact));
    }

    #[test]
    fn capitalized_fallback_prepends_cap_stroke() {
        let d = dict(&[("K/A/T", "cat")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        let ranked = r.resolve("Cat").unwrap();
        assert_eq!(strokes(&ranked), ["KPA/K/A/T"]);
        assert_eq!(ranked[0].kind, MatchKind::Capitalized);
    }

    #[test]
    fn exact_beats_shorter_capitalized() {
        let d = dict(&[("TPHU/KWRORBG/STKPWHR", "New"), ("TPHU", "new")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        let ranked = r.resolve("New").unwrap();
        assert_eq!(strokes(&ranked), ["TPHU/KWRORBG/STKPWHR", "KPA/TPHU"]);
    }

    #[test]
    fn lowercase_phrase_has_no_fallback() {
        let d = dict(&[("KAT", "Cat")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        assert!(r.resolve("cat").is_none());
    }

    #[test]
    fn command_form_for_lone_symbols() {
        let d = dict(&[("TP-BG", "{!}"), ("SKHRAPL", "!")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        let ranked = r.resolve("!").unwrap();
        assert_eq!(strokes(&ranked), ["TP-BG", "SKHRAPL"]);

        let off = ResolverOptions {
            command_lookup: false,
            ..ResolverOptions::default()
        };
        let r = PhraseResolver::new(&d, off);
        assert_eq!(strokes(&r.resolve("!").unwrap()), ["SKHRAPL"]);
    }

    #[test]
    fn command_form_not_tried_for_words() {
        let d = dict(&[("A", "{a}")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        assert!(r.resolve("a").is_none());
    }

    #[test]
    fn numeric_composition_uses_shortest_digit_strokes() {
        let d = dict(&[("#S", "1"), ("1-", "1"), ("#A", "5"), ("#A/#A", "5")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        let ranked = r.resolve("$1,5").unwrap();
        // "#S" and "1-" tie on effort; stroke order picks "#S".
        assert_eq!(strokes(&ranked), ["#S/#A"]);
        assert_eq!(ranked[0].kind, MatchKind::Numeric);
    }

    #[test]
    fn numeric_composition_accepts_other_scripts() {
        let d = dict(&[("#S", "\u{661}"), ("#A", "\u{665}")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        assert_eq!(r.best("\u{661}\u{665}"), Some(stroke("#S/#A")));
        // Numeric characters that are not decimal digits never compose.
        let d = dict(&[("#S", "\u{bd}")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        assert!(r.resolve("\u{bd}\u{bd}").is_none());
    }

    #[test]
    fn numeric_composition_needs_every_digit() {
        let d = dict(&[("#S", "1")]);
        let r = PhraseResolver::new(&d, ResolverOptions::default());
        assert!(r.resolve("12").is_none());
    }

    #[test]
    fn numeric_composition_can_be_disabled() {
        let d = dict(&[("#S", "1"), ("#A", "5")]);
        let off = ResolverOptions {
            numeric_composition: false,
            ..ResolverOptions::default()
        };
        let r = PhraseResolver::new(&d, off);
        assert!(r.resolve("15").is_none());
    }

    #[test]
    fn custom_capitalization_stroke() {
        let d = dict(&[("KAT", "cat")]);
        let opts = ResolverOptions {
            capitalization: stroke("KPA*"),
            ..ResolverOptions::default()
        };
        let r = PhraseResolver::new(&d, opts);
        assert_eq!(r.best("Cat"), Some(stroke("KPA*/KAT")));
    }
}
