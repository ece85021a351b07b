// core/src/engine.rs
//
// Lookup engine: normalize → tokenize → solve → rank, with an LRU cache of
// finished results keyed by the normalized input text.
//
// Each call builds its own `Solver` (and memo table). The cache only holds
// ranked final results for the engine's own, immutable dictionary.

use std::cell::{Cell, RefCell};
use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dictionary::ReverseLookup;
use crate::error::{Error, Result};
use crate::ranking::rank;
use crate::segmentation::Segmentation;
use crate::solver::{Solver, SolverOptions};
use crate::tokenizer::{tokenize, Token};
use crate::{utils, Config};

/// Result of looking up one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    /// The text after normalization.
    pub text: String,
    pub tokens: Vec<Token>,
    /// Ranked segmentations, best first. Empty when the text cannot be
    /// written with the dictionary.
    pub segmentations: Vec<Segmentation>,
    /// Single words that had no strokes. Informational only: a word listed
    /// here may still be covered by a longer phrase.
    pub unmatched: Vec<String>,
}

impl Lookup {
    pub fn best(&self) -> Option<&Segmentation> {
        self.segmentations.first()
    }

    /// True when no segmentation was found.
    pub fn is_empty(&self) -> bool {
        self.segmentations.is_empty()
    }
}

/// Lookup engine over a dictionary `D`.
///
/// The cache sits behind a `RefCell`, so an engine is used from one thread
/// at a time. For parallel lookups, give each thread its own engine over a
/// shared `Arc` dictionary.
pub struct Engine<D> {
    dictionary: D,
    config: Config,
    options: SolverOptions,
    cache: Option<RefCell<LruCache<String, Lookup>>>,
    cache_hits: Cell<usize>,
    cache_misses: Cell<usize>,
}

impl<D: ReverseLookup> Engine<D> {
    /// Create an engine. Fails if the config holds an invalid stroke.
    pub fn new(dictionary: D, config: Config) -> Result<Self> {
        let options = SolverOptions::from_config(&config)?;
        let cache = NonZeroUsize::new(config.max_cache_size)
            .map(|cap| RefCell::new(LruCache::new(cap)));
        Ok(Self {
            dictionary,
            config,
            options,
            cache,
            cache_hits: Cell::new(0),
            cache_misses: Cell::new(0),
        })
    }

    /// Create an engine with the default config.
    pub fn with_defaults(dictionary: D) -> Self {
        Self {
            dictionary,
            config: Config::default(),
            options: SolverOptions::default(),
            cache: NonZeroUsize::new(Config::default().max_cache_size)
                .map(|cap| RefCell::new(LruCache::new(cap))),
            cache_hits: Cell::new(0),
            cache_misses: Cell::new(0),
        }
    }

    /// Find every way to write `text`, best first.
    ///
    /// Fails only when `text` has more tokens than `max_input_tokens`. Text
    /// that cannot be written yields an empty `segmentations` list.
    pub fn lookup(&self, text: &str) -> Result<Lookup> {
        let text = if self.config.normalize_unicode {
            utils::normalize(text)
        } else {
            text.to_string()
        };

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.borrow_mut().get(&text) {
                self.cache_hits.set(self.cache_hits.get() + 1);
                return Ok(hit.clone());
            }
        }

        let tokens = tokenize(&text);
        if let Some(limit) = self.config.max_input_tokens {
            if tokens.len() > limit {
                return Err(Error::InputTooLong {
                    tokens: tokens.len(),
                    limit,
                });
            }
        }
        if self.cache.is_some() {
            self.cache_misses.set(self.cache_misses.get() + 1);
        }

        let mut solver = Solver::new(&self.dictionary, self.options.clone());
        let mut segmentations = rank(solver.solve(&tokens));
        let unmatched = solver.unmatched().to_vec();
        let stats = solver.stats();
        debug!(
            text = %text,
            tokens = tokens.len(),
            results = segmentations.len(),
            phrases = stats.phrases_resolved,
            suffixes = stats.suffixes_solved,
            memo_hits = stats.memo_hits,
            "lookup finished"
        );

        if let Some(max) = self.config.max_results {
            segmentations.truncate(max);
        }

        let lookup = Lookup {
            text,
            tokens,
            segmentations,
            unmatched,
        };
        if let Some(cache) = &self.cache {
            cache.borrow_mut().put(lookup.text.clone(), lookup.clone());
        }
        Ok(lookup)
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// (hits, misses) since creation or the last `clear_cache`.
    pub fn cache_stats(&self) -> (usize, usize) {
        (self.cache_hits.get(), self.cache_misses.get())
    }

    /// Hit rate in percent, `None` before the first cached lookup.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some(hits as f32 / total as f32 * 100.0)
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.borrow().len())
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.borrow().cap().get())
    }

    /// Drop cached results and reset hit/miss counters.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.borrow_mut().clear();
        }
        self.cache_hits.set(0);
        self.cache_misses.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::StenoDictionary;

    #[test]
    fn lookup_ranks_and_reports() {
        let engine = Engine::with_defaults(StenoDictionary::load_demo());
        let res = engine.lookup("New York").unwrap();
        assert_eq!(res.segmentations.len(), 2);
        assert_eq!(res.best().unwrap().strokes().to_string(), "TPHAORBG");
        assert!(res.unmatched.is_empty());
    }

    #[test]
    fn cache_counts_hits_and_misses() {
        let engine = Engine::with_defaults(StenoDictionary::load_demo());
        engine.lookup("cat").unwrap();
        engine.lookup("cat").unwrap();
        engine.lookup("hat").unwrap();
        assert_eq!(engine.cache_stats(), (1, 2));
        assert_eq!(engine.cache_size(), 2);
        engine.clear_cache();
        assert_eq!(engine.cache_stats(), (0, 0));
        assert_eq!(engine.cache_size(), 0);
        assert_eq!(engine.cache_hit_rate(), None);
    }

    #[test]
    fn zero_capacity_disables_cache() {
        let config = Config {
            max_cache_size: 0,
            ..Config::default()
        };
        let engine = Engine::new(StenoDictionary::load_demo(), config).unwrap();
        engine.lookup("cat").unwrap();
        engine.lookup("cat").unwrap();
        assert_eq!(engine.cache_stats(), (0, 0));
        assert_eq!(engine.cache_capacity(), 0);
    }

    #[test]
    fn input_token_limit() {
        let config = Config {
            max_input_tokens: Some(2),
            ..Config::default()
        };
        let engine = Engine::new(StenoDictionary::load_demo(), config).unwrap();
        assert!(engine.lookup("cat hat").is_ok());
        let err = engine.lookup("cat hat cat").unwrap_err();
        assert!(matches!(err, Error::InputTooLong { tokens: 3, limit: 2 }));
    }

    #[test]
    fn rejected_input_is_not_a_cache_miss() {
        let config = Config {
            max_input_tokens: Some(2),
            ..Config::default()
        };
        let engine = Engine::new(StenoDictionary::load_demo(), config).unwrap();
        assert!(engine.lookup("cat hat cat").is_err());
        assert!(engine.lookup("cat hat cat").is_err());
        assert_eq!(engine.cache_stats(), (0, 0));
        assert_eq!(engine.cache_size(), 0);

        engine.lookup("cat hat").unwrap();
        assert_eq!(engine.cache_stats(), (0, 1));
    }

    #[test]
    fn max_results_truncates_after_ranking() {
        let config = Config {
            max_results: Some(1),
            ..Config::default()
        };
        let engine = Engine::new(StenoDictionary::load_demo(), config).unwrap();
        let res = engine.lookup("New York").unwrap();
        assert_eq!(res.segmentations.len(), 1);
        assert_eq!(res.segmentations[0].text(), "New York");
        assert_eq!(res.segmentations[0].len(), 1);
    }

    #[test]
    fn invalid_capitalization_stroke_is_rejected() {
        let config = Config {
            capitalization_stroke: "KPA//".into(),
            ..Config::default()
        };
        assert!(matches!(
            Engine::new(StenoDictionary::new(), config),
            Err(Error::InvalidStroke(_))
        ));
    }
}
