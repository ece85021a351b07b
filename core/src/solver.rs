// core/src/solver.rs
//
// Recursive segmentation solver.
//
// For a token suffix, every prefix length from the longest allowed down to 1
// is tried. A prefix that resolves contributes its best stroke in front of
// every segmentation of the remaining suffix. All complete segmentations are
// kept (not only the locally best one) because the global ranking compares
// whole segmentations.
//
// The memo table maps an exact token suffix to its segmentations and lives
// inside one `Solver`, which is built for a single lookup and dropped after.

use std::collections::HashMap;

use tracing::debug;

use crate::dictionary::ReverseLookup;
use crate::error::Result;
use crate::resolver::{PhraseResolver, ResolverOptions};
use crate::segmentation::{Segment, Segmentation};
use crate::stroke::Stroke;
use crate::tokenizer::{join_tokens, Token};
use crate::Config;

/// Options for one solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOptions {
    pub resolver: ResolverOptions,
    /// Upper bound on prefix length in tokens. `None` uses the dictionary's
    /// own bound, or no bound if the dictionary does not report one.
    pub max_phrase_tokens: Option<usize>,
    /// Reuse results for repeated suffixes. Turning this off only costs time.
    pub memoize: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            resolver: ResolverOptions::default(),
            max_phrase_tokens: None,
            memoize: true,
        }
    }
}

impl SolverOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            resolver: ResolverOptions::from_config(config)?,
            max_phrase_tokens: config.max_phrase_tokens,
            memoize: config.memoize,
        })
    }
}

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Distinct phrases sent to the resolver.
    pub phrases_resolved: usize,
    /// Suffixes actually expanded.
    pub suffixes_solved: usize,
    /// Suffixes answered from the memo table.
    pub memo_hits: usize,
}

/// Single-use segmentation solver.
///
/// `'d` borrows the dictionary, `'t` borrows the token sequence being solved
/// (memo keys are slices of it).
pub struct Solver<'d, 't, D: ?Sized> {
    resolver: PhraseResolver<'d, D>,
    bound: Option<usize>,
    memo: Option<HashMap<&'t [Token], Vec<Segmentation>>>,
    best: HashMap<String, Option<Stroke>>,
    unmatched: Vec<String>,
    stats: SolveStats,
}

impl<'d, 't, D: ReverseLookup + ?Sized> Solver<'d, 't, D> {
    pub fn new(dictionary: &'d D, options: SolverOptions) -> Self {
        let bound = options
            .max_phrase_tokens
            .or_else(|| dictionary.longest_phrase())
            .map(|b| b.max(1));
        Self {
            resolver: PhraseResolver::new(dictionary, options.resolver),
            bound,
            memo: options.memoize.then(HashMap::new),
            best: HashMap::new(),
            unmatched: Vec::new(),
            stats: SolveStats::default(),
        }
    }

    /// Every complete segmentation of `tokens`, in enumeration order.
    ///
    /// An empty token slice has exactly one segmentation, the empty one. A
    /// slice that cannot be covered yields an empty list.
    pub fn solve(&mut self, tokens: &'t [Token]) -> Vec<Segmentation> {
        if tokens.is_empty() {
            return vec![Segmentation::default()];
        }
        if let Some(hit) = self.memo.as_ref().and_then(|m| m.get(tokens)) {
            self.stats.memo_hits += 1;
            return hit.clone();
        }

        self.stats.suffixes_solved += 1;
        let limit = self.bound.map_or(tokens.len(), |b| b.min(tokens.len()));

        let mut solutions = Vec::new();
        for i in (1..=limit).rev() {
            let phrase = join_tokens(&tokens[..i]);
            let Some(best) = self.best_stroke(&phrase) else {
                continue;
            };
            for rest in self.solve(&tokens[i..]) {
                solutions.push(rest.prepend(Segment::new(phrase.clone(), best.clone())));
            }
        }

        if solutions.is_empty() {
            debug!(suffix = %join_tokens(tokens), "no segmentation for suffix");
        }
        if let Some(memo) = self.memo.as_mut() {
            memo.insert(tokens, solutions.clone());
        }
        solutions
    }

    /// Single-token phrases that had no strokes, in the order first seen.
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Top-ranked stroke for a phrase, resolved at most once per run.
    fn best_stroke(&mut self, phrase: &str) -> Option<Stroke> {
        if let Some(cached) = self.best.get(phrase) {
            return cached.clone();
        }
        self.stats.phrases_resolved += 1;
        let best = self.resolver.best(phrase);
        if best.is_none() && !phrase.contains(' ') {
            self.unmatched.push(phrase.to_string());
        }
        self.best.insert(phrase.to_string(), best.clone());
        best
    }
}
