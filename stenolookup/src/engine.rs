//! Stroke lookup engine over Plover JSON dictionaries
//!
//! Provides a high-level Engine that loads a dictionary stack from files and
//! answers `lookup(text) -> Lookup` with caching.
//!
//! This is a thin wrapper around the generic core::Engine over a shared
//! `Arc<DictionaryStack>`.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use steno_lookup_core::{Config, DictionaryStack, Lookup, Segmentation, StenoDictionary};
use tracing::info;

use crate::config::LookupConfig;

/// Public engine for stenolookup.
///
/// The dictionary stack sits behind an `Arc`, so `fork` hands out engines for
/// other threads without copying the dictionaries. Each engine keeps its own
/// result cache.
pub struct Engine {
    inner: steno_lookup_core::Engine<Arc<DictionaryStack>>,
}

impl Engine {
    /// Construct an Engine over an already built stack.
    pub fn new(stack: DictionaryStack, config: Config) -> anyhow::Result<Self> {
        Self::from_shared(Arc::new(stack), config)
    }

    fn from_shared(stack: Arc<DictionaryStack>, config: Config) -> anyhow::Result<Self> {
        let inner = steno_lookup_core::Engine::new(stack, config)
            .context("invalid lookup configuration")?;
        Ok(Self { inner })
    }

    /// Engine over the built-in demo dictionary.
    pub fn demo() -> Self {
        Self {
            inner: steno_lookup_core::Engine::with_defaults(Arc::new(
                DictionaryStack::from(StenoDictionary::load_demo()),
            )),
        }
    }

    /// Load dictionaries in priority order (first = highest).
    pub fn from_dictionary_files<P: AsRef<Path>>(
        paths: &[P],
        config: Config,
    ) -> anyhow::Result<Self> {
        let mut stack = DictionaryStack::new();
        for path in paths {
            let path = path.as_ref();
            let dict = StenoDictionary::load_json(path)
                .with_context(|| format!("failed to load dictionary {}", path.display()))?;
            info!(path = %path.display(), entries = dict.len(), "loaded dictionary");
            stack.push(dict);
        }
        Self::new(stack, config)
    }

    /// Build from a `LookupConfig`. With no dictionaries configured the demo
    /// dictionary is used.
    pub fn from_config(config: LookupConfig) -> anyhow::Result<Self> {
        if config.dictionaries.is_empty() {
            info!("no dictionaries configured, using demo dictionary");
            let stack = DictionaryStack::from(StenoDictionary::load_demo());
            return Self::new(stack, config.into_base());
        }
        let paths = config.dictionaries.clone();
        Self::from_dictionary_files(&paths, config.into_base())
    }

    /// A new engine sharing this engine's dictionaries and config, with an
    /// empty cache. Use one per thread.
    pub fn fork(&self) -> anyhow::Result<Self> {
        Self::from_shared(Arc::clone(self.inner.dictionary()), self.inner.config().clone())
    }

    /// Every way to write `text`, best first.
    pub fn lookup(&self, text: &str) -> anyhow::Result<Lookup> {
        Ok(self.inner.lookup(text)?)
    }

    /// The best segmentation, if any.
    pub fn best(&self, text: &str) -> anyhow::Result<Option<Segmentation>> {
        Ok(self.lookup(text)?.segmentations.into_iter().next())
    }

    /// Ranked segmentations as JSON.
    pub fn lookup_json(&self, text: &str) -> anyhow::Result<String> {
        let lookup = self.lookup(text)?;
        Ok(serde_json::to_string(&lookup.segmentations)?)
    }

    pub fn dictionaries(&self) -> &DictionaryStack {
        self.inner.dictionary()
    }

    pub fn config(&self) -> &Config {
        self.inner.config()
    }

    /// Get cache statistics (hits, misses, hit rate)
    pub fn cache_stats(&self) -> (usize, usize, f32) {
        let (hits, misses) = self.inner.cache_stats();
        (hits, misses, self.inner.cache_hit_rate().unwrap_or(0.0))
    }

    pub fn cache_size(&self) -> usize {
        self.inner.cache_size()
    }

    pub fn clear_cache(&self) {
        self.inner.clear_cache();
    }
}
