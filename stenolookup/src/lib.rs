//! stenolookup crate root
//!
//! Loads Plover JSON dictionaries into a priority stack and answers "which
//! strokes write this text?" through the shared `steno-lookup-core` engine.
//!
//! Public API exported here:
//! - `Engine` from `engine`
//! - `LookupConfig` from `config`
//! - text and JSON renderers from `format`

pub mod config;
pub mod engine;
pub mod format;

pub use config::LookupConfig;
pub use engine::Engine;

// Convenience re-exports for common types used by callers.
pub use steno_lookup_core::{
    Config, Cost, DictionaryStack, Lookup, ReverseLookup, Segment, Segmentation, StenoDictionary,
    Stroke,
};
