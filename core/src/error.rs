//! Error type shared by dictionary loading, configuration and the engine.
//!
//! Lookup failure is not an error: a text with no resolvable segmentation
//! produces an empty result list. The variants here cover the ambient
//! surfaces (files, config, caller-imposed bounds).

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("dictionary JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("invalid stroke {0:?}")]
    InvalidStroke(String),

    #[error("input has {tokens} tokens, limit is {limit}")]
    InputTooLong { tokens: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
