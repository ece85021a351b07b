/// Front-end configuration that extends the core `Config`.
///
/// This configuration includes:
/// - All lookup options from `steno_lookup_core::Config` (flattened via serde)
/// - The dictionary files to load, highest priority first
///
/// # Example
///
/// ```rust
/// use stenolookup::LookupConfig;
///
/// let config = LookupConfig::from_toml_str(r#"
/// dictionaries = ["user.json", "main.json"]
/// max_results = 5
/// "#).unwrap();
/// assert_eq!(config.dictionaries.len(), 2);
/// assert_eq!(config.base.max_results, Some(5));
/// ```
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Lookup options (capitalization stroke, fallbacks, bounds, cache).
    #[serde(flatten)]
    pub base: steno_lookup_core::Config,

    /// Plover JSON dictionaries, highest priority first. Relative paths are
    /// resolved against the config file's directory by `load_toml`.
    #[serde(default)]
    pub dictionaries: Vec<PathBuf>,
}

impl LookupConfig {
    /// Load from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        if let Some(dir) = path.parent() {
            config.dictionaries = config
                .dictionaries
                .into_iter()
                .map(|p| if p.is_relative() { dir.join(p) } else { p })
                .collect();
        }
        Ok(config)
    }

    /// Parse from a TOML string.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: LookupConfig = toml::from_str(content)?;
        config.base.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The core config to build an engine with.
    pub fn into_base(self) -> steno_lookup_core::Config {
        self.base
    }

    pub fn base(&self) -> &steno_lookup_core::Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut steno_lookup_core::Config {
        &mut self.base
    }
}
