//! Filter presets loaded from TOML
//!
//! A preset binds a name to a registered filter plus its options, so a
//! pipeline can refer to `username` instead of repeating
//! `string` + `{min_length = 3, max_length = 32}` everywhere.
//!
//! ```toml
//! [filters.username]
//! filter = "string"
//! min_length = 3
//! max_length = 32
//!
//! [filters.tags]
//! filter = "split"
//! delimiter = ";"
//! ```
//!
//! Every key other than `filter` is passed to the filter as an option.

use crate::error::{Error, Result};
use crate::filters::{FilterRegistry, FilterResult};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// A named filter with fixed options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawPreset")]
pub struct FilterPreset {
    filter: String,
    options: Option<Value>,
}

#[derive(Deserialize)]
struct RawPreset {
    filter: String,
    #[serde(flatten)]
    options: Map<String, Value>,
}

impl From<RawPreset> for FilterPreset {
    fn from(raw: RawPreset) -> Self {
        let options = if raw.options.is_empty() {
            None
        } else {
            Some(Value::Object(raw.options))
        };
        Self {
            filter: raw.filter,
            options,
        }
    }
}

impl FilterPreset {
    pub fn new(filter: impl Into<String>, options: Option<Value>) -> Self {
        Self {
            filter: filter.into(),
            options,
        }
    }

    /// Name of the registered filter this preset runs
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn options(&self) -> Option<&Value> {
        self.options.as_ref()
    }
}

/// A set of filter presets, kept in file order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default)]
    filters: IndexMap<String, FilterPreset>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse presets from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FilterConfig = toml::from_str(content).map_err(|e| {
            Error::config(format!("Failed to parse filter configuration: {}", e))
        })?;

        log::debug!("Loaded {} filter presets", config.filters.len());
        Ok(config)
    }

    /// Load presets from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::from(e).with_context(format!("Failed to read {}", path.display()))
        })?;

        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("In {}", path.display())))
    }

    /// Add or replace a preset
    pub fn insert(&mut self, name: impl Into<String>, preset: FilterPreset) {
        self.filters.insert(name.into(), preset);
    }

    pub fn preset(&self, name: &str) -> Option<&FilterPreset> {
        self.filters.get(name)
    }

    /// Iterate presets in the order they were declared
    pub fn presets(&self) -> impl Iterator<Item = (&str, &FilterPreset)> {
        self.filters.iter().map(|(name, preset)| (name.as_str(), preset))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Verify every preset against a registry
    ///
    /// Fails on the first preset that names an unknown filter or carries
    /// options its filter rejects.
    pub fn check(&self, registry: &FilterRegistry) -> Result<()> {
        for (name, preset) in &self.filters {
            registry
                .check(&preset.filter, preset.options())
                .map_err(|e| e.with_context(format!("Preset '{}'", name)))?;
        }
        Ok(())
    }

    /// Run a preset on a value
    pub fn apply(&self, registry: &FilterRegistry, name: &str, value: &Value) -> FilterResult {
        let preset = self.preset(name).ok_or_else(|| {
            Error::invalid_configuration(format!("Preset '{}' not found", name))
        })?;

        registry
            .apply(&preset.filter, value, preset.options())
            .map_err(|e| e.with_context(format!("Preset '{}'", name)))
    }
}
