//! # Configuration
//!
//! Optional TOML file describing the pipeline and resolver behaviour.
//!
//! ```toml
//! [pipeline]
//! stages = ["concatenator", "normalizer", "annotator"]
//!
//! [resolver]
//! reversed_ranges = "reject"   # or "extend-to-end"
//! ```
//!
//! Precedence: command-line flags, then this file, then built-in defaults
//! (the DCC component catalogue, reversed ranges rejected).

use crate::OverarchError;
use overarch_core::{
    ReversedRangePolicy, StageList, StageRangeResolver, default_stage_list,
};
use serde::Deserialize;
use std::path::Path;

/// Maximum configuration file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverarchConfig {
    pub pipeline: PipelineConfig,
    pub resolver: ResolverConfig,
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Canonical stage order. Falls back to the component catalogue.
    pub stages: Option<StageList>,
}

/// `[resolver]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    pub reversed_ranges: ReversedRangePolicy,
}

impl OverarchConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, OverarchError> {
        toml::from_str(text).map_err(|e| OverarchError::Config(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, OverarchError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            OverarchError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(OverarchError::Config(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            OverarchError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from `path` if given, otherwise use defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, OverarchError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The effective canonical stage list.
    ///
    /// `override_csv` (from the command line) wins over the configured list,
    /// which wins over the component catalogue.
    pub fn stage_list(&self, override_csv: Option<&str>) -> Result<StageList, OverarchError> {
        if let Some(csv) = override_csv {
            return Ok(StageList::from_csv(csv)?);
        }
        match &self.pipeline.stages {
            Some(stages) => Ok(stages.clone()),
            None => Ok(default_stage_list()?),
        }
    }

    /// Build a resolver; `lenient_reversed` forces the legacy reversed-range behaviour.
    #[must_use]
    pub fn resolver(&self, lenient_reversed: bool) -> StageRangeResolver {
        let policy = if lenient_reversed {
            ReversedRangePolicy::ExtendToEnd
        } else {
            self.resolver.reversed_ranges
        };
        StageRangeResolver::with_policy(policy)
    }
}

// =============================================================================
// TESTS
// =============================================================================
