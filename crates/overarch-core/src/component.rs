//! # Component Catalogue
//!
//! The DCC ETL components, in the order the overarch launcher runs them.
//!
//! | Component | ETL input |
//! |-----------|-----------|
//! | concatenator | writes submission files |
//! | normalizer | rewrites the primary SSM file |
//! | annotator | generates the secondary SSM file |
//! | all others | none |
//!
//! When no stage list is configured, [`default_stage_list`] is used as the
//! canonical order.

use crate::{ResolveError, StageList};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A component of the DCC ETL pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Concatenator,
    Normalizer,
    Annotator,
    MongoInit,
    HdfsPut,
    Loader,
    Importer,
    Summarizer,
    Indexer,
    Stats,
    Exporter,
    VcfCopy,
}

impl Component {
    /// Every component, in canonical run order.
    pub const ALL: [Component; 12] = [
        Component::Concatenator,
        Component::Normalizer,
        Component::Annotator,
        Component::MongoInit,
        Component::HdfsPut,
        Component::Loader,
        Component::Importer,
        Component::Summarizer,
        Component::Indexer,
        Component::Stats,
        Component::Exporter,
        Component::VcfCopy,
    ];

    /// The stage name used on the command line and in working directories.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Component::Concatenator => "concatenator",
            Component::Normalizer => "normalizer",
            Component::Annotator => "annotator",
            Component::MongoInit => "mongoinit",
            Component::HdfsPut => "hdfsput",
            Component::Loader => "loader",
            Component::Importer => "importer",
            Component::Summarizer => "summarizer",
            Component::Indexer => "indexer",
            Component::Stats => "stats",
            Component::Exporter => "exporter",
            Component::VcfCopy => "vcfcopy",
        }
    }

    /// Whether the component writes or rewrites ETL input files.
    #[must_use]
    pub fn is_input_generating(&self) -> bool {
        matches!(
            self,
            Component::Concatenator | Component::Normalizer | Component::Annotator
        )
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Component {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::ALL
            .into_iter()
            .find(|component| component.id() == s)
            .ok_or_else(|| ResolveError::UnknownStage(s.to_string()))
    }
}

/// The component catalogue as a canonical stage list.
pub fn default_stage_list() -> Result<StageList, ResolveError> {
    StageList::new(Component::ALL.iter().map(Component::id))
}

// =============================================================================
// TESTS
// =============================================================================
