//! # Core Type Definitions
//!
//! This module contains the value types shared by the parser and resolver:
//! - The canonical ordered stage list (`StageList`)
//! - The resolved output (`Selection`)
//! - Error types (`ResolveError`)
//!
//! ## Determinism Guarantees
//!
//! - Stage lookup uses `BTreeMap`, never `HashMap`
//! - Every value is immutable once constructed

use crate::primitives::STAGE_LIST_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// STAGE LIST
// =============================================================================

/// The canonical, ordered list of pipeline stages.
///
/// Invariants (checked at construction):
/// - at least one stage
/// - no empty stage names
/// - no duplicate stage names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StageList {
    stages: Vec<String>,
    #[serde(skip)]
    positions: BTreeMap<String, usize>,
}

impl StageList {
    /// Build a stage list from names in canonical order.
    pub fn new<I, S>(stages: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stages: Vec<String> = stages.into_iter().map(Into::into).collect();
        if stages.is_empty() {
            return Err(ResolveError::EmptyStageList);
        }

        let mut positions = BTreeMap::new();
        for (index, stage) in stages.iter().enumerate() {
            if stage.is_empty() {
                return Err(ResolveError::EmptyStageName { position: index });
            }
            if positions.insert(stage.clone(), index).is_some() {
                return Err(ResolveError::DuplicateStage(stage.clone()));
            }
        }

        Ok(Self { stages, positions })
    }

    /// Parse a comma-separated stage list such as
    /// `concatenator,normalizer,annotator`.
    pub fn from_csv(csv: &str) -> Result<Self, ResolveError> {
        Self::new(csv.split(STAGE_LIST_SEPARATOR))
    }

    /// Canonical index of `stage`, if it belongs to this list.
    #[must_use]
    pub fn index_of(&self, stage: &str) -> Option<usize> {
        self.positions.get(stage).copied()
    }

    /// Whether `stage` belongs to this list.
    #[must_use]
    pub fn contains(&self, stage: &str) -> bool {
        self.positions.contains_key(stage)
    }

    /// The first stage in canonical order.
    #[must_use]
    pub fn first(&self) -> &str {
        // Non-empty by construction.
        self.stages.first().map_or("", String::as_str)
    }

    /// The last stage in canonical order.
    #[must_use]
    pub fn last(&self) -> &str {
        self.stages.last().map_or("", String::as_str)
    }

    /// Number of stages. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Always `false` for a constructed list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in canonical order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.stages
    }

    /// Iterate stage names in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for StageList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stages = Vec::<String>::deserialize(deserializer)?;
        Self::new(stages).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for StageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stages.join(&STAGE_LIST_SEPARATOR.to_string()))
    }
}

// =============================================================================
// SELECTION
// =============================================================================

/// The stages selected by an expression, in canonical order.
///
/// Each stage is paired with its canonical index. Indices are strictly
/// increasing, so the selection never contains a stage twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    stages: Vec<String>,
    indices: Vec<usize>,
}

impl Selection {
    /// Assemble a selection from `(index, stage)` pairs.
    ///
    /// Returns `ResolveError::OutOfOrder` on the first pair whose index does
    /// not strictly exceed the previous one.
    pub fn from_indexed<I>(pairs: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = (usize, String)>,
    {
        let mut stages: Vec<String> = Vec::new();
        let mut indices: Vec<usize> = Vec::new();

        for (index, stage) in pairs {
            if let Some(&previous_index) = indices.last() {
                if index <= previous_index {
                    return Err(ResolveError::OutOfOrder {
                        stage,
                        previous: stages.last().cloned().unwrap_or_default(),
                    });
                }
            }
            indices.push(index);
            stages.push(stage);
        }

        Ok(Self { stages, indices })
    }

    /// Selected stage names in run order.
    #[must_use]
    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    /// Canonical indices of the selected stages.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Consume the selection, keeping only the stage names.
    #[must_use]
    pub fn into_stages(self) -> Vec<String> {
        self.stages
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stages.join(" "))
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Every way a stage list or range expression can be rejected.
///
/// All variants are fatal: resolution stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The canonical stage list has no stages.
    #[error("Stage list is empty")]
    EmptyStageList,

    /// The canonical stage list contains an empty name.
    #[error("Stage list has an empty stage name at position {position}")]
    EmptyStageName { position: usize },

    /// The canonical stage list names a stage more than once.
    #[error("Stage list contains duplicate stage '{0}'")]
    DuplicateStage(String),

    /// The expression is the empty string.
    #[error("Range expression is empty")]
    EmptyExpression,

    /// Two separators with nothing between them, e.g. `a,,b`.
    #[error("Empty token at position {position}")]
    EmptyToken { position: usize },

    /// A range token with more than one range separator, e.g. `a-b-c`.
    #[error("Malformed range '{token}': expected exactly one '-'")]
    MalformedRange { token: String },

    /// `-B` anywhere but the first token.
    #[error("Open-start range '{token}' at position {position} is only valid as the first token")]
    OpenStartNotFirst { token: String, position: usize },

    /// `A-` anywhere but the last token.
    #[error("Open-end range '{token}' at position {position} is only valid as the last token")]
    OpenEndNotLast { token: String, position: usize },

    /// A stage name or range bound not present in the stage list.
    #[error("Unknown stage '{0}'")]
    UnknownStage(String),

    /// A range whose start comes after its end in canonical order.
    #[error("Reversed range '{from}-{to}': '{from}' runs after '{to}'")]
    ReversedRange { from: String, to: String },

    /// The selection repeats a stage or runs stages against canonical order.
    #[error("Stages out of order or duplicated: '{stage}' selected after '{previous}'")]
    OutOfOrder { stage: String, previous: String },
}

// =============================================================================
// TESTS
// =============================================================================
