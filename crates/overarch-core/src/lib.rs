//! # overarch-core
//!
//! The deterministic stage-range resolver for the DCC ETL overarch launcher.
//!
//! The launcher runs an ordered list of named components (stages). Operators
//! pick the stages to run with a shorthand expression such as `normalizer-`,
//! `-annotator,exporter` or `all`. This crate turns that shorthand into the
//! concrete, canonically ordered list of stages, or rejects it.
//!
//! ## Layout
//!
//! - `types` → `StageList`, `Selection`, `ResolveError`
//! - `expression` → tagged parse of the shorthand (`RangeExpression`)
//! - `resolver` → binding a parsed expression against a `StageList`
//! - `component` → the DCC component catalogue (default stage list)
//!
//! ## Architectural Constraints
//!
//! - Pure: no I/O, no shared state, no async
//! - Fail fast: the first violation is returned, nothing is partially resolved

// =============================================================================
// MODULES
// =============================================================================

pub mod component;
pub mod expression;
pub mod primitives;
pub mod resolver;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use component::{Component, default_stage_list};
pub use expression::{Bound, RangeExpression, Token};
pub use resolver::{ReversedRangePolicy, StageRangeResolver, resolve};
pub use types::{ResolveError, Selection, StageList};
