//! # Expression Primitives
//!
//! The fixed vocabulary of the stage-range shorthand.
//!
//! These values are part of the launcher's invocation contract and are
//! not configurable.

/// Keyword selecting every stage of the pipeline.
pub const ALL_KEYWORD: &str = "all";

/// A bare range with both bounds open; equivalent to [`ALL_KEYWORD`].
pub const WHOLE_RANGE: &str = "-";

/// Separates tokens within an expression.
pub const TOKEN_SEPARATOR: char = ',';

/// Separates the two bounds of a range token.
pub const RANGE_SEPARATOR: char = '-';

/// Separates stage names in a comma-separated stage list.
pub const STAGE_LIST_SEPARATOR: char = ',';

// =============================================================================
// TESTS
// =============================================================================
