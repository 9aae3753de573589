//! # Stage Range Resolver
//!
//! Binds a parsed [`RangeExpression`] to a [`StageList`] and produces the
//! [`Selection`] of stages to run.
//!
//! Resolution happens in two passes:
//! 1. Each token expands to one or more `(index, stage)` pairs.
//! 2. The concatenated pairs must have strictly increasing indices; anything
//!    else means a stage is repeated or would run out of canonical order.

use crate::expression::{Bound, RangeExpression, Token};
use crate::{ResolveError, Selection, StageList};
use serde::Deserialize;
use tracing::{debug, warn};

// =============================================================================
// REVERSED RANGE POLICY
// =============================================================================

/// What to do with a range whose start runs after its end, e.g. `exporter-loader`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReversedRangePolicy {
    /// Fail with [`ResolveError::ReversedRange`].
    #[default]
    Reject,
    /// Select from the start bound through the last stage of the pipeline.
    ///
    /// This is how the legacy launcher scripts treated such ranges.
    ExtendToEnd,
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Resolves range expressions against a stage list.
///
/// The resolver is stateless apart from its policy and can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageRangeResolver {
    reversed_ranges: ReversedRangePolicy,
}

impl StageRangeResolver {
    /// Create a resolver that rejects reversed ranges.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with an explicit reversed-range policy.
    #[must_use]
    pub fn with_policy(reversed_ranges: ReversedRangePolicy) -> Self {
        Self { reversed_ranges }
    }

    /// The reversed-range policy in effect.
    #[must_use]
    pub fn policy(&self) -> ReversedRangePolicy {
        self.reversed_ranges
    }

    /// Parse `expression` and resolve it against `stages`.
    pub fn resolve_str(
        &self,
        stages: &StageList,
        expression: &str,
    ) -> Result<Selection, ResolveError> {
        let parsed = RangeExpression::parse(expression)?;
        self.resolve(stages, &parsed)
    }

    /// Resolve a parsed expression against `stages`.
    pub fn resolve(
        &self,
        stages: &StageList,
        expression: &RangeExpression,
    ) -> Result<Selection, ResolveError> {
        let tokens = match expression {
            RangeExpression::All => {
                return Selection::from_indexed(stages.iter().map(str::to_string).enumerate());
            }
            RangeExpression::Tokens(tokens) => tokens,
        };

        let mut pairs = Vec::new();
        for token in tokens {
            match token {
                Token::Stage(stage) => {
                    let index = lookup(stages, stage)?;
                    debug!(stage = %stage, index, "selected stage");
                    pairs.push((index, stage.clone()));
                }
                Token::Range { from, to } => {
                    let from = bound_or(from, stages.first());
                    let to = bound_or(to, stages.last());
                    let from_index = lookup(stages, from)?;
                    let to_index = lookup(stages, to)?;
                    debug!(from = %from, to = %to, "selected range");

                    let end = if from_index <= to_index {
                        to_index
                    } else {
                        match self.reversed_ranges {
                            ReversedRangePolicy::Reject => {
                                return Err(ResolveError::ReversedRange {
                                    from: from.to_string(),
                                    to: to.to_string(),
                                });
                            }
                            ReversedRangePolicy::ExtendToEnd => {
                                warn!(
                                    from = %from,
                                    to = %to,
                                    "reversed range extends to the last stage"
                                );
                                stages.len() - 1
                            }
                        }
                    };

                    pairs.extend(
                        stages.as_slice()[from_index..=end]
                            .iter()
                            .enumerate()
                            .map(|(offset, stage)| (from_index + offset, stage.clone())),
                    );
                }
            }
        }

        Selection::from_indexed(pairs)
    }
}

fn lookup(stages: &StageList, stage: &str) -> Result<usize, ResolveError> {
    stages
        .index_of(stage)
        .ok_or_else(|| ResolveError::UnknownStage(stage.to_string()))
}

fn bound_or<'a>(bound: &'a Bound, open: &'a str) -> &'a str {
    match bound {
        Bound::Open => open,
        Bound::Named(stage) => stage,
    }
}

// =============================================================================
// CONVENIENCE
// =============================================================================

/// Resolve `expression` against the ordered `stages` with the default policy.
///
/// Validates the stage list first, then the expression. Returns the stage
/// names to run in canonical order.
pub fn resolve<S: AsRef<str>>(
    stages: &[S],
    expression: &str,
) -> Result<Vec<String>, ResolveError> {
    let stages = StageList::new(stages.iter().map(|s| s.as_ref().to_string()))?;
    StageRangeResolver::new()
        .resolve_str(&stages, expression)
        .map(Selection::into_stages)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ABCD: [&str; 4] = ["a", "b", "c", "d"];

    #[test]
    fn all_is_identity() {
        assert_eq!(resolve(&ABCD, "all").expect("resolve"), ABCD);
        assert_eq!(resolve(&ABCD, "-").expect("resolve"), ABCD);
    }

    #[test]
    fn closed_range() {
        assert_eq!(resolve(&ABCD, "b-c").expect("resolve"), ["b", "c"]);
    }

    #[test]
    fn single_stage_range() {
        assert_eq!(resolve(&ABCD, "b-b").expect("resolve"), ["b"]);
    }

    #[test]
    fn open_start_then_stage() {
        assert_eq!(resolve(&ABCD, "-b,d").expect("resolve"), ["a", "b", "d"]);
    }

    #[test]
    fn open_end() {
        assert_eq!(resolve(&ABCD, "c-").expect("resolve"), ["c", "d"]);
    }

    #[test]
    fn repeated_stage_rejected() {
        let result = resolve(&ABCD, "b,b");
        assert!(matches!(result, Err(ResolveError::OutOfOrder { .. })));
    }

    #[test]
    fn overlapping_ranges_rejected() {
        let result = resolve(&ABCD, "a-c,b-d");
        assert_eq!(
            result,
            Err(ResolveError::OutOfOrder {
                stage: "b".to_string(),
                previous: "c".to_string(),
            })
        );
    }

    #[test]
    fn unknown_stage_rejected() {
        let result = resolve(&["a", "b", "c"], "x");
        assert_eq!(result, Err(ResolveError::UnknownStage("x".to_string())));
    }

    #[test]
    fn unknown_range_bound_rejected() {
        let result = resolve(&ABCD, "a-z");
        assert_eq!(result, Err(ResolveError::UnknownStage("z".to_string())));
    }

    #[test]
    fn duplicate_stage_list_rejected_before_expression() {
        let result = resolve(&["a", "a", "b"], "a");
        assert_eq!(result, Err(ResolveError::DuplicateStage("a".to_string())));
    }

    #[test]
    fn reversed_range_rejected_by_default() {
        let result = resolve(&ABCD, "c-a");
        assert_eq!(
            result,
            Err(ResolveError::ReversedRange {
                from: "c".to_string(),
                to: "a".to_string(),
            })
        );
    }

    #[test]
    fn reversed_range_extends_when_lenient() {
        let stages = StageList::new(ABCD).expect("stages");
        let resolver = StageRangeResolver::with_policy(ReversedRangePolicy::ExtendToEnd);
        let selection = resolver.resolve_str(&stages, "c-a").expect("resolve");
        assert_eq!(selection.stages(), ["c", "d"]);
        assert_eq!(selection.indices(), [2, 3]);
    }

    #[test]
    fn selection_carries_indices() {
        let stages = StageList::new(ABCD).expect("stages");
        let selection = StageRangeResolver::new()
            .resolve_str(&stages, "a,c-")
            .expect("resolve");
        assert_eq!(selection.indices(), [0, 2, 3]);
        assert_eq!(selection.to_string(), "a c d");
    }

    #[test]
    fn policy_deserializes_kebab_case() {
        let policy: ReversedRangePolicy =
            serde_json::from_str("\"extend-to-end\"").expect("policy");
        assert_eq!(policy, ReversedRangePolicy::ExtendToEnd);
    }
}
