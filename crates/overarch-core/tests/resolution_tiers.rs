//! # Resolution Tier Tests (T0-T3)
//!
//! If ANY tier fails, the launcher may run stages it was not asked to run.
//!
//! ## Tiers
//! - T0: Stage List Integrity
//! - T1: Whole-Pipeline Selection
//! - T2: Ranges and Tokens
//! - T3: Canonical Ordering

use overarch_core::{
    ResolveError, ReversedRangePolicy, StageList, StageRangeResolver, default_stage_list, resolve,
};

const LAUNCHER_STAGES: &str = "concatenator,normalizer,annotator,mongoinit,hdfsput,loader,importer,summarizer,indexer,stats,exporter,vcfcopy";

fn launcher() -> StageList {
    StageList::from_csv(LAUNCHER_STAGES).expect("stages")
}

fn run(expression: &str) -> Result<String, ResolveError> {
    StageRangeResolver::new()
        .resolve_str(&launcher(), expression)
        .map(|selection| selection.to_string())
}

// =============================================================================
// TIER T0: STAGE LIST INTEGRITY
// =============================================================================

mod t0_stage_list_integrity {
    use super::*;

    /// T0.1: Duplicate stage names are rejected before the expression is read.
    #[test]
    fn duplicate_stage_list_rejected() {
        let result = resolve(&["a", "a", "b"], "a");
        assert_eq!(result, Err(ResolveError::DuplicateStage("a".to_string())));
    }

    /// T0.2: An empty stage list is rejected.
    #[test]
    fn empty_stage_list_rejected() {
        let result = resolve::<&str>(&[], "all");
        assert_eq!(result, Err(ResolveError::EmptyStageList));
    }

    /// T0.3: The component catalogue is a valid stage list.
    #[test]
    fn catalogue_matches_launcher_order() {
        assert_eq!(default_stage_list().expect("catalogue"), launcher());
    }
}

// =============================================================================
// TIER T1: WHOLE-PIPELINE SELECTION
// =============================================================================

mod t1_whole_pipeline {
    use super::*;

    /// T1.1: `all` selects every stage.
    #[test]
    fn all_selects_everything() {
        assert_eq!(run("all").expect("all"), LAUNCHER_STAGES.replace(',', " "));
    }

    /// T1.2: `-` is the same as `all`.
    #[test]
    fn dash_equals_all() {
        assert_eq!(run("-"), run("all"));
    }

    /// T1.3: A single-stage pipeline works with `all`.
    #[test]
    fn single_stage_pipeline() {
        assert_eq!(resolve(&["exporter"], "all").expect("all"), ["exporter"]);
        assert_eq!(resolve(&["exporter"], "exporter-").expect("range"), ["exporter"]);
    }
}

// =============================================================================
// TIER T2: RANGES AND TOKENS
// =============================================================================

mod t2_ranges_and_tokens {
    use super::*;

    /// T2.1: A single stage.
    #[test]
    fn single_stage() {
        assert_eq!(run("concatenator").expect("run"), "concatenator");
    }

    /// T2.2: A closed range expands to every stage in between.
    #[test]
    fn closed_range() {
        assert_eq!(
            run("normalizer-importer").expect("run"),
            "normalizer annotator mongoinit hdfsput loader importer"
        );
    }

    /// T2.3: An open-end range runs to the last stage.
    #[test]
    fn open_end_range() {
        assert_eq!(
            run("importer-").expect("run"),
            "importer summarizer indexer stats exporter vcfcopy"
        );
    }

    /// T2.4: An open-start range followed by a single stage.
    #[test]
    fn open_start_then_stage() {
        assert_eq!(
            run("-normalizer,loader").expect("run"),
            "concatenator normalizer loader"
        );
    }

    /// T2.5: Range, then stage, then open-end range.
    #[test]
    fn mixed_tokens() {
        assert_eq!(
            run("concatenator-normalizer,loader,exporter-").expect("run"),
            "concatenator normalizer loader exporter vcfcopy"
        );
    }

    /// T2.6: Open-end range in any position but last is rejected.
    #[test]
    fn open_end_not_last() {
        assert!(matches!(
            resolve(&["a", "b", "c"], "b-,c"),
            Err(ResolveError::OpenEndNotLast { position: 0, .. })
        ));
    }

    /// T2.7: Open-start range in any position but first is rejected.
    #[test]
    fn open_start_not_first() {
        assert!(matches!(
            run("concatenator,-loader"),
            Err(ResolveError::OpenStartNotFirst { position: 1, .. })
        ));
    }

    /// T2.8: Unknown names are rejected, whether plain or range bounds.
    #[test]
    fn unknown_names() {
        assert_eq!(
            run("lisi"),
            Err(ResolveError::UnknownStage("lisi".to_string()))
        );
        assert_eq!(
            run("loader-reporter"),
            Err(ResolveError::UnknownStage("reporter".to_string()))
        );
    }

    /// T2.9: Malformed tokens are rejected.
    #[test]
    fn malformed_tokens() {
        assert!(matches!(
            run("loader-importer-indexer"),
            Err(ResolveError::MalformedRange { .. })
        ));
        assert_eq!(run("loader,,importer"), Err(ResolveError::EmptyToken { position: 1 }));
        assert_eq!(run(""), Err(ResolveError::EmptyExpression));
    }
}

// =============================================================================
// TIER T3: CANONICAL ORDERING
// =============================================================================

mod t3_canonical_ordering {
    use super::*;

    /// T3.1: Repeating a stage is rejected.
    #[test]
    fn repeated_stage() {
        assert!(matches!(
            resolve(&["a", "b", "c", "d"], "b,b"),
            Err(ResolveError::OutOfOrder { .. })
        ));
    }

    /// T3.2: Listing stages against canonical order is rejected.
    #[test]
    fn tokens_out_of_order() {
        assert_eq!(
            run("exporter,loader"),
            Err(ResolveError::OutOfOrder {
                stage: "loader".to_string(),
                previous: "exporter".to_string(),
            })
        );
    }

    /// T3.3: A stage already covered by an earlier range is rejected.
    #[test]
    fn stage_inside_earlier_range() {
        assert!(matches!(
            run("loader-indexer,summarizer"),
            Err(ResolveError::OutOfOrder { .. })
        ));
    }

    /// T3.4: Reversed ranges fail by default.
    #[test]
    fn reversed_range_rejected() {
        assert_eq!(
            run("exporter-loader"),
            Err(ResolveError::ReversedRange {
                from: "exporter".to_string(),
                to: "loader".to_string(),
            })
        );
    }

    /// T3.5: The lenient policy keeps the legacy behaviour.
    #[test]
    fn reversed_range_extends_to_end_when_lenient() {
        let selection = StageRangeResolver::with_policy(ReversedRangePolicy::ExtendToEnd)
            .resolve_str(&launcher(), "exporter-loader")
            .expect("lenient");
        assert_eq!(selection.to_string(), "exporter vcfcopy");
    }

    /// T3.6: Lenient reversed ranges are still subject to the ordering check.
    #[test]
    fn lenient_reversed_range_still_ordered() {
        let result = StageRangeResolver::with_policy(ReversedRangePolicy::ExtendToEnd)
            .resolve_str(&launcher(), "exporter-loader,vcfcopy");
        assert!(matches!(result, Err(ResolveError::OutOfOrder { .. })));
    }
}
