//! # CLI Command Implementations
//!
//! Each command renders its output to a `String` first so the text and JSON
//! forms can be tested without capturing stdout.

use crate::OverarchError;
use overarch_core::{ResolveError, Selection, StageList, StageRangeResolver};

fn to_pretty_json(value: &serde_json::Value) -> Result<String, OverarchError> {
    serde_json::to_string_pretty(value).map_err(|e| OverarchError::Serialization(e.to_string()))
}

// =============================================================================
// RESOLVE COMMAND
// =============================================================================

/// Render a successful resolution.
///
/// Text form is the launcher contract: `ok: ` followed by the stages,
/// space-separated.
pub fn render_resolution(
    expression: &str,
    selection: &Selection,
    json_mode: bool,
) -> Result<String, OverarchError> {
    if json_mode {
        let output = serde_json::json!({
            "ok": true,
            "expression": expression,
            "stages": selection.stages(),
            "indices": selection.indices(),
        });
        return to_pretty_json(&output);
    }
    Ok(format!("ok: {}", selection))
}

/// Resolve `expression` and print the selected stages.
pub fn cmd_resolve(
    resolver: &StageRangeResolver,
    stages: &StageList,
    expression: &str,
    json_mode: bool,
) -> Result<(), OverarchError> {
    tracing::info!(stages = %stages, expression, "resolving stages");

    let selection = resolver.resolve_str(stages, expression)?;
    tracing::info!(count = selection.len(), "resolved stages");

    println!("{}", render_resolution(expression, &selection, json_mode)?);
    Ok(())
}

// =============================================================================
// STAGES COMMAND
// =============================================================================

/// Render the canonical stage list, one stage per line with its index.
pub fn render_stages(stages: &StageList, json_mode: bool) -> Result<String, OverarchError> {
    if json_mode {
        let output = serde_json::json!({ "stages": stages });
        return to_pretty_json(&output);
    }

    let lines: Vec<String> = stages
        .iter()
        .enumerate()
        .map(|(index, stage)| format!("{:>3}  {}", index, stage))
        .collect();
    Ok(lines.join("\n"))
}

/// Show the effective canonical stage list.
pub fn cmd_stages(stages: &StageList, json_mode: bool) -> Result<(), OverarchError> {
    println!("{}", render_stages(stages, json_mode)?);
    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Outcome of validating one expression.
#[derive(Debug)]
pub struct CheckOutcome<'a> {
    pub expression: &'a str,
    pub result: Result<Selection, ResolveError>,
}

/// Resolve every expression independently.
pub fn check_expressions<'a>(
    resolver: &StageRangeResolver,
    stages: &StageList,
    expressions: &'a [String],
) -> Vec<CheckOutcome<'a>> {
    expressions
        .iter()
        .map(|expression| CheckOutcome {
            expression,
            result: resolver.resolve_str(stages, expression),
        })
        .collect()
}

/// Render check outcomes: `ok`/`error` per expression.
pub fn render_check(outcomes: &[CheckOutcome<'_>], json_mode: bool) -> Result<String, OverarchError> {
    if json_mode {
        let results: Vec<serde_json::Value> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(selection) => serde_json::json!({
                    "expression": outcome.expression,
                    "ok": true,
                    "stages": selection.stages(),
                }),
                Err(e) => serde_json::json!({
                    "expression": outcome.expression,
                    "ok": false,
                    "error": e.to_string(),
                }),
            })
            .collect();
        return to_pretty_json(&serde_json::Value::Array(results));
    }

    let lines: Vec<String> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(selection) => format!("ok: {} -> {}", outcome.expression, selection),
            Err(e) => format!("error: {}: {}", outcome.expression, e),
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Validate several expressions; fails if any of them is rejected.
pub fn cmd_check(
    resolver: &StageRangeResolver,
    stages: &StageList,
    expressions: &[String],
    json_mode: bool,
) -> Result<(), OverarchError> {
    let outcomes = check_expressions(resolver, stages, expressions);
    println!("{}", render_check(&outcomes, json_mode)?);

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(OverarchError::CheckFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}
