//! # Overarch CLI Module
//!
//! This module implements the CLI interface for Overarch.
//!
//! ## Invocation Forms
//!
//! - `overarch <STAGES> <EXPRESSION>` - resolve against an explicit stage list
//! - `resolve` - resolve against the configured stage list
//! - `stages` - show the effective canonical stage list
//! - `check` - validate several expressions at once
//!
//! Flags have no short forms and go after the subcommand: an expression such
//! as `-v` or a stage list naming `check` must stay a plain value in the
//! positional form.

mod commands;

use crate::{OverarchConfig, OverarchError};
use clap::{Parser, Subcommand};
use overarch_core::StageList;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Overarch - DCC ETL stage selector
///
/// Resolves a shorthand such as `normalizer-importer` or `-annotator,exporter`
/// into the ordered list of pipeline stages to run.
#[derive(Parser, Debug)]
#[command(name = "overarch")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "OVERARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Let a reversed range run from its start to the last stage instead of failing
    #[arg(long, global = true)]
    pub lenient_reversed: bool,

    /// Comma-separated canonical stage list, e.g. concatenator,normalizer,annotator
    #[arg(requires = "expression")]
    pub stages: Option<String>,

    /// Range expression, e.g. all, normalizer-importer, -annotator,exporter
    #[arg(allow_hyphen_values = true)]
    pub expression: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a range expression against the configured stage list
    Resolve {
        /// Range expression
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Comma-separated stage list overriding the configuration
        #[arg(long)]
        stages: Option<String>,
    },

    /// Show the effective canonical stage list
    Stages {
        /// Comma-separated stage list overriding the configuration
        #[arg(long)]
        stages: Option<String>,
    },

    /// Validate one or more range expressions
    Check {
        /// Range expressions to validate
        #[arg(required = true, allow_hyphen_values = true)]
        expressions: Vec<String>,

        /// Comma-separated stage list overriding the configuration
        #[arg(long)]
        stages: Option<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), OverarchError> {
    let config = OverarchConfig::load_optional(cli.config.as_deref())?;
    let resolver = config.resolver(cli.lenient_reversed);
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Resolve { expression, stages }) => {
            let stages = config.stage_list(stages.as_deref())?;
            cmd_resolve(&resolver, &stages, &expression, json_mode)
        }
        Some(Commands::Stages { stages }) => {
            let stages = config.stage_list(stages.as_deref())?;
            cmd_stages(&stages, json_mode)
        }
        Some(Commands::Check {
            expressions,
            stages,
        }) => {
            let stages = config.stage_list(stages.as_deref())?;
            cmd_check(&resolver, &stages, &expressions, json_mode)
        }
        None => match (cli.stages, cli.expression) {
            (Some(csv), Some(expression)) => {
                let stages = StageList::from_csv(&csv)?;
                cmd_resolve(&resolver, &stages, &expression, json_mode)
            }
            // No positional form - show the stage list by default
            _ => cmd_stages(&config.stage_list(None)?, json_mode),
        },
    }
}
