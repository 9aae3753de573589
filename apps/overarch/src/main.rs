//! # Overarch
//!
//! Selects which DCC ETL pipeline stages a launch should run.
//!
//! ## Usage
//!
//! ```bash
//! # The launcher contract: explicit stage list, then the expression
//! overarch concatenator,normalizer,annotator,loader,exporter -normalizer,loader
//! # ok: concatenator normalizer loader
//!
//! # Against the configured (or built-in) stage list
//! overarch resolve --config overarch.toml importer-
//! overarch stages
//! overarch check all normalizer-importer exporter-loader
//! ```

use clap::Parser;
use overarch::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse first: --verbose selects the default log level.
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = cli::execute(cli) {
        // Printed directly so RUST_LOG cannot silence the diagnostic.
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr. OVERARCH_LOG_FORMAT=json enables machine-parseable output.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("OVERARCH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "overarch=debug,overarch_core=debug"
    } else {
        "overarch=warn,overarch_core=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
