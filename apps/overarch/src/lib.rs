//! # Overarch
//!
//! Library half of the `overarch` binary: CLI definition, configuration
//! loading and output rendering. Resolution itself lives in `overarch-core`.

pub mod cli;
pub mod config;
pub mod error;

pub use config::OverarchConfig;
pub use error::OverarchError;
