//! Command-line interface components.

use crate::config::{CompressionAlgorithm, LakehouseConfig, MalformedRowPolicy};
use crate::constants::DEFAULT_ROOT;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lakehouse_pipeline")]
#[command(about = "Generate raw orders, clean them to Parquet, aggregate daily revenue and report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Lakehouse root holding the bronze, silver and gold tiers
    #[arg(long, value_name = "PATH", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Parquet compression algorithm for the silver and gold tiers
    #[arg(long, value_enum, default_value = "snappy")]
    pub compression: CompressionAlgorithm,

    /// What to do with raw rows whose fields cannot be parsed
    #[arg(long = "malformed-rows", value_enum, default_value = "reject")]
    pub malformed_rows: MalformedRowPolicy,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print the reports and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Get log level based on verbosity
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// `EnvFilter` directive used when `RUST_LOG` is unset; polars stays at warn
    pub fn log_directive(&self) -> String {
        format!("lakehouse_pipeline={},polars=warn", self.get_log_level())
    }

    /// Event targets are only worth the width from `-vv` on
    pub fn show_log_targets(&self) -> bool {
        self.verbose >= 2
    }

    /// Build the pipeline configuration from the parsed flags
    pub fn to_config(&self) -> LakehouseConfig {
        let config = LakehouseConfig::default()
            .with_root(self.root.clone())
            .with_compression(self.compression)
            .with_malformed_rows(self.malformed_rows);

        if self.quiet { config.with_quiet() } else { config }
    }
}
