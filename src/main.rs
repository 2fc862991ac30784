use anyhow::Context;
use clap::Parser;
use lakehouse_pipeline::cli::Args;
use lakehouse_pipeline::pipeline::LakehousePipeline;
use std::process;
use tracing::debug;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.to_config();
    debug!("Running with configuration: {:?}", config);

    let pipeline = LakehousePipeline::new(config).context("Invalid pipeline configuration")?;
    pipeline
        .run()
        .with_context(|| format!("Pipeline failed under {}", args.root.display()))?;

    Ok(())
}

/// Structured logging on stderr, leaving stdout to the reports
///
/// `RUST_LOG` overrides `-v`/`-q`. Quiet runs drop timestamps.
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_directive()));

    let layer = fmt::layer()
        .with_target(args.show_log_targets())
        .with_writer(std::io::stderr);
    let layer = if args.quiet {
        layer.without_time().compact().boxed()
    } else {
        layer.with_timer(fmt::time::uptime()).boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();

    debug!("Logging initialized at level: {}", log_level);
}
