//! Bronze/silver/gold pipeline.
//!
//! Runs the four stages strictly in order: generate raw orders, clean them,
//! aggregate daily revenue, then report. Each stage reads only what the
//! previous stage wrote to disk and holds its own Polars frames, so nothing
//! carries over between stages. The first failing stage stops the run.

pub mod bronze;
pub mod gold;
pub mod money;
pub mod report;
pub mod silver;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{
    bronze::BronzeGenerator,
    gold::GoldAggregator,
    report::{Report, Reporter},
    silver::SilverCleaner,
    writer::TierWriter,
};

use crate::config::LakehouseConfig;
use crate::error::Result;
use crate::models::{LakehousePaths, PipelineStats, Stage, StageStats};

use colored::*;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::info;

/// Orchestrator for a full pipeline run
#[derive(Debug)]
pub struct LakehousePipeline {
    config: LakehouseConfig,
    paths: LakehousePaths,
    writer: TierWriter,
}

impl LakehousePipeline {
    /// Create a pipeline for a validated configuration
    pub fn new(config: LakehouseConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            paths: config.paths(),
            writer: TierWriter::new(config.compression),
            config,
        })
    }

    pub fn paths(&self) -> &LakehousePaths {
        &self.paths
    }

    pub fn bronze(&self) -> BronzeGenerator {
        BronzeGenerator::new(self.paths.raw_csv.clone(), self.writer.clone())
    }

    pub fn silver(&self) -> SilverCleaner {
        SilverCleaner::new(
            self.paths.raw_csv.clone(),
            self.paths.clean_parquet.clone(),
            self.config.malformed_rows,
            self.writer.clone(),
        )
    }

    pub fn gold(&self) -> GoldAggregator {
        GoldAggregator::new(
            self.paths.clean_parquet.clone(),
            self.paths.aggregate_parquet.clone(),
            self.config.money_decimals,
            self.writer.clone(),
        )
    }

    pub fn reporter(&self) -> Reporter {
        Reporter::new(
            self.paths.clean_parquet.clone(),
            self.paths.aggregate_parquet.clone(),
            self.config.money_decimals,
        )
    }

    /// Run Generate -> Clean -> Aggregate and build the report
    ///
    /// Only stage banners are printed here; [`LakehousePipeline::run`] also
    /// prints the reports.
    pub fn execute(&self) -> Result<(PipelineStats, Report)> {
        let start_time = Instant::now();
        self.paths.ensure_dirs()?;

        let mut stats = PipelineStats::default();

        let bronze = self.bronze().generate()?;
        self.announce(&bronze, "Raw CSV created");
        stats.stages.push(bronze);

        let silver = self.silver().clean()?;
        self.announce(&silver, "Clean Parquet created");
        stats.stages.push(silver);

        let gold = self.gold().aggregate()?;
        self.announce(&gold, "Aggregate Parquet created");
        stats.stages.push(gold);

        let report = self.reporter().build()?;
        // rows_out counts every printed row across the three views
        stats.stages.push(StageStats::new(
            Stage::Report,
            report.daily_revenue.height(),
            report.daily_revenue.height() + report.top_products.height() + report.kpi.height(),
        ));

        stats.processing_time_ms = start_time.elapsed().as_millis();
        info!("Pipeline finished in {}ms", stats.processing_time_ms);

        Ok((stats, report))
    }

    /// Run every stage, print the reports and a short summary
    pub fn run(&self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let (stats, report) = self.execute()?;

        report.print();

        if !self.config.quiet {
            self.print_summary(&stats, start_time);
        }

        Ok(stats)
    }

    fn announce(&self, stats: &StageStats, message: &str) {
        if self.config.quiet {
            return;
        }

        let tag = format!("[{}]", stats.stage.name().to_uppercase());
        let path = stats
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!("{} {} -> {}", tag.bright_cyan().bold(), message, path);
    }

    fn print_summary(&self, stats: &PipelineStats, start_time: Instant) {
        println!("\n{}", "Pipeline Summary".bright_green().bold());
        println!(
            "  {} {}",
            "Time elapsed:".bright_cyan(),
            HumanDuration(start_time.elapsed()).to_string().bright_white()
        );

        if let Some(silver) = stats.stage(Stage::Silver) {
            println!(
                "  {} {} of {}",
                "Clean orders:".bright_cyan(),
                silver.rows_out.to_string().bright_white().bold(),
                silver.rows_in
            );
            if silver.rows_malformed > 0 {
                println!(
                    "  {} {}",
                    "Malformed rows:".bright_red(),
                    silver.rows_malformed.to_string().bright_red().bold()
                );
            }
        }

        if let Some(gold) = stats.stage(Stage::Gold) {
            println!(
                "  {} {}",
                "Daily rows:".bright_cyan(),
                gold.rows_out.to_string().bright_white().bold()
            );
        }
    }
}
