use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, SerReader};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use tabrun_core::{
    execute_run, generate_sample_data, standard_stages, RunOptions, RunReport, RunStatus,
    SAMPLE_ROWS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Human,
    Json,
}

/// Execute the clean/analyze/summarize pipeline
#[derive(Debug, Parser)]
pub struct RunCommand {
    /// CSV file with Date, Product, Sales, Region columns; omit to generate
    /// sample data
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Number of rows to generate when no input file is given
    #[arg(long, value_name = "N", default_value_t = SAMPLE_ROWS)]
    pub rows: usize,

    /// Fixed seed for the randomized revenue factors and generated data
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output format (human, json)
    #[arg(long, value_name = "FORMAT", default_value = "human")]
    pub output: String,

    /// Print the intermediate cleaned and analyzed tables
    #[arg(long)]
    pub show_stages: bool,
}

impl RunCommand {
    pub fn execute(&self) -> Result<i32> {
        let output_format = self.output_format()?;
        let input = self.load_input()?;

        let options = RunOptions {
            seed: self.seed,
            cancel: None,
        };
        let report = execute_run(&standard_stages(), input, &options);

        match output_format {
            OutputFormat::Human => self.report_human(&report),
            OutputFormat::Json => report_json(&report)?,
        }

        Ok(match report.record.status {
            RunStatus::Completed => 0,
            RunStatus::Failed | RunStatus::Cancelled => 1,
        })
    }

    fn output_format(&self) -> Result<OutputFormat> {
        match self.output.as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unsupported output format: {other}"),
        }
    }

    fn load_input(&self) -> Result<DataFrame> {
        match &self.input {
            Some(path) => CsvReadOptions::default()
                .with_has_header(true)
                .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
                .try_into_reader_with_file_path(Some(path.clone()))
                .with_context(|| format!("failed to open input file: {}", path.display()))?
                .finish()
                .with_context(|| format!("failed to read CSV input: {}", path.display())),
            None => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                generate_sample_data(self.rows, &mut rng)
                    .context("failed to generate sample data")
            }
        }
    }

    fn report_human(&self, report: &RunReport) {
        if self.show_stages {
            for (outcome, frame) in report.record.stages.iter().zip(&report.outputs) {
                println!(
                    "== {} ({} rows x {} columns) ==",
                    outcome.stage, outcome.rows, outcome.columns
                );
                println!("{frame}");
            }
        } else if report.record.status == RunStatus::Completed {
            if let Some(summary) = report.outputs.last() {
                println!("{summary}");
            }
        }

        match &report.record.error {
            Some(error) => eprintln!("run {} {:?}: {error}", report.record.id, report.record.status),
            None => println!(
                "run {} completed in {} stage(s)",
                report.record.id,
                report.record.stages.len()
            ),
        }
    }
}

fn report_json(report: &RunReport) -> Result<()> {
    let payload = json!({
        "record": &report.record,
        "summary": summary_metrics(report),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn summary_metrics(report: &RunReport) -> serde_json::Value {
    if report.record.status != RunStatus::Completed {
        return serde_json::Value::Null;
    }
    let Some(frame) = report.outputs.last() else {
        return serde_json::Value::Null;
    };

    let pairs = (|| -> Result<serde_json::Map<String, serde_json::Value>> {
        let metrics = frame.column("Metric")?.as_materialized_series().clone();
        let values = frame.column("Value")?.as_materialized_series().clone();
        let mut map = serde_json::Map::new();
        for (metric, value) in metrics.str()?.into_iter().zip(values.str()?) {
            if let (Some(metric), Some(value)) = (metric, value) {
                map.insert(
                    metric.to_string(),
                    serde_json::Value::String(value.to_string()),
                );
            }
        }
        Ok(map)
    })();

    match pairs {
        Ok(map) => serde_json::Value::Object(map),
        Err(_) => serde_json::Value::Null,
    }
}
