//! Validates the kanji readings of every question set file in a directory.
//!
//! Exits with 0 if every reading is valid, 1 if any reading is invalid or a placeholder
//! and 2 if the dictionaries, question files or configuration could not be loaded, or the
//! JSON report could not be written. The summary is printed before the JSON report is written.

use anyhow::Context;
use clap::Parser;
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{error, info};
use yomi_check::{question, Config, Dictionaries, ValidationReport, Validator};

#[derive(Parser, Debug)]
#[command(name = "yomi-check")]
#[command(about = "Check the readings of [kanji|reading] annotations in question files")]
#[command(version)]
struct Args {
    /// TOML configuration file, flags override its values
    #[arg(short, long, env = "YOMI_CHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Kanji reading dictionary (JSON)
    #[arg(long, value_name = "FILE")]
    kanji_readings: Option<PathBuf>,

    /// Compound word reading dictionary (JSON)
    #[arg(long, value_name = "FILE", conflicts_with = "no_compounds")]
    compound_readings: Option<PathBuf>,

    /// Do not use a compound word dictionary
    #[arg(long)]
    no_compounds: bool,

    /// Directory containing the question set files
    #[arg(short, long, value_name = "DIR")]
    questions: Option<PathBuf>,

    /// Only files starting with this prefix are checked
    #[arg(long)]
    file_prefix: Option<String>,

    /// Reading that marks an unwritten reading
    #[arg(long)]
    placeholder: Option<String>,

    /// Write the full report as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Worker threads, 0 for one per core
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Log every decision
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(path) = self.kanji_readings {
            config.kanji_readings = path;
        }
        if self.no_compounds {
            config.compound_readings = None;
        } else if let Some(path) = self.compound_readings {
            config.compound_readings = Some(path);
        }
        if let Some(dir) = self.questions {
            config.questions_dir = dir;
        }
        if let Some(prefix) = self.file_prefix {
            config.file_prefix = prefix;
        }
        if let Some(placeholder) = self.placeholder {
            config.placeholder = placeholder;
        }
        if let Some(path) = self.report {
            config.report_path = Some(path);
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        config.check()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let filter = if args.verbose {
        filter.add_directive(tracing::Level::DEBUG.into())
    } else {
        filter
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let (config, report) = match run(args) {
        Ok(finished) => finished,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::from(2);
        }
    };
    print!("{report}");

    if let Some(path) = &config.report_path {
        if let Err(e) = write_report(&report, path) {
            error!("{e:#}");
            return ExitCode::from(2);
        }
    }
    if report.has_failures() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn run(args: Args) -> anyhow::Result<(Config, ValidationReport)> {
    let config = args.into_config()?;
    info!(
        "yomi-check v{}: checking {}",
        env!("CARGO_PKG_VERSION"),
        config.questions_dir.display()
    );

    let dictionaries =
        Dictionaries::load(&config.kanji_readings, config.compound_readings.as_deref())
            .context("failed to load the reading dictionaries")?;
    let sets = question::load_all(&config.questions_dir, &config.file_prefix)
        .context("failed to load the question files")?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .context("failed to start worker threads")?;
    let validator = Validator::new(&dictionaries).with_placeholder(config.placeholder.as_str());
    let results = pool.install(|| validator.validate_all(&sets));
    let report = ValidationReport::build(&results, &dictionaries);
    Ok((config, report))
}

fn write_report(report: &ValidationReport, path: &Path) -> anyhow::Result<()> {
    report
        .write_json(path)
        .with_context(|| format!("failed to write the report to {}", path.display()))?;
    info!("detailed report saved to {}", path.display());
    Ok(())
}
