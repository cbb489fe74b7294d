//! CLI entry point for the student marks report tool.
//!
//! Provides subcommands for producing the full marks report and for printing
//! grade statistics only.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use marks_report::{
    config::{ProcessorConfig, Weighting},
    error::MarksError,
    output::{
        StatisticsExport, log_statistics_json, publish, render_statistics, write_csv,
        write_statistics_json,
    },
    pipeline::{Processor, Run},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "marks_report")]
#[command(about = "Grade student marks and write a ranked report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a marks file, write the ranked report and print grade statistics
    Process {
        #[command(flatten)]
        input: InputArgs,

        /// File to write the report to
        #[arg(short, long, default_value = "results.txt")]
        output: PathBuf,

        /// Optional: also export the ranked records as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Optional: also export the statistics as JSON
        #[arg(long, value_name = "FILE")]
        stats_json: Option<PathBuf>,
    },
    /// Read a marks file and print grade statistics without writing a report
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Marks file: one `<reg_number> <exam_mark> <coursework_mark>` per line
    #[arg(short, long, default_value = "student_marks.txt")]
    input: PathBuf,

    /// Exam weight (default 0.6)
    #[arg(long)]
    exam_weight: Option<f64>,

    /// Coursework weight (default 0.4)
    #[arg(long)]
    coursework_weight: Option<f64>,

    /// Optional: JSON file with `exam_weight` / `coursework_weight`
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl InputArgs {
    fn weighting(&self) -> Result<Weighting> {
        let config = match &self.config {
            Some(path) => ProcessorConfig::load(path)?,
            None => ProcessorConfig::default(),
        };
        config.weighting(self.exam_weight, self.coursework_weight)
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/marks_report.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("marks_report.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            csv,
            stats_json,
        } => {
            let run = load(&input)?;
            let stats = publish(&run.report, &output, &mut std::io::stdout().lock())?;

            let export = StatisticsExport::new(&run.report, &stats);
            log_statistics_json(&export)?;

            if let Some(path) = csv {
                write_csv(&path, &run.report)?;
            }
            if let Some(path) = stats_json {
                write_statistics_json(&path, &export)?;
            }

            info!(output = %output.display(), "Processing completed successfully");
        }
        Commands::Stats { input } => {
            let run = load(&input)?;
            print!("{}", render_statistics(&run.report.statistics()));
        }
    }

    Ok(())
}

/// Resolves the weighting, then reads, scores and ranks the input file,
/// logging every skipped line.
#[tracing::instrument(skip(args), fields(input = %args.input.display()))]
fn load(args: &InputArgs) -> Result<Run> {
    let weighting = args.weighting()?;
    info!(
        exam = weighting.exam(),
        coursework = weighting.coursework(),
        "Using weighting"
    );

    match Processor::new(weighting).process_file(&args.input) {
        Ok(run) => {
            for d in &run.diagnostics {
                warn!(line = d.line, "{}. Skipping", d);
            }
            info!(records = run.report.len(), "Students sorted by overall mark");
            Ok(run)
        }
        Err(e) => {
            for d in e.diagnostics() {
                warn!(line = d.line, "{}. Skipping", d);
            }
            if let MarksError::InputUnreadable { source, .. } = &e {
                error!(error = %source, "Input file could not be read");
            }
            Err(e.into())
        }
    }
}
