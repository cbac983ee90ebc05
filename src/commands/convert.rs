use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::models::ViolationReport;
use crate::output;
use crate::parsers::{parse_report_file, ReaderOptions};

#[derive(Args, Debug, Clone, Default)]
pub struct ConvertArgs {
    /// OCLint XML report (default: [report] path from config)
    pub report: Option<PathBuf>,

    /// Output format [text|json] (default: [output] format from config)
    #[arg(short, long, value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Output file (default stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (default: .ocreport/config.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report file names under this directory relative to it
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Exit with an error when the report could not be fully read
    #[arg(long)]
    pub strict: bool,

    /// Verbose
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run(args: ConvertArgs, cfg: &Config) -> Result<()> {
    let report_path = args.report.unwrap_or_else(|| cfg.report.path.clone());
    let options = ReaderOptions {
        base_dir: args.base_dir.or_else(|| cfg.report.base_dir.clone()),
    };

    tracing::info!(path = %report_path.display(), "Reading OCLint report");
    let report = convert_report(&report_path, &options);

    let format = args.format.unwrap_or_else(|| cfg.output.format.clone());
    let rendered = if format == "json" {
        output::format_json_report(&report)?
    } else {
        output::format_text_report(&report)
    };

    if let Some(p) = args.output {
        std::fs::write(p, rendered)?;
    } else {
        println!("{}", rendered);
    }

    if args.strict && !report.complete {
        anyhow::bail!("report {} could not be fully read", report_path.display());
    }

    Ok(())
}

/// Parses `path` into the document written by `convert`.
pub fn convert_report(path: &Path, options: &ReaderOptions) -> ViolationReport {
    let outcome = parse_report_file(path, options);
    let complete = outcome.is_complete();
    ViolationReport::new(path.display().to_string(), complete, outcome.into_violations())
}
