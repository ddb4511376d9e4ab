use std::{
    fmt,
    io::{self, BufWriter, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Args};
use log::{debug, error};
use sieve_engine::FilterChain;
use sieve_runtime::default_thread_count;
use sieve_scanner::{ScanOutcome, ScanRequest, run_scan};

use crate::{
    output::write_atomic,
    printer::{
        ColorChoice, HumanPrinter, JsonPrinter, OutputFormat, ReportContext, ReportPrinter,
        print_report,
    },
};

/// Exit status for invalid roots, unknown filters and bad filter values.
const EXIT_CONFIG: u8 = 2;
/// Exit status when the report could not be written.
const EXIT_IO: u8 = 1;

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Write the report to FILE instead of stdout. The file only appears once
    /// the report is complete.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,
}

impl OutputOptions {
    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    fn use_color(&self) -> bool {
        match ColorChoice::parse(&self.color) {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            // never color a report file
            ColorChoice::Auto => self.output.is_none() && io::stdout().is_terminal(),
        }
    }

    /// Render the whole report into `out`.
    fn render(
        &self,
        outcome: &ScanOutcome,
        filters: &FilterChain,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let ctx = ReportContext {
            root: &outcome.root,
            filters,
        };

        let mut printer: Box<dyn ReportPrinter + '_> = match self.format() {
            OutputFormat::Human => Box::new(HumanPrinter::new(out, self.use_color())),
            OutputFormat::Json => Box::new(JsonPrinter::new(out)),
        };

        print_report(printer.as_mut(), &outcome.body.groups, &outcome.summary, &ctx)
    }
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan recursively
    pub root: PathBuf,

    /// Filter as a FLAG VALUE pair; repeatable, applied in the given order.
    ///
    /// Flags: -e|ext LIST, -g|size-gt SIZE, -l|size-lt SIZE,
    /// -t|time YYYY-MM-DD:YYYY-MM-DD, -p|perm PERMISSIONS.
    /// In an extension LIST a lone `.` selects files without an extension.
    #[arg(
        long,
        short = 'f',
        num_args = 2,
        value_names = ["FLAG", "VALUE"],
        allow_hyphen_values = true,
        action = ArgAction::Append
    )]
    pub filter: Vec<String>,

    /// Gitignore-style pattern of paths to leave out; repeatable
    #[arg(long, short = 'x', value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Worker threads (default: SIEVE_THREADS or available parallelism)
    #[arg(long, short = 'j', value_name = "N")]
    pub threads: Option<usize>,

    /// Output formatting options
    #[command(flatten)]
    pub output: OutputOptions,
}

impl ScanArgs {
    /// `--filter` values come flattened; clap guarantees they pair up.
    fn filter_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.filter
            .chunks_exact(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

pub fn run(args: ScanArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[error] {e:#}");
            eprintln!("[sieve] {e:#}");
            ExitCode::from(EXIT_IO)
        }
    }
}

fn config_error(e: &dyn fmt::Display) -> ExitCode {
    error!("[config] {e}");
    eprintln!("[sieve] {e}");
    ExitCode::from(EXIT_CONFIG)
}

fn execute(args: ScanArgs) -> Result<ExitCode> {
    let filters = match FilterChain::from_pairs(args.filter_pairs()) {
        Ok(f) => f,
        Err(e) => return Ok(config_error(&e)),
    };

    let request = ScanRequest {
        root: args.root.clone(),
        filters,
        excludes: args.exclude.clone(),
        threads: args.threads.unwrap_or_else(default_thread_count),
    };

    let outcome = match run_scan(&request) {
        Ok(o) => o,
        Err(e) if e.is_config_error() => return Ok(config_error(&e)),
        Err(e) => return Err(e).context("scan failed"),
    };

    match &args.output.output {
        Some(path) => {
            write_atomic(path, |w| args.output.render(&outcome, &request.filters, w))
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            debug!("[report] written to {}", path.display());
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            args.output
                .render(&outcome, &request.filters, &mut out)
                .context("failed to write report to stdout")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
