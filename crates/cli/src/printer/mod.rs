use std::{
    io::{self, Write},
    path::Path,
};

use sieve_engine::{FilterChain, ReportGroup, SummaryStats};
use sieve_fs::FileRecord;
use sieve_runtime::REPORT_TIME_FORMAT;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report with owner sections.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn parse(s: &str) -> ColorChoice {
        match s {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Static context about one report.
#[derive(Debug)]
pub struct ReportContext<'a> {
    pub root: &'a Path,
    pub filters: &'a FilterChain,
}

/// Receives a finished report body, group by group, and renders it.
pub trait ReportPrinter {
    /// Title and anything else that precedes the first group.
    fn begin(&mut self, ctx: &ReportContext<'_>) -> io::Result<()>;

    fn print_group(&mut self, group: &ReportGroup, ctx: &ReportContext<'_>) -> io::Result<()>;

    /// Summary section; always printed, also for an empty body.
    fn finish(&mut self, summary: &SummaryStats, ctx: &ReportContext<'_>) -> io::Result<()>;
}

/// Human-readable printer with optional color for owner headers.
pub struct HumanPrinter<W: Write> {
    out: W,
    use_color: bool,
}

impl<W: Write> HumanPrinter<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    #[inline]
    fn format_owner(&self, owner: &str) -> String {
        if self.use_color {
            format!("\x1b[1;34m{}\x1b[0m", owner)
        } else {
            owner.to_owned()
        }
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn format_entry(rec: &FileRecord) -> String {
    format!(
        "{}  {} bytes  {}  {}",
        rec.path.display(),
        rec.size,
        rec.permissions,
        rec.modified.format(REPORT_TIME_FORMAT)
    )
}

impl<W: Write> ReportPrinter for HumanPrinter<W> {
    fn begin(&mut self, ctx: &ReportContext<'_>) -> io::Result<()> {
        writeln!(self.out, "File report for {}", ctx.root.display())?;

        if ctx.filters.is_empty() {
            writeln!(self.out, "Filters: none")?;
        } else {
            let described: Vec<String> = ctx.filters.specs().iter().map(|f| f.to_string()).collect();
            writeln!(self.out, "Filters: {}", described.join(", "))?;
        }

        Ok(())
    }

    fn print_group(&mut self, group: &ReportGroup, _ctx: &ReportContext<'_>) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Owner: {} ({}, {} bytes)",
            self.format_owner(&group.owner),
            plural(group.len(), "file"),
            group.total_size()
        )?;

        for rec in &group.records {
            writeln!(self.out, "  {}", format_entry(rec))?;
        }

        Ok(())
    }

    fn finish(&mut self, summary: &SummaryStats, _ctx: &ReportContext<'_>) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Summary")?;
        writeln!(self.out, "  Total files: {}", summary.total_files)?;
        writeln!(self.out, "  Total size: {} bytes", summary.total_size)?;
        self.out.flush()
    }
}

/// NDJSON printer: one object per file, then one summary object.
pub struct JsonPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportPrinter for JsonPrinter<W> {
    fn begin(&mut self, _ctx: &ReportContext<'_>) -> io::Result<()> {
        Ok(())
    }

    fn print_group(&mut self, group: &ReportGroup, _ctx: &ReportContext<'_>) -> io::Result<()> {
        for rec in &group.records {
            let obj = serde_json::json!({
                "type": "file",
                "owner": group.owner,
                "path": rec.path.display().to_string(),
                "size": rec.size,
                "permissions": rec.permissions,
                "modified": rec.modified.to_rfc3339(),
            });
            writeln!(self.out, "{}", obj)?;
        }
        Ok(())
    }

    fn finish(&mut self, summary: &SummaryStats, ctx: &ReportContext<'_>) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "summary",
            "root": ctx.root.display().to_string(),
            "total_files": summary.total_files,
            "total_size": summary.total_size,
        });
        writeln!(self.out, "{}", obj)?;
        self.out.flush()
    }
}

/// Drive `printer` over a whole report.
pub fn print_report<P: ReportPrinter + ?Sized>(
    printer: &mut P,
    groups: &[ReportGroup],
    summary: &SummaryStats,
    ctx: &ReportContext<'_>,
) -> io::Result<()> {
    printer.begin(ctx)?;
    for group in groups {
        printer.print_group(group, ctx)?;
    }
    printer.finish(summary, ctx)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
