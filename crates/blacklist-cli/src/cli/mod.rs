//! CLI for the blacklist report generator.

use anyhow::{Context, Result};
use blacklist_core::config::{self, HeaderMode};
use blacklist_core::error::{self, codes, BlacklistError};
use blacklist_core::pipeline::{self, Overrides, RunConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Retrieve a CSV blacklist and generate a report.
#[derive(Debug, Parser)]
#[command(name = "blacklist_parser", version)]
#[command(about = "Retrieve and parse a CSV blacklist, then generate a report", long_about = None)]
pub struct Cli {
    /// Output info and debug messages on stderr.
    #[arg(long)]
    pub verbose: bool,

    /// Source for the blacklist CSV file (path or http/https URL).
    #[arg(long, value_name = "SOURCE")]
    pub source: Option<String>,

    /// Filename for the generated report. Ignored if --stdout is used.
    #[arg(long, value_name = "DEST")]
    pub dest: Option<PathBuf>,

    /// Write the report to stdout rather than to a file.
    #[arg(long)]
    pub stdout: bool,

    /// Config file to use instead of ~/.config/blacklist-report/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Group report entries into sections by this column.
    #[arg(long, value_name = "COLUMN")]
    pub group_by: Option<String>,

    /// How to find the header row.
    #[arg(long, value_enum, value_name = "MODE")]
    pub header: Option<HeaderArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeaderArg {
    Auto,
    Present,
    Absent,
}

impl From<HeaderArg> for HeaderMode {
    fn from(arg: HeaderArg) -> Self {
        match arg {
            HeaderArg::Auto => HeaderMode::Auto,
            HeaderArg::Present => HeaderMode::Present,
            HeaderArg::Absent => HeaderMode::Absent,
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            source: self.source.clone(),
            dest: self.dest.clone(),
            stdout: self.stdout,
            header: self.header.map(HeaderMode::from),
            group_by: self.group_by.clone(),
        }
    }

    pub fn run(&self) -> Result<()> {
        tracing::info!("starting blacklist parser");
        let file_cfg = config::load(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", file_cfg);

        let run_cfg = RunConfig::resolve_now(&file_cfg, &self.overrides())?;
        let summary = pipeline::run(&run_cfg)
            .with_context(|| format!("could not generate report from {}", run_cfg.source))?;

        tracing::info!(
            "finished: {} entries written to {}",
            summary.entries,
            summary.destination
        );
        Ok(())
    }
}

/// Exit code for a failed run: the pipeline error's code, or a config error.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|e| e.downcast_ref::<BlacklistError>())
        .map(error::exit_code)
        .unwrap_or(codes::CONFIG_ERROR)
}

#[cfg(test)]
mod tests;
