//! The linear report pipeline: resolve, acquire, parse, format, write.

use crate::config::{self, FileConfig, HeaderMode};
use crate::error::Result;
use crate::fetch::{self, FetchOptions};
use crate::output::{self, Destination};
use crate::report::{Report, ReportOptions};
use crate::source::{self, Source};
use crate::table;
use std::path::PathBuf;

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<String>,
    pub dest: Option<PathBuf>,
    pub stdout: bool,
    pub header: Option<HeaderMode>,
    pub group_by: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: Source,
    pub destination: Destination,
    pub header: HeaderMode,
    pub report: ReportOptions,
    pub fetch: FetchOptions,
}

impl RunConfig {
    /// Merge file config and overrides. `now` names the default report file.
    pub fn resolve(
        file: &FileConfig,
        overrides: &Overrides,
        now: chrono::NaiveDateTime,
    ) -> Result<Self> {
        let default_source = file.source.as_deref().unwrap_or(config::DEFAULT_SOURCE);
        let source = source::resolve_source(overrides.source.as_deref(), default_source)?;

        let destination = if overrides.stdout {
            if let Some(dest) = &overrides.dest {
                tracing::debug!("--stdout given, ignoring destination {}", dest.display());
            }
            Destination::Stdout
        } else {
            let path = overrides.dest.clone().unwrap_or_else(|| {
                let prefix = file.dest_prefix.as_deref().unwrap_or(config::DEFAULT_DEST_PREFIX);
                config::default_dest(prefix, now)
            });
            Destination::File(path)
        };

        Ok(Self {
            source,
            destination,
            header: overrides.header.unwrap_or(file.header),
            report: ReportOptions {
                group_by: overrides.group_by.clone().or_else(|| file.group_by.clone()),
            },
            fetch: FetchOptions::from(&file.http),
        })
    }

    /// [`RunConfig::resolve`] with the default filename stamped at the current local time.
    pub fn resolve_now(file: &FileConfig, overrides: &Overrides) -> Result<Self> {
        Self::resolve(file, overrides, chrono::Local::now().naive_local())
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub entries: usize,
    pub destination: Destination,
}

/// Run every stage once. The first failure stops the run before anything is written.
pub fn run(cfg: &RunConfig) -> Result<Summary> {
    tracing::info!("acquiring blacklist from {}", cfg.source);
    let bytes = fetch::acquire(&cfg.source, &cfg.fetch)?;

    tracing::info!("parsing {} bytes", bytes.len());
    let table = table::parse_table(&bytes, cfg.header)?;

    tracing::info!("formatting report for {} records", table.len());
    let report = Report::build(&table, &cfg.report)?;

    tracing::info!("writing report to {}", cfg.destination);
    output::write_report(&report, &cfg.destination)?;

    Ok(Summary {
        entries: report.entries(),
        destination: cfg.destination.clone(),
    })
}
