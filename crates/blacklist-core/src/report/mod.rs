//! Report formatting.
//!
//! Layout:
//!
//! ```text
//! abuse.ch SSLBL IP Blacklist (CSV) Blacklist Report
//! (2 entries found at May 01 12:34:56 2017):
//!
//! 1.2.3.4 — 443, TrickBot C&C
//! 5.6.7.8 — 8443, Dridex C&C
//! ```
//!
//! With a group-by column the entries are replaced by `=== value ===` sections
//! in ascending value order (see [`group`]).

mod group;

use crate::error::{BlacklistError, Result};
use crate::table::{BlacklistRecord, BlacklistTable, Preamble};

/// Separator between the identifier and the rest of a flat entry.
pub const ENTRY_SEPARATOR: &str = " — ";

const REPORT_SUFFIX: &str = "Blacklist Report";
const DISPLAY_TIMESTAMP: &str = "%b %d %H:%M:%S %Y";

/// Formatting choices that do not come from the feed itself.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Column whose values become report sections.
    pub group_by: Option<String>,
}

/// Rendered report lines. Identical tables and options always give identical reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    lines: Vec<String>,
    entries: usize,
}

impl Report {
    pub fn build(table: &BlacklistTable, opts: &ReportOptions) -> Result<Self> {
        let mut lines = vec![headline(table.preamble()), count_line(table)];

        match opts.group_by.as_deref() {
            Some(column) => {
                let index = group_column(table, column)?;
                group::push_sections(&mut lines, table.records(), index);
            }
            None => {
                if !table.is_empty() {
                    lines.push(String::new());
                }
                lines.extend(table.records().iter().map(flat_entry));
            }
        }

        Ok(Self {
            lines,
            entries: table.len(),
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of records listed.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Full report text, one line per entry, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

fn headline(preamble: &Preamble) -> String {
    match preamble.title.as_deref() {
        Some(title) => format!("{} {}", title, REPORT_SUFFIX),
        None => REPORT_SUFFIX.to_string(),
    }
}

fn count_line(table: &BlacklistTable) -> String {
    let n = table.len();
    let noun = if n == 1 { "entry" } else { "entries" };
    match &table.preamble().last_updated {
        Some(lu) => {
            let at = lu
                .parsed
                .map(|t| t.format(DISPLAY_TIMESTAMP).to_string())
                .unwrap_or_else(|| lu.raw.clone());
            format!("({} {} found at {}):", n, noun, at)
        }
        None => format!("({} {} found):", n, noun),
    }
}

fn flat_entry(record: &BlacklistRecord) -> String {
    match record.fields().split_first() {
        Some((id, rest)) if !rest.is_empty() => {
            format!("{}{}{}", id, ENTRY_SEPARATOR, rest.join(", "))
        }
        Some((id, _)) => id.clone(),
        None => String::new(),
    }
}

fn group_column(table: &BlacklistTable, column: &str) -> Result<usize> {
    if table.header().is_none() {
        return Err(BlacklistError::Config(format!(
            "cannot group by '{}': the feed has no header row",
            column
        )));
    }
    table.column_index(column).ok_or_else(|| {
        BlacklistError::Config(format!(
            "unknown group-by column '{}' (columns: {})",
            column,
            table.header().unwrap_or_default().join(", ")
        ))
    })
}
