//! CSV parsing into ordered blacklist records.
//!
//! `#` lines are comments and feed the [`Preamble`]. Every data row must have
//! the same width as the header (or the first row when there is none).

mod preamble;
mod quoting;
mod record;

pub use preamble::{LastUpdated, Preamble};
pub use record::{BlacklistRecord, BlacklistTable};

use crate::config::HeaderMode;
use crate::error::{BlacklistError, Result};

/// Parse raw feed bytes into a table.
///
/// Empty or header-only input gives a table without records.
pub fn parse_table(bytes: &[u8], mode: HeaderMode) -> Result<BlacklistTable> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let line = bytes[..e.valid_up_to()].iter().filter(|b| **b == b'\n').count() as u64 + 1;
        BlacklistError::malformed(Some(line), format!("input is not valid UTF-8 ({})", e))
    })?;

    quoting::check_quoting(text)?;
    let mut preamble = preamble::scan(text);
    let mut rows = read_rows(text)?;

    let header = match mode {
        HeaderMode::Absent => None,
        HeaderMode::Present => take_first(&mut rows),
        HeaderMode::Auto => match commented_header(&preamble, &rows)? {
            Some(columns) => {
                if preamble.title == preamble.commented_columns {
                    preamble.title = None;
                }
                Some(columns)
            }
            None => take_first(&mut rows),
        },
    };

    let width = header
        .as_ref()
        .map(Vec::len)
        .or_else(|| rows.first().map(BlacklistRecord::len));
    if let Some(width) = width {
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(BlacklistError::malformed(
                Some(bad.line()),
                format!("expected {} fields, found {}", width, bad.len()),
            ));
        }
    }

    if let Some(declared) = preamble.declared_entries {
        if declared != rows.len() {
            tracing::warn!(
                "feed declares {} entries but {} rows were parsed",
                declared,
                rows.len()
            );
        }
    }
    tracing::debug!(
        "parsed {} records (header: {:?})",
        rows.len(),
        header.as_deref().unwrap_or_default()
    );

    Ok(BlacklistTable {
        header,
        records: rows,
        preamble,
    })
}

/// All non-comment rows, unvalidated for width.
fn read_rows(text: &str) -> Result<Vec<BlacklistRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| record_line(text, p.byte()));
            BlacklistError::malformed(line, e.to_string())
        })?;
        let line = record.position().map_or(0, |p| record_line(text, p.byte()));
        let fields = record.iter().map(|f| f.trim().to_string()).collect();
        rows.push(BlacklistRecord::new(fields, line));
    }
    Ok(rows)
}

/// 1-based line of the record starting at or after `byte`.
///
/// The reader reports where it began looking, which may be a comment or blank
/// line before the record itself; those are skipped here.
fn record_line(text: &str, byte: u64) -> u64 {
    let bytes = text.as_bytes();
    let mut pos = usize::try_from(byte).map_or(bytes.len(), |b| b.min(bytes.len()));
    loop {
        match bytes.get(pos) {
            Some(b'#') => match bytes[pos..].iter().position(|b| *b == b'\n') {
                Some(n) => pos += n + 1,
                None => pos = bytes.len(),
            },
            Some(b'\r' | b'\n') => pos += 1,
            _ => break,
        }
    }
    bytes[..pos].iter().filter(|b| **b == b'\n').count() as u64 + 1
}

fn take_first(rows: &mut Vec<BlacklistRecord>) -> Option<Vec<String>> {
    if rows.is_empty() {
        return None;
    }
    Some(rows.remove(0).fields().to_vec())
}

/// A commented column list is the header when it has several columns and
/// matches the data width (when there is data to compare against). It is
/// refused when the first data row itself looks like a header.
fn commented_header(
    preamble: &Preamble,
    rows: &[BlacklistRecord],
) -> Result<Option<Vec<String>>> {
    let Some(line) = preamble.commented_columns.as_deref() else {
        return Ok(None);
    };
    let columns = match read_rows(line).ok().and_then(|rows| rows.into_iter().next()) {
        Some(r) => r.fields().to_vec(),
        None => return Ok(None),
    };
    let fits = columns.len() > 1 && rows.first().map_or(true, |r| r.len() == columns.len());
    Ok((fits && !first_row_is_header(rows)).then_some(columns))
}

/// A first row without digits followed by rows with digits reads as column names.
fn first_row_is_header(rows: &[BlacklistRecord]) -> bool {
    let has_digit = |r: &BlacklistRecord| {
        r.fields()
            .iter()
            .any(|f| f.bytes().any(|b| b.is_ascii_digit()))
    };
    match rows.split_first() {
        Some((first, rest)) => !has_digit(first) && rest.iter().any(has_digit),
        None => false,
    }
}
