//! Metadata carried in `#` comment lines of abuse.ch-style feeds.

use chrono::NaiveDateTime;

const LAST_UPDATED: &str = "Last updated:";
const NUMBER_OF_ENTRIES: &str = "Number of entries:";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Feed timestamp as written, plus its parsed value when it matches
/// `YYYY-MM-DD HH:MM:SS (TZ)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastUpdated {
    pub raw: String,
    pub parsed: Option<NaiveDateTime>,
}

impl LastUpdated {
    fn parse(raw: &str) -> Self {
        let stamp = raw.split_once(" (").map_or(raw, |(s, _)| s).trim();
        Self {
            raw: raw.to_string(),
            parsed: NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok(),
        }
    }
}

/// Comment metadata found around the data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preamble {
    pub title: Option<String>,
    pub last_updated: Option<LastUpdated>,
    /// Entry count the feed claims in its trailer.
    pub declared_entries: Option<usize>,
    /// Comment line directly above the first data row, e.g. `DstIP,DstPort,Reason`.
    pub commented_columns: Option<String>,
}

/// Text of a comment line with surrounding `#` and whitespace removed.
pub(crate) fn comment_text(line: &str) -> Option<&str> {
    if !line.starts_with('#') {
        return None;
    }
    Some(line.trim().trim_matches('#').trim())
}

/// Scan comment lines of `text`. Only comments before the first data row are
/// considered for the title; the column list must be the comment line directly
/// above the first data row. The entry count may appear anywhere.
pub(crate) fn scan(text: &str) -> Preamble {
    let mut preamble = Preamble::default();
    let mut leading: Vec<&str> = Vec::new();
    let mut in_leading = true;
    let mut prev_comment: Option<&str> = None;

    for line in text.lines() {
        let Some(comment) = comment_text(line) else {
            if line.trim().is_empty() {
                prev_comment = None;
                continue;
            }
            if in_leading {
                preamble.commented_columns = prev_comment.map(str::to_string);
                in_leading = false;
            }
            prev_comment = None;
            continue;
        };
        if comment.is_empty() {
            prev_comment = None;
            continue;
        }
        if let Some(rest) = comment.strip_prefix(NUMBER_OF_ENTRIES) {
            preamble.declared_entries = rest.trim().parse().ok();
            prev_comment = None;
            continue;
        }
        if !in_leading {
            continue;
        }
        if let Some(rest) = comment.strip_prefix(LAST_UPDATED) {
            preamble.last_updated = Some(LastUpdated::parse(rest.trim()));
            prev_comment = None;
            continue;
        }
        leading.push(comment);
        prev_comment = Some(comment);
    }

    preamble.title = leading.first().map(|s| s.to_string());
    preamble
}
