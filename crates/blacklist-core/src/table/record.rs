//! Parsed rows and the table that owns them.

use super::preamble::Preamble;

/// One data row: its fields in column order and the line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistRecord {
    fields: Vec<String>,
    line: u64,
}

impl BlacklistRecord {
    pub(crate) fn new(fields: Vec<String>, line: u64) -> Self {
        Self { fields, line }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field by position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// 1-based line of the source text where this row starts.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Result of parsing a blacklist CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlacklistTable {
    pub(crate) header: Option<Vec<String>>,
    pub(crate) records: Vec<BlacklistRecord>,
    pub(crate) preamble: Preamble,
}

impl BlacklistTable {
    /// Column names, when the feed has a header.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Data rows in input order.
    pub fn records(&self) -> &[BlacklistRecord] {
        &self.records
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the first column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.as_ref()?.iter().position(|c| c == name)
    }

    /// Field of `record` by column name. None without a header or for unknown names.
    pub fn value<'a>(&self, record: &'a BlacklistRecord, name: &str) -> Option<&'a str> {
        record.get(self.column_index(name)?)
    }
}
