//! Sectioned layout: one `=== value ===` block per distinct group value.

use crate::table::BlacklistRecord;
use std::collections::BTreeMap;

/// Append sections for `records` grouped by the field at `index`.
///
/// Sections are sorted by value; entries inside a section keep input order and
/// list the remaining fields joined with `:`.
pub(super) fn push_sections(lines: &mut Vec<String>, records: &[BlacklistRecord], index: usize) {
    let mut sections: BTreeMap<&str, Vec<&BlacklistRecord>> = BTreeMap::new();
    for record in records {
        sections
            .entry(record.get(index).unwrap_or_default())
            .or_default()
            .push(record);
    }

    for (value, members) in sections {
        lines.push(String::new());
        lines.push(format!("=== {} ===", value));
        for record in members {
            lines.push(section_entry(record, index));
        }
    }
}

fn section_entry(record: &BlacklistRecord, index: usize) -> String {
    let rest: Vec<&str> = record
        .fields()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, f)| f.as_str())
        .collect();
    if rest.is_empty() {
        return record.get(index).unwrap_or_default().to_string();
    }
    rest.join(":")
}
