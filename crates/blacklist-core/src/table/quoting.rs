//! Strict quote check run before the csv reader, which accepts stray and
//! unterminated quotes silently.

use crate::error::{BlacklistError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StartRecord,
    StartField,
    Unquoted,
    Quoted,
    /// A `"` seen inside a quoted field: either an escape or the closing quote.
    QuoteInQuoted,
    Comment,
}

/// Reject quoting the csv reader would otherwise guess around.
///
/// A `"` may only open a field, close it, or be doubled inside it. Lines
/// starting with `#` are skipped.
pub(crate) fn check_quoting(text: &str) -> Result<()> {
    let mut state = State::StartRecord;
    let mut line: u64 = 1;
    let mut opened_at: u64 = 1;

    for c in text.chars() {
        state = match (state, c) {
            (State::Comment, '\n') => State::StartRecord,
            (State::Comment, _) => State::Comment,

            (State::Quoted, '"') => State::QuoteInQuoted,
            (State::Quoted, _) => State::Quoted,

            (State::StartRecord, '#') => State::Comment,
            (State::StartRecord, '\r' | '\n') => State::StartRecord,

            (State::StartRecord | State::StartField, '"') => {
                opened_at = line;
                State::Quoted
            }

            (State::QuoteInQuoted, '"') => State::Quoted,

            (State::StartRecord | State::StartField | State::Unquoted | State::QuoteInQuoted, ',') => {
                State::StartField
            }
            (State::StartField | State::Unquoted | State::QuoteInQuoted, '\n') => {
                State::StartRecord
            }
            (State::QuoteInQuoted, '\r') => State::QuoteInQuoted,
            (State::QuoteInQuoted, _) => {
                return Err(BlacklistError::malformed(
                    Some(line),
                    "unexpected character after closing quote",
                ));
            }

            (State::Unquoted, '"') => {
                return Err(BlacklistError::malformed(
                    Some(line),
                    "quote inside unquoted field",
                ));
            }
            (State::StartRecord | State::StartField | State::Unquoted, _) => State::Unquoted,
        };
        if c == '\n' {
            line += 1;
        }
    }

    if state == State::Quoted {
        return Err(BlacklistError::malformed(
            Some(opened_at),
            "unterminated quoted field",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_at(text: &str) -> (Option<u64>, String) {
        match check_quoting(text).unwrap_err() {
            BlacklistError::MalformedCsv { line, message } => (line, message),
            other => panic!("expected MalformedCsv, got {:?}", other),
        }
    }

    #[test]
    fn well_formed_quoting_passes() {
        check_quoting("id,reason\n1,\"spam, bulk\"\n2,\"say \"\"hi\"\"\"\n").unwrap();
        check_quoting("id,reason\r\n1,\"multi\nline\"\r\n").unwrap();
        check_quoting("a,,\"\"\n").unwrap();
        check_quoting("").unwrap();
    }

    #[test]
    fn quotes_in_comments_are_ignored() {
        check_quoting("# a \"quoted\" title\nid,reason\n").unwrap();
    }

    #[test]
    fn unterminated_quote_names_opening_line() {
        let (line, message) = error_at("id,reason\n1,\"spam\n2,abuse\n");
        assert_eq!(line, Some(2));
        assert!(message.contains("unterminated"));
    }

    #[test]
    fn text_after_closing_quote_is_rejected() {
        let (line, message) = error_at("id,reason\n1,\"sp\"am\n");
        assert_eq!(line, Some(2));
        assert!(message.contains("after closing quote"));
    }

    #[test]
    fn quote_inside_bare_field_is_rejected() {
        let (line, message) = error_at("id,reason\n1,sp\"am\n");
        assert_eq!(line, Some(2));
        assert!(message.contains("unquoted field"));
    }
}
