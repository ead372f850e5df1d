//! Error taxonomy for the report pipeline and the exit codes they map to.

use std::io;
use std::path::PathBuf;

/// Exit codes for `blacklist_parser`.
pub mod codes {
    pub const SUCCESS: u8 = 0;
    pub const CONFIG_ERROR: u8 = 1;
    pub const SOURCE_UNAVAILABLE: u8 = 2;
    pub const FETCH_FAILED: u8 = 3;
    pub const MALFORMED_CSV: u8 = 4;
    pub const WRITE_FAILED: u8 = 5;
}

/// Every failure a pipeline stage can report. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum BlacklistError {
    #[error("fetch of {url} failed: {reason}")]
    Fetch { url: String, reason: FetchFailure },

    #[error("source not found: {0}")]
    NotFound(PathBuf),

    #[error("permission denied reading source: {0}")]
    Permission(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV{}: {message}", line_suffix(.line))]
    MalformedCsv { line: Option<u64>, message: String },

    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Why a remote fetch failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    #[error("timed out")]
    Timeout,

    #[error("host unreachable ({0})")]
    Unreachable(curl::Error),

    #[error("HTTP {0}")]
    Status(u32),

    #[error("transfer error ({0})")]
    Transport(curl::Error),
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(n) => format!(" at line {}", n),
        None => String::new(),
    }
}

impl BlacklistError {
    pub(crate) fn malformed(line: Option<u64>, message: impl Into<String>) -> Self {
        BlacklistError::MalformedCsv {
            line,
            message: message.into(),
        }
    }
}

/// Map an error to its process exit code.
pub fn exit_code(err: &BlacklistError) -> u8 {
    match err {
        BlacklistError::Fetch { .. } => codes::FETCH_FAILED,
        BlacklistError::NotFound(_) | BlacklistError::Permission(_) | BlacklistError::Read { .. } => {
            codes::SOURCE_UNAVAILABLE
        }
        BlacklistError::MalformedCsv { .. } => codes::MALFORMED_CSV,
        BlacklistError::Write { .. } => codes::WRITE_FAILED,
        BlacklistError::Config(_) => codes::CONFIG_ERROR,
    }
}

pub type Result<T> = std::result::Result<T, BlacklistError>;
