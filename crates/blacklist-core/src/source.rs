//! Source resolution: pick the override or the default, then classify it.

use crate::error::{BlacklistError, Result};
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Where the blacklist CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `http` or `https` URL.
    Remote(Url),
    /// Path on the local filesystem.
    Local(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{}", url),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Returns the override when given, else `default`, classified as remote or local.
///
/// Fails only when the chosen location is empty.
pub fn resolve_source(override_location: Option<&str>, default: &str) -> Result<Source> {
    let location = override_location.unwrap_or(default).trim();
    if location.is_empty() {
        return Err(BlacklistError::Config("source location is empty".into()));
    }
    Ok(classify(location))
}

fn classify(location: &str) -> Source {
    match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Source::Remote(url),
        Ok(url) if url.scheme() == "file" => match url.to_file_path() {
            Ok(path) => Source::Local(path),
            Err(()) => Source::Local(PathBuf::from(location)),
        },
        // Relative paths fail to parse; drive letters parse as one-letter schemes.
        _ => Source::Local(PathBuf::from(location)),
    }
}
