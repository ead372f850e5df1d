//! Content acquisition: read a local file or GET a remote feed.
//!
//! Both paths return the raw bytes as-is; decoding happens in the parser.

mod http;
mod local;

pub use http::fetch_remote;
pub use local::read_local;

use crate::config::HttpConfig;
use crate::error::Result;
use crate::source::Source;
use std::time::Duration;

/// Timeouts and client identity for remote fetches.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for FetchOptions {
    fn from(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: format!("blacklist_parser/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Acquire the raw content of `source`.
pub fn acquire(source: &Source, opts: &FetchOptions) -> Result<Vec<u8>> {
    let body = match source {
        Source::Remote(url) => fetch_remote(url, opts)?,
        Source::Local(path) => read_local(path)?,
    };
    if body.is_empty() {
        tracing::warn!("retrieved empty blacklist from {}", source);
    } else {
        tracing::debug!("retrieved {} bytes from {}", body.len(), source);
    }
    Ok(body)
}
