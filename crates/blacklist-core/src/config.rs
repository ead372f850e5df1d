use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// abuse.ch SSL IP blacklist, the feed this tool was written for.
pub const DEFAULT_SOURCE: &str = "https://sslbl.abuse.ch/blacklist/sslipblacklist.csv";

/// Prefix of the default report filename; a local timestamp follows.
pub const DEFAULT_DEST_PREFIX: &str = "sslbl_abuse_blacklist_";

pub const DEFAULT_DEST_EXTENSION: &str = "report";

/// How the first row of a CSV feed is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Commented column list (`# DstIP,DstPort,...`) if present, else first row.
    #[default]
    Auto,
    /// First non-comment row is the header.
    Present,
    /// No header; fields are positional only.
    Absent,
}

/// HTTP settings for remote sources (optional `[http]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Upper bound for the whole transfer.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// File configuration loaded from `~/.config/blacklist-report/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Default source when `--source` is not given.
    #[serde(default)]
    pub source: Option<String>,
    /// Prefix for the timestamped default report filename.
    #[serde(default)]
    pub dest_prefix: Option<String>,
    #[serde(default)]
    pub header: HeaderMode,
    /// Column to group report sections by.
    #[serde(default)]
    pub group_by: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Location of the XDG config file, if one exists.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("blacklist-report")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from `path`, or from the XDG location when `path` is None.
///
/// A missing XDG file yields defaults; a missing explicit path is an error.
pub fn load(path: Option<&Path>) -> Result<FileConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path()? {
            Some(p) => p,
            None => {
                tracing::debug!("no config file found, using defaults");
                return Ok(FileConfig::default());
            }
        },
    };
    let data = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: FileConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}

/// Default report filename for a run started at `now`.
pub fn default_dest(prefix: &str, now: chrono::NaiveDateTime) -> PathBuf {
    PathBuf::from(format!(
        "{}{}.{}",
        prefix,
        now.format("%Y%m%d%H%M%S"),
        DEFAULT_DEST_EXTENSION
    ))
}
