//! Report output: standard output, or a file replaced atomically.
//!
//! File output goes to a temp file in the destination directory, which is
//! flushed, synced and renamed over the final path. An interrupted run leaves
//! the destination untouched.

use crate::error::{BlacklistError, Result};
use crate::report::Report;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Where the report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => write!(f, "<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Write `report` to `dest`.
pub fn write_report(report: &Report, dest: &Destination) -> Result<()> {
    match dest {
        Destination::Stdout => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_to(report, &mut out).map_err(|source| BlacklistError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })
        }
        Destination::File(path) => write_file(report, path),
    }
}

/// Write the rendered report to any writer and flush it.
pub fn write_to<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    out.write_all(report.render().as_bytes())?;
    out.flush()
}

fn write_file(report: &Report, path: &Path) -> Result<()> {
    let write_err = |source: io::Error| BlacklistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".blacklist-report")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(write_err)?;

    write_to(report, tmp.as_file_mut()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // Temp files are created 0600; reports are ordinary files.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    tracing::debug!("wrote {} entries to {}", report.entries(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderMode;
    use crate::report::ReportOptions;
    use crate::table::parse_table;
    use std::fs;

    fn sample() -> Report {
        let table = parse_table(
            b"id,reason\n10.0.0.1,spam\n10.0.0.2,abuse\n",
            HeaderMode::Auto,
        )
        .unwrap();
        Report::build(&table, &ReportOptions::default()).unwrap()
    }

    #[test]
    fn file_matches_stream_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.report");
        let report = sample();
        write_report(&report, &Destination::File(path.clone())).unwrap();

        let mut streamed = Vec::new();
        write_to(&report, &mut streamed).unwrap();
        assert_eq!(fs::read(&path).unwrap(), streamed);
    }

    #[test]
    fn existing_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.report");
        fs::write(&path, "stale content that is longer than the report itself....").unwrap();
        write_report(&sample(), &Destination::File(path.clone())).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), sample().render());
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.report");
        write_report(&sample(), &Destination::File(path)).unwrap();
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["out.report".to_string()]);
    }

    #[test]
    fn missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.report");
        match write_report(&sample(), &Destination::File(path.clone())) {
            Err(BlacklistError::Write { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Write error, got {:?}", other),
        }
    }

    #[test]
    fn destination_display() {
        assert_eq!(Destination::Stdout.to_string(), "<stdout>");
        assert_eq!(
            Destination::File(PathBuf::from("a/b.report")).to_string(),
            "a/b.report"
        );
    }
}
