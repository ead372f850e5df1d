use crate::error::{BlacklistError, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Read a local source file, mapping I/O failures onto the error taxonomy.
pub fn read_local(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| map_read_error(path, e))
}

fn map_read_error(path: &Path, e: io::Error) -> BlacklistError {
    match e.kind() {
        io::ErrorKind::NotFound => BlacklistError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => BlacklistError::Permission(path.to_path_buf()),
        _ => BlacklistError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    }
}
