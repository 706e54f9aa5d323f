//! Reading note sources from files or stdin

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Reject input larger than `limit` bytes.
pub fn check_size(size: usize, limit: usize) -> Result<()> {
    if size > limit {
        return Err(Error::InputTooLarge { size, limit });
    }
    Ok(())
}

/// Read a whole file as UTF-8, enforcing the size limit before reading.
pub fn read_file(path: &Path, limit: usize) -> Result<String> {
    let file_read_error = |source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(file_read_error)?.len();
    check_size(usize::try_from(size).unwrap_or(usize::MAX), limit)?;

    debug!("Reading {} bytes from {}", size, path.display());
    fs::read_to_string(path).map_err(file_read_error)
}

/// Read all of `reader` as UTF-8, failing once more than `limit` bytes arrive.
pub fn read_stream<R: Read>(reader: R, limit: usize) -> Result<String> {
    let mut buf = String::new();
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    reader.take(cap).read_to_string(&mut buf)?;
    check_size(buf.len(), limit)?;
    Ok(buf)
}

/// Read from `path` when given, otherwise from stdin.
pub fn read_source(path: Option<&Path>, limit: usize) -> Result<String> {
    match path {
        Some(path) => read_file(path, limit),
        None => read_stream(std::io::stdin().lock(), limit),
    }
}
