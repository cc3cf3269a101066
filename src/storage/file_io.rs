//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{SealboxError, SealboxResult};

/// Read a file's raw bytes
pub fn read_bytes<P: AsRef<Path>>(path: P) -> SealboxResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| SealboxError::file_read(path.display().to_string(), e))
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all. Overwrites
/// an existing file on success.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> SealboxResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                SealboxError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Temp file in the same directory so the rename stays atomic
    let temp_path = path.with_extension("tmp");

    let file = File::create(&temp_path)
        .map_err(|e| SealboxError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .map_err(|e| SealboxError::Io(format!("Failed to write data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| SealboxError::Io(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SealboxError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SealboxError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bin");

        write_bytes_atomic(&path, b"payload").unwrap();
        assert_eq!(read_bytes(&path).unwrap(), b"payload");
    }

    #[test]
    fn test_overwrite_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.bin");

        write_bytes_atomic(&path, b"first").unwrap();
        write_bytes_atomic(&path, b"second").unwrap();
        assert_eq!(read_bytes(&path).unwrap(), b"second");
    }

    #[test]
    fn test_read_missing_file_has_path_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.bin");

        let err = read_bytes(&path).unwrap_err();
        match err {
            SealboxError::FileRead { path: p, .. } => assert!(p.contains("missing.bin")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.bin");

        write_bytes_atomic(&path, b"deep").unwrap();
        assert_eq!(read_bytes(&path).unwrap(), b"deep");
    }
}
