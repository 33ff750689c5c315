//! File system utilities for rundata.
//!
//! All reads are whole-file and bounded; all writes replace the whole file
//! atomically through a sibling temporary file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rundata_common_core::{Error, ErrorCode, Result};

/// Default upper bound for files read by the reconciler.
pub const DEFAULT_MAX_FILE_SIZE: usize = 1024 * 1024;

fn read_error(path: &Path, e: io::Error, what: &str) -> Error {
    let (code, message) = match e.kind() {
        io::ErrorKind::NotFound => (
            ErrorCode::FILE_NOT_FOUND,
            format!("file not found: {}", path.display()),
        ),
        io::ErrorKind::PermissionDenied => (
            ErrorCode::FILE_READ_ERROR,
            format!("permission denied: {}", path.display()),
        ),
        _ => (
            ErrorCode::FILE_READ_ERROR,
            format!("{what}: {}", path.display()),
        ),
    };
    Error::FileSystem {
        code,
        message,
        path: Some(path.to_string_lossy().to_string()),
        source: Some(Box::new(e)),
    }
}

fn write_error(path: &Path, e: io::Error, what: &str) -> Error {
    Error::FileSystem {
        code: ErrorCode::FILE_WRITE_ERROR,
        message: format!("{what}: {}", path.display()),
        path: Some(path.to_string_lossy().to_string()),
        source: Some(Box::new(e)),
    }
}

/// Read a file to string with size limit.
pub fn read_to_string(path: impl AsRef<Path>, max_size: usize) -> Result<String> {
    let path = path.as_ref();

    let metadata =
        fs::metadata(path).map_err(|e| read_error(path, e, "failed to read metadata"))?;

    if metadata.len() as usize > max_size {
        return Err(Error::FileSystem {
            code: ErrorCode::FILE_READ_ERROR,
            message: format!(
                "file too large: {} bytes (max: {})",
                metadata.len(),
                max_size
            ),
            path: Some(path.to_string_lossy().to_string()),
            source: None,
        });
    }

    fs::read_to_string(path).map_err(|e| read_error(path, e, "failed to read file"))
}

/// Read a file that may legitimately not exist yet.
///
/// Returns `Ok(None)` when the file is absent; every other failure is an error.
pub fn read_optional(path: impl AsRef<Path>, max_size: usize) -> Result<Option<String>> {
    match read_to_string(path, max_size) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write to a file atomically (write to temp, then rename).
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent)
        .map_err(|e| write_error(parent, e, "failed to create parent directory"))?;

    let mut temp_path = path.to_path_buf();
    if let Some(name) = path.file_name() {
        temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy()));
    } else {
        temp_path.push(".tmp");
    }

    {
        let mut file = File::create(&temp_path)
            .map_err(|e| write_error(&temp_path, e, "failed to create temporary file"))?;

        file.write_all(contents)
            .map_err(|e| write_error(&temp_path, e, "failed to write to temporary file"))?;

        file.sync_all()
            .map_err(|e| write_error(&temp_path, e, "failed to sync temporary file"))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_error(path, e, "failed to rename temporary file to target")
    })?;

    Ok(())
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// List regular files in `dir` with the given extension, sorted by file name.
///
/// The extension is matched without its leading dot. Subdirectories are not
/// descended into.
pub fn list_files_with_extension(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| read_error(dir, e, "failed to read directory"))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| read_error(dir, e, "failed to read directory entry"))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_to_string_respects_limit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.txt");
        fs::write(&path, "0123456789").unwrap();

        assert_eq!(read_to_string(&path, 10).unwrap(), "0123456789");
        let err = read_to_string(&path, 5).unwrap_err();
        assert_eq!(err.code(), ErrorCode::FILE_READ_ERROR);
        assert!(err.to_string().contains("file too large"));
    }

    #[test]
    fn test_read_optional_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("rundata_test.go");
        assert!(read_optional(&missing, DEFAULT_MAX_FILE_SIZE).unwrap().is_none());
    }

    #[test]
    fn test_write_atomic_replaces_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");

        write_string_atomic(&path, "first").unwrap();
        write_string_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp.path().join(".out.txt.tmp").exists());
    }

    #[test]
    fn test_list_files_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        for name in ["b_test.go", "a_test.go", "README.md", "c.go"] {
            fs::write(temp.path().join(name), "").unwrap();
        }
        fs::create_dir(temp.path().join("sub.go")).unwrap();

        let names: Vec<String> = list_files_with_extension(temp.path(), "go")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a_test.go", "b_test.go", "c.go"]);
    }
}
