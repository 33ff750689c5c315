//! Finds test directories under a set of roots.

use std::path::{Path, PathBuf};

use rundata_common_config::LayoutConfig;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::CliError;

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map_or(false, |name| name.starts_with('.'))
}

/// Whether `dir` holds a test: the document plus at least one ordinary source file.
pub fn is_test_dir(dir: &Path, layout: &LayoutConfig) -> bool {
    if !dir.join(&layout.document).is_file() {
        return false;
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };
    entries.flatten().any(|entry| {
        let path = entry.path();
        path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(layout.source_extension.as_str())
            && entry.file_name().to_string_lossy() != layout.declarations.as_str()
    })
}

/// All test directories under `roots`, sorted and de-duplicated.
pub fn find_test_dirs(roots: &[PathBuf], layout: &LayoutConfig) -> Result<Vec<PathBuf>, CliError> {
    let mut dirs = Vec::new();

    for root in roots {
        if !root.is_dir() {
            return Err(CliError::NotFound {
                message: format!("not a directory: {}", root.display()),
                path: root.clone(),
            });
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_type().is_dir() && !is_hidden(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable path");
                    continue;
                }
            };
            if is_test_dir(entry.path(), layout) {
                debug!(dir = %entry.path().display(), "found test directory");
                dirs.push(entry.into_path());
            }
        }
    }

    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}
