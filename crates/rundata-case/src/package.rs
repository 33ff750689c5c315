//! Package name discovery for regeneration.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use rundata_common_config::LayoutConfig;
use tracing::{debug, warn};

use crate::error::Result;

fn package_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^package\s+([A-Za-z_][A-Za-z0-9_]*)\s*(//.*)?$").expect("package pattern is valid")
    })
}

/// Extract the declared package from source text.
pub fn parse_package(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| package_pattern().captures(line.trim_end()))
        .map(|caps| caps[1].to_string())
}

/// Resolve the package name of the test in `dir`.
///
/// Candidates are the ordinary source files in `dir` (the declarations file is
/// excluded); only the lexicographically first one is read.
pub fn resolve_package(dir: &Path, layout: &LayoutConfig) -> Result<Option<String>> {
    let candidate = rundata_common_fs::list_files_with_extension(dir, &layout.source_extension)?
        .into_iter()
        .find(|path| {
            path.file_name()
                .map_or(true, |name| name.to_string_lossy() != layout.declarations.as_str())
        });

    let Some(path) = candidate else {
        warn!(dir = %dir.display(), "no source file to take the package name from");
        return Ok(None);
    };

    let text = rundata_common_fs::read_to_string(&path, rundata_common_fs::DEFAULT_MAX_FILE_SIZE)?;
    let package = parse_package(&text);
    match &package {
        Some(name) => debug!(file = %path.display(), package = %name, "resolved package"),
        None => warn!(file = %path.display(), "source file has no package clause"),
    }
    Ok(package)
}
