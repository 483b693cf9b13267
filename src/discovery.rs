use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::ScriptError;

/// Find every file under `root` whose name matches `include_mask`
/// (a single-segment glob such as `*.txt`) and is not listed in
/// `excluded_file_names` (exact file names, never patterns).
///
/// Traversal is depth-first and, within each directory, matching files are
/// collected before any subdirectory is descended into. Subdirectories come
/// in whatever order the file system reports them.
///
/// Fail-soft: a missing or unreadable directory is logged and contributes
/// zero files; the scan carries on with the remaining branches. A dangling
/// configuration path degrades the result set instead of aborting the scan.
/// Only a malformed mask is an error.
pub fn find_files_in_tree(
    root: impl AsRef<Path>,
    include_mask: &str,
    excluded_file_names: &[&str],
) -> Result<Vec<PathBuf>, ScriptError> {
    let matcher = GlobBuilder::new(include_mask)
        .literal_separator(true)
        .build()
        .map_err(|e| ScriptError::InvalidMask {
            mask: include_mask.to_string(),
            message: e.to_string(),
            code: Some(400),
        })?
        .compile_matcher();

    let root = expand_tilde(root.as_ref());
    let mut found = Vec::new();

    // Stable sort: files ahead of subdirectories, file-system order within
    // each group.
    let walker = WalkDir::new(&root)
        .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                error!("skipping unreadable path under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !matcher.is_match(Path::new(entry.file_name())) {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if excluded_file_names.iter().any(|excluded| *excluded == name) {
            continue;
        }
        found.push(entry.into_path());
    }

    debug!(
        "found {} files under {} matching {}",
        found.len(),
        root.display(),
        include_mask
    );
    Ok(found)
}

/// Expand a leading `~/` against the home directory; other paths pass
/// through untouched.
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
