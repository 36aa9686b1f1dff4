//! Target path selection: sanitizing, conflict handling and temp files.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::ConflictAction;
use crate::naming::sanitize_relative_path;

/// Temporary file suffix used before the final rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Upper bound on `name (n).ext` attempts.
const MAX_UNIQUE_ATTEMPTS: u32 = 10_000;

/// Path for the temp file: appends `.part` to the final path (e.g. `main_1.jpg` → `main_1.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// First free path among `path`, `stem (1).ext`, `stem (2).ext`, ...
///
/// A path counts as taken when it or its `.part` file exists.
pub fn uniquify(path: &Path) -> Result<PathBuf> {
    let taken = |p: &Path| p.exists() || temp_path(p).exists();
    if !taken(path) {
        return Ok(path.to_path_buf());
    }
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    for n in 1..=MAX_UNIQUE_ATTEMPTS {
        let candidate = parent.join(format!("{} ({}){}", stem, n, ext));
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }
    anyhow::bail!("no free filename for {}", path.display())
}

/// Final path for `filename` under `root`, honoring the conflict action.
pub fn resolve_target(root: &Path, filename: &str, action: ConflictAction) -> Result<PathBuf> {
    let relative = sanitize_relative_path(filename)
        .ok_or_else(|| anyhow::anyhow!("unusable filename: {:?}", filename))?;
    let path = root.join(relative);
    match action {
        ConflictAction::Uniquify => uniquify(&path),
    }
}
