use std::path::PathBuf;

use tempfile::TempDir;

/// Writes `content` to `<dir>/<name>` and returns the path.
pub(crate) fn write_file(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf, String> {
    let path = dir.path().join(name);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;
    Ok(path)
}
