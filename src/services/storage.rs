use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

const DEFAULT_CACHE_DIR: &str = ".yamltrimmer-cache";

/// Resolves `path` against the working directory when it is relative.
pub fn absolutize(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    Ok(cwd.join(path))
}

pub fn default_cache_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME").context("failed to get user home directory")?;
    Ok(PathBuf::from(home).join(DEFAULT_CACHE_DIR))
}

/// Cache directory for a configured path; empty selects the default.
pub fn cache_dir(configured: &str) -> anyhow::Result<PathBuf> {
    if configured.trim().is_empty() {
        debug!("no cache path configured, using the default cache path");
        return default_cache_dir();
    }
    absolutize(Path::new(configured))
}

pub fn write_output(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    debug!(path = %path.display(), bytes = content.len(), "output file written");
    Ok(())
}
