use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::stream::LineBuffer;

/// Artifact name for a live-session export.
pub fn live_export_filename(container_name: &str) -> String {
    format!("{}-live-logs.txt", container_name)
}

/// Artifact name for a snapshot export.
pub fn snapshot_export_filename(container_name: &str) -> String {
    format!("{}-logs.txt", container_name)
}

/// Write the full buffer (visible and held partitions) of a live session
/// to `"{name}-live-logs.txt"` under `dir`. A pure read of the buffer:
/// held lines are included so a paused export loses nothing.
pub fn export_live(buffer: &LineBuffer, container_name: &str, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(live_export_filename(container_name));
    std::fs::write(&path, buffer.export_text())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Write snapshot lines to `"{name}-logs.txt"` under `dir`.
pub fn export_snapshot(lines: &[String], container_name: &str, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(snapshot_export_filename(container_name));
    std::fs::write(&path, lines.join("\n"))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
