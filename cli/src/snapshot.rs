use std::fs;
use std::path::Path;

use anyhow::Context;
use slate_core::Workspace;

/// Load the cached workspace from the last listing, if one exists.
/// Unreadable snapshots are treated as absent rather than fatal.
pub fn load(path: &Path) -> Workspace {
    let Ok(contents) = fs::read_to_string(path) else {
        return Workspace::new();
    };

    match serde_json::from_str(&contents) {
        Ok(workspace) => workspace,
        Err(err) => {
            tracing::warn!(error = %err, "discarding unreadable workspace snapshot");
            Workspace::new()
        }
    }
}

pub fn save(workspace: &Workspace, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create data directory")?;
    }

    let content =
        serde_json::to_string_pretty(workspace).context("Failed to serialize workspace")?;
    fs::write(path, content).context("Failed to write workspace snapshot")?;

    Ok(())
}
