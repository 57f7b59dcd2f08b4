//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist before files are written.

use std::path::Path;

use tracing::debug;

/// Ensure the parent directory of `file` exists, creating it if needed.
pub async fn ensure_parent_dir(file: &Path) -> anyhow::Result<()> {
    let Some(parent) = file.parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(parent).await.is_err() {
        debug!(dir = %parent.display(), "creating missing data directory");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_nested_parent() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("todo_env_{}", std::process::id()));
        let file = root.join("a/b/store.json");
        ensure_parent_dir(&file).await?;
        assert!(tokio::fs::metadata(root.join("a/b")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn bare_file_name_is_ok() -> anyhow::Result<()> {
        ensure_parent_dir(Path::new("store.json")).await
    }
}
