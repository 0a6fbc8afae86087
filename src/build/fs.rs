//! Recursive copy and removal helpers for build steps.

use crate::error::{BuildError, Result};
use std::path::Path;
use tokio::fs;

/// Copies a file or directory tree from `from` to `to`, overwriting
/// existing files and creating parent directories as necessary.
pub async fn copy_path(from: &Path, to: &Path) -> Result<()> {
    let copy_error = |reason: String| BuildError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        reason,
    };

    if !from.exists() {
        return Err(copy_error("source does not exist".to_string()).into());
    }

    if from.is_file() {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| copy_error(e.to_string()))?;
        }
        fs::copy(from, to).await.map_err(|e| copy_error(e.to_string()))?;
        return Ok(());
    }

    for entry in walkdir::WalkDir::new(from).follow_links(true) {
        let entry = entry.map_err(|e| copy_error(e.to_string()))?;
        debug_assert!(entry.path().starts_with(from));
        let rel_path = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| copy_error(e.to_string()))?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)
                .await
                .map_err(|e| copy_error(e.to_string()))?;
        } else {
            fs::copy(entry.path(), &dest_path)
                .await
                .map_err(|e| copy_error(e.to_string()))?;
        }
    }

    Ok(())
}

/// Removes a file or directory tree if it exists. Returns whether it did.
pub async fn remove_path(path: &Path) -> Result<bool> {
    let Ok(metadata) = fs::symlink_metadata(path).await else {
        return Ok(false);
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path).await?;
    } else {
        fs::remove_file(path).await?;
    }
    Ok(true)
}
