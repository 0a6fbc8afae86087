//! Copying the build into the host application's user data folder.

use super::{build_statics, copy_path, remove_path};
use crate::config::FoundryConfig;
use crate::error::{ManifestError, Result};
use crate::manifest::ManifestKind;
use crate::project::ProjectLayout;
use std::path::PathBuf;

/// What a deploy did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Build copied into the target; lists copied entries
    Copied {
        /// `{dataPath}/Data/{modules|systems}/{project}`
        target: PathBuf,
        /// Entry names copied from `dist/`
        entries: Vec<String>,
    },
    /// Target removed (`--clean`)
    Removed {
        /// Removed directory
        target: PathBuf,
    },
}

/// Copy `dist/` statics to `{dataPath}/Data/{modules|systems}/{project dir}`,
/// or remove that folder when `clean` is set.
///
/// The kind folder is chosen from the manifest present in `src/`.
pub async fn deploy_to_user_data(
    layout: &ProjectLayout,
    config: &FoundryConfig,
    name: &str,
    clean: bool,
) -> Result<DeployOutcome> {
    let source = layout.source_dir();
    let kind = ManifestKind::detect(&source).ok_or_else(|| ManifestError::NotFound {
        searched: vec![source.clone()],
    })?;

    let target = config
        .user_data_dir()?
        .join(kind.data_folder())
        .join(layout.directory_name());

    if clean {
        log::info!("Removing build in {}", target.display());
        remove_path(&target).await?;
        return Ok(DeployOutcome::Removed { target });
    }

    tokio::fs::create_dir_all(&target).await?;
    log::info!("Copying build to {}", target.display());

    let build_dir = layout.build_dir();
    let mut entries = Vec::new();
    for entry in build_statics(name) {
        let from = build_dir.join(&entry);
        if from.exists() {
            copy_path(&from, &target.join(&entry)).await?;
            entries.push(entry);
        }
    }

    Ok(DeployOutcome::Copied { target, entries })
}
