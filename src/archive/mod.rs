//! Release archive creation.
//!
//! A release archive is `package/{name}-v{version}.zip` holding the build
//! output tree under a single root folder named after the package.

use crate::build::remove_path;
use crate::error::{ArchiveError, Result};
use crate::manifest::Manifest;
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Highest deflate level
const MAX_COMPRESSION: i64 = 9;

/// A written release archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseArchive {
    /// Archive location
    pub path: PathBuf,
    /// Archive size in bytes
    pub size: u64,
}

/// Zip `build_dir` into `package_dir/{name}-v{version}.zip`.
///
/// `package_dir` is created if needed and an existing archive of the same
/// name is replaced. Every failure surfaces as [`ArchiveError::Write`].
pub async fn package_archive(
    manifest: &Manifest,
    build_dir: &Path,
    package_dir: &Path,
) -> Result<ReleaseArchive> {
    let archive_path = package_dir.join(manifest.archive_name());
    let write_error = |reason: String| ArchiveError::Write {
        path: archive_path.clone(),
        reason,
    };

    if !build_dir.is_dir() {
        return Err(write_error(format!(
            "build output directory {} does not exist",
            build_dir.display()
        ))
        .into());
    }

    tokio::fs::create_dir_all(package_dir)
        .await
        .map_err(|e| write_error(format!("cannot create {}: {e}", package_dir.display())))?;

    log::info!("Packaging {} into {}", build_dir.display(), archive_path.display());

    let root_name = manifest.name().to_string();
    let source = build_dir.to_path_buf();
    let target = archive_path.clone();
    let size = tokio::task::spawn_blocking(move || write_zip(&source, &root_name, &target))
        .await
        .map_err(|e| write_error(format!("Task join error: {e}")))?
        .map_err(|e| write_error(e.to_string()))?;

    Ok(ReleaseArchive {
        path: archive_path,
        size,
    })
}

/// Remove `package_dir`, whether it is a directory or a stray file.
/// Returns whether anything was removed.
pub async fn clean_packages(package_dir: &Path) -> Result<bool> {
    let removed = remove_path(package_dir).await?;
    if removed {
        log::info!("Removed all packaged files in {}", package_dir.display());
    }
    Ok(removed)
}

fn write_zip(source: &Path, root_name: &str, target: &Path) -> zip::result::ZipResult<u64> {
    let file = File::create(target)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(MAX_COMPRESSION));

    zip.add_directory(format!("{root_name}/"), options)?;

    for entry in WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let name = archive_entry_name(root_name, relative);

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{name}/"), options)?;
        } else {
            log::debug!("Adding {name}");
            zip.start_file(name, options)?;
            let mut input = File::open(entry.path())?;
            std::io::copy(&mut input, &mut zip)?;
        }
    }

    zip.finish()?;
    Ok(std::fs::metadata(target)?.len())
}

/// Zip entry names always use `/`, whatever the host separator
fn archive_entry_name(root_name: &str, relative: &Path) -> String {
    let mut name = root_name.to_string();
    for component in relative.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}
