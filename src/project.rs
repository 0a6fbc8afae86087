//! Filesystem layout of a package project.
//!
//! Source lives in `src/`, compiled output in `dist/`, release archives in
//! `package/`. Every path the tool touches is derived from one root.

use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Directory holding package sources
pub const SOURCE_DIR: &str = "src";
/// Directory holding build output
pub const BUILD_DIR: &str = "dist";
/// Directory holding release archives
pub const PACKAGE_DIR: &str = "package";
/// Package descriptor file name
pub const PACKAGE_DESCRIPTOR: &str = "package.json";

/// Resolved paths for one project
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at `root` (made absolute, not canonicalized)
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().absolutize()?.into_owned();
        Ok(Self { root })
    }

    /// Project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `src/`
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    /// `dist/`
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    /// `package/`
    pub fn package_dir(&self) -> PathBuf {
        self.root.join(PACKAGE_DIR)
    }

    /// `package.json`
    pub fn package_descriptor(&self) -> PathBuf {
        self.root.join(PACKAGE_DESCRIPTOR)
    }

    /// Name of the project directory, used as the deploy target folder name
    pub fn directory_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package".to_string())
    }
}
