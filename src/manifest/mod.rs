//! Package manifest resolution, reading and writing.
//!
//! A package carries exactly one manifest, `module.json` or `system.json`,
//! normally in `src/` and, for prebuilt trees, in `dist/`. The manifest is
//! kept as an ordered JSON object so that fields this tool does not know
//! about survive a release untouched.

mod format;
mod package_json;

pub use format::{CompactOptions, MANIFEST_INDENT, MANIFEST_MAX_LENGTH, to_compact_string};
pub use package_json::PackageDescriptor;

use crate::error::{ManifestError, Result};
use crate::project::{BUILD_DIR, ProjectLayout, SOURCE_DIR};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which kind of package a manifest describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// `module.json`
    Module,
    /// `system.json`
    System,
}

impl ManifestKind {
    /// Manifest file name for this kind
    pub fn file_name(self) -> &'static str {
        match self {
            ManifestKind::Module => "module.json",
            ManifestKind::System => "system.json",
        }
    }

    /// Folder under the host's `Data/` directory holding packages of this kind
    pub fn data_folder(self) -> &'static str {
        match self {
            ManifestKind::Module => "modules",
            ManifestKind::System => "systems",
        }
    }

    /// Kind of the manifest present in `dir`, module taking precedence
    pub fn detect(dir: &Path) -> Option<Self> {
        [ManifestKind::Module, ManifestKind::System]
            .into_iter()
            .find(|kind| dir.join(kind.file_name()).is_file())
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A manifest read from disk, with where it was found
#[derive(Debug, Clone)]
pub struct Manifest {
    root: &'static str,
    kind: ManifestKind,
    path: PathBuf,
    document: Map<String, Value>,
}

impl Manifest {
    /// Find and read the project's manifest.
    ///
    /// `src/` is searched before `dist/`; within a directory `module.json`
    /// wins over `system.json`.
    pub fn resolve(layout: &ProjectLayout) -> Result<Self> {
        let candidates = [(SOURCE_DIR, layout.source_dir()), (BUILD_DIR, layout.build_dir())];

        for (root, dir) in &candidates {
            if let Some(kind) = ManifestKind::detect(dir) {
                let path = dir.join(kind.file_name());
                log::debug!("Resolved manifest {}", path.display());
                return Self::load(*root, kind, path);
            }
        }

        Err(ManifestError::NotFound {
            searched: candidates.into_iter().map(|(_, dir)| dir).collect(),
        }
        .into())
    }

    fn load(root: &'static str, kind: ManifestKind, path: PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let document = match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => map,
            _ => return Err(ManifestError::NotAnObject { path }.into()),
        };
        let manifest = Self {
            root,
            kind,
            path,
            document,
        };
        manifest.required_str("name")?;
        manifest.required_str("version")?;
        Ok(manifest)
    }

    fn required_str(&self, field: &'static str) -> Result<&str> {
        self.document
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ManifestError::MissingField {
                    path: self.path.clone(),
                    field,
                }
                .into()
            })
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.document.get(field).and_then(Value::as_str)
    }

    /// Package identifier
    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or_default()
    }

    /// Current version
    pub fn version(&self) -> &str {
        self.str_field("version").unwrap_or_default()
    }

    /// Repository URL, if set
    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    /// URL of this manifest, if set
    pub fn manifest_url(&self) -> Option<&str> {
        self.str_field("manifest")
    }

    /// URL of the release archive, if set
    pub fn download_url(&self) -> Option<&str> {
        self.str_field("download")
    }

    /// Directory label the manifest was found in (`src` or `dist`)
    pub fn root(&self) -> &'static str {
        self.root
    }

    /// Module or system
    pub fn kind(&self) -> ManifestKind {
        self.kind
    }

    /// Manifest file name
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    /// On-disk location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole document
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// `{name}-v{version}.zip`
    pub fn archive_name(&self) -> String {
        format!("{}-v{}.zip", self.name(), self.version())
    }

    /// Set a string field, appending it if new
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.document
            .insert(field.to_string(), Value::String(value.into()));
    }

    /// Serialized file content
    pub fn to_compact_string(&self) -> String {
        to_compact_string(&Value::Object(self.document.clone()), CompactOptions::default())
    }

    /// Write the manifest back to where it was read from
    pub fn save(&self) -> Result<()> {
        write_atomic(&self.path, self.to_compact_string().as_bytes())?;
        log::debug!("Wrote {}", self.path.display());
        Ok(())
    }
}

/// Write through a sibling temp file and rename over the target
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, content)?;
    std::fs::rename(&temp_path, path)
}
