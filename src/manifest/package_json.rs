//! `package.json`, the secondary descriptor whose version tracks the manifest.

use super::write_atomic;
use crate::error::{ManifestError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Package descriptor read from the project root
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    path: PathBuf,
    document: Map<String, Value>,
}

impl PackageDescriptor {
    /// Read `path`
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(ManifestError::PackageDescriptorNotFound { path }.into());
        }
        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(document) => Ok(Self { path, document }),
            _ => Err(ManifestError::NotAnObject { path }.into()),
        }
    }

    /// Version field, if present
    pub fn version(&self) -> Option<&str> {
        self.document.get("version").and_then(Value::as_str)
    }

    /// Replace the version
    pub fn set_version(&mut self, version: &str) {
        self.document
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// On-disk location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tab-indented JSON with a trailing newline
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.document.serialize(&mut ser)?;
        buf.push(b'\n');
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write back to disk
    pub fn save(&self) -> Result<()> {
        write_atomic(&self.path, self.to_pretty_string()?.as_bytes())?;
        log::debug!("Wrote {}", self.path.display());
        Ok(())
    }
}
