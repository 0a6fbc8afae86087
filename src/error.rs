//! Error types for foundry_release operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for foundry_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all foundry_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Manifest and package descriptor errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Configuration file errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Version computation errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Release archive errors
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Build step errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Git operation errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Manifest-specific errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Neither module.json nor system.json exists in src/ or dist/
    #[error("Could not find module.json or system.json in {searched:?}")]
    NotFound {
        /// Directories that were searched, in order
        searched: Vec<PathBuf>,
    },

    /// Manifest file is valid JSON but not an object
    #[error("Manifest at {path} is not a JSON object")]
    NotAnObject {
        /// Path of the offending file
        path: PathBuf,
    },

    /// A required string field is missing
    #[error("Manifest at {path} has no string '{field}' field")]
    MissingField {
        /// Path of the offending file
        path: PathBuf,
        /// Field name
        field: &'static str,
    },

    /// package.json is missing from the project root
    #[error("Package descriptor not found at {path}")]
    PackageDescriptorNotFound {
        /// Path where package.json was expected
        path: PathBuf,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// foundryconfig.json is missing
    #[error("foundryconfig.json not found at {path}")]
    NotFound {
        /// Path where the config was expected
        path: PathBuf,
    },

    /// rawURL or repository is not set
    #[error("Repository URLs not configured in foundryconfig.json")]
    MissingRepositoryUrls,

    /// dataPath is not set
    #[error("No User Data path defined in foundryconfig.json")]
    MissingDataPath,

    /// dataPath has no Data subdirectory
    #[error("User Data path invalid, no Data directory found in {path}")]
    LinkTargetInvalid {
        /// Configured data path
        path: PathBuf,
    },
}

/// Version computation errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// Specifier is absent or neither a version nor a bump kind
    #[error("Incorrect version arguments: {specifier:?} (expected MAJOR.MINOR.PATCH, major, minor or patch)")]
    InvalidSpecifier {
        /// The specifier as given, if any
        specifier: Option<String>,
    },

    /// Current version does not match MAJOR.MINOR.PATCH
    #[error("Invalid version '{version}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion {
        /// Version string
        version: String,
    },

    /// Target version equals the current one
    #[error("Target version is identical to current version '{version}'")]
    NoOp {
        /// Current and target version
        version: String,
    },
}

/// Release archive errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Any failure while writing the zip
    #[error("Failed to write archive {path}: {reason}")]
    Write {
        /// Archive path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Build step errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// External compiler is not on PATH
    #[error("Required tool '{tool}' not found on PATH")]
    ToolNotFound {
        /// Tool name
        tool: String,
    },

    /// External compiler exited unsuccessfully
    #[error("'{tool}' failed with {status}: {stderr}")]
    ToolFailed {
        /// Tool name
        tool: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// Copying a static entry failed
    #[error("Failed to copy {from} to {to}: {reason}")]
    Copy {
        /// Source path
        from: PathBuf,
        /// Destination path
        to: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// The filesystem watcher could not be started
    #[error("Failed to watch {path}: {reason}")]
    Watch {
        /// Watched directory
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Not a git repository
    #[error("Not a git repository. Please initialize git first.")]
    NotRepository,

    /// Staging paths failed
    #[error("Git add failed: {reason}")]
    StageFailed {
        /// Reason for the error
        reason: String,
    },

    /// Commit failed
    #[error("Git commit failed: {reason}")]
    CommitFailed {
        /// Reason for the error
        reason: String,
    },

    /// Tag creation failed; the commit (if any) is left in place
    #[error("Git tag '{tag}' failed: {reason}")]
    TagFailed {
        /// Tag name
        tag: String,
        /// Hash of the release commit that was already created
        commit: Option<String>,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Manifest(ManifestError::NotFound { .. }) => vec![
                "Run from the project root, or pass --root <DIR>".to_string(),
                "Ensure src/module.json or src/system.json exists".to_string(),
            ],
            ReleaseError::Config(ConfigError::NotFound { .. }) => vec![
                "Create foundryconfig.json with dataPath, rawURL and repository keys".to_string(),
            ],
            ReleaseError::Config(ConfigError::MissingRepositoryUrls) => vec![
                "Set \"rawURL\" and \"repository\" in foundryconfig.json".to_string(),
            ],
            ReleaseError::Config(ConfigError::LinkTargetInvalid { .. })
            | ReleaseError::Config(ConfigError::MissingDataPath) => vec![
                "Point \"dataPath\" at the host's user data root (the folder containing Data/)"
                    .to_string(),
            ],
            ReleaseError::Version(VersionError::InvalidSpecifier { .. }) => vec![
                "Pass --update=major, --update=minor, --update=patch or --update=X.Y.Z".to_string(),
            ],
            ReleaseError::Version(VersionError::NoOp { .. }) => vec![
                "Choose a version different from the current one".to_string(),
            ],
            ReleaseError::Build(BuildError::ToolNotFound { tool }) => vec![
                format!("Install '{tool}' and make sure it is on PATH"),
            ],
            ReleaseError::Git(GitError::TagFailed {
                tag,
                commit: Some(commit),
                ..
            }) => vec![
                format!("Commit {commit} was created; tag it manually: git tag -a {tag}"),
                format!("Or undo it: git reset --soft {commit}~1"),
            ],
            ReleaseError::Git(GitError::NotRepository) => vec![
                "Initialize a repository: git init".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
