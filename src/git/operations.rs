//! Git operations trait and types for release management.
//!
//! This module defines the GitOperations trait that specifies the Git
//! operations a release needs. The actual implementation is provided by the
//! git_adapter module which delegates to kodegen_tools_git.

use crate::error::Result;
use std::future::Future;
use std::path::PathBuf;

/// Trait defining the Git operations used by a release
pub trait GitOperations {
    /// Stage the given paths (relative to the work tree)
    fn stage_paths(&self, paths: &[PathBuf]) -> impl Future<Output = Result<()>>;

    /// Commit staged changes plus every modified tracked file
    fn commit_tracked_changes(&self, message: &str) -> impl Future<Output = Result<CommitInfo>>;

    /// Create an annotated tag on HEAD
    fn create_annotated_tag(
        &self,
        name: &str,
        message: &str,
    ) -> impl Future<Output = Result<TagInfo>>;
}

/// Information about a Git commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Commit hash (full SHA)
    pub hash: String,
    /// Short commit hash
    pub short_hash: String,
    /// Commit message
    pub message: String,
}

/// Information about a Git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Tag message (if annotated)
    pub message: Option<String>,
    /// Target commit hash
    pub target_commit: String,
}
