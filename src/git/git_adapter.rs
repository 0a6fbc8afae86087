//! Adapter layer between GitOperations trait and kodegen_tools_git operations.

use crate::error::{GitError, Result};
use crate::git::{CommitInfo, GitOperations, TagInfo};
use kodegen_tools_git::operations::commit::{CommitOpts, commit};
use kodegen_tools_git::{self as git, AddOpts, RepoHandle, TagOpts};
use std::path::{Path, PathBuf};

/// Git operations using kodegen_tools_git backend
#[derive(Debug)]
pub struct KodegenGitOperations {
    repo: RepoHandle,
}

impl KodegenGitOperations {
    /// Open the repository containing `path`
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = git::open_repo(path.as_ref())
            .await
            .map_err(|_| GitError::NotRepository)?
            .map_err(|_| GitError::NotRepository)?;

        Ok(Self { repo })
    }
}

impl GitOperations for KodegenGitOperations {
    async fn stage_paths(&self, paths: &[PathBuf]) -> Result<()> {
        git::add(
            self.repo.clone(),
            AddOpts {
                paths: paths.to_vec(),
                update_only: false,
                force: false,
            },
        )
        .await
        .map_err(|e| GitError::StageFailed {
            reason: format!("Failed to add {paths:?}: {e}"),
        })?;
        Ok(())
    }

    async fn commit_tracked_changes(&self, message: &str) -> Result<CommitInfo> {
        let commit_opts = CommitOpts::message(message).all(true);
        let commit_id = commit(self.repo.clone(), commit_opts)
            .await
            .map_err(|e| GitError::CommitFailed {
                reason: format!("Failed to create commit: {e}"),
            })?;

        let hash = commit_id.id.to_string();
        let short_hash = hash.chars().take(7).collect();

        Ok(CommitInfo {
            hash,
            short_hash,
            message: message.to_string(),
        })
    }

    async fn create_annotated_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        let tag_info = git::create_tag(
            &self.repo,
            TagOpts {
                name: name.to_string(),
                message: Some(message.to_string()),
                target: None,
                force: false,
            },
        )
        .await
        .map_err(|e| GitError::TagFailed {
            tag: name.to_string(),
            commit: None,
            reason: e.to_string(),
        })?;

        Ok(TagInfo {
            name: tag_info.name,
            message: tag_info.message,
            target_commit: tag_info.target_commit,
        })
    }
}
