//! Git operations for release workflows.
//!
//! Releases talk to git only through [`GitOperations`], implemented for real
//! repositories by [`KodegenGitOperations`].

mod git_adapter;
mod operations;

pub use git_adapter::KodegenGitOperations;
pub use operations::{CommitInfo, GitOperations, TagInfo};
