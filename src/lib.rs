//! # Foundry Release
//!
//! Build, deploy and release tooling for virtual-tabletop system and module
//! packages.
//!
//! A package project keeps its sources in `src/`, build output in `dist/` and
//! release archives in `package/`. This crate replaces the usual task-runner
//! script with a single binary.
//!
//! ## Features
//!
//! - **Version bumps**: `major`/`minor`/`patch` or an exact version, written to
//!   the manifest and `package.json` together
//! - **Manifest URLs**: `manifest` and `download` rewritten for the new tag
//! - **Release archives**: `package/{name}-v{version}.zip` at maximum compression
//! - **Git integration**: release commit and annotated tag through `kodegen_tools_git`
//! - **Deploy**: copy the build into the host application's user data folder
//!
//! ## Usage
//!
//! ```bash
//! foundry_release build                 # clean, compile, copy into dist/
//! foundry_release deploy                # build, then copy into user data
//! foundry_release update -u=minor      # bump version and URLs only
//! foundry_release package               # zip dist/ into package/
//! foundry_release publish -u=patch     # the whole release
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod archive;
pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod manifest;
pub mod project;
pub mod release;
pub mod version;

// Re-export main types for public API
pub use archive::{ReleaseArchive, clean_packages, package_archive};
pub use cli::Args;
pub use config::{FoundryConfig, RepositoryUrls};
pub use error::{ReleaseError, Result};
pub use git::{GitOperations, KodegenGitOperations};
pub use manifest::{Manifest, ManifestKind, PackageDescriptor};
pub use project::ProjectLayout;
pub use release::{
    PublishResult, PublishStage, ReleaseCommit, VersionUpdate, bump_manifest, commit_and_tag,
    publish, update_version,
};
pub use version::{VersionBump, VersionSpecifier, compute_target_version};
