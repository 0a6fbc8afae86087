//! Release packaging: version bump, manifest rewrite, archive, commit and tag.
//!
//! The publish pipeline runs strictly in order and stops at the first
//! failure. Nothing already written is rolled back.

use crate::archive::{ReleaseArchive, package_archive};
use crate::build;
use crate::config::{FoundryConfig, RepositoryUrls};
use crate::error::{GitError, ReleaseError, Result};
use crate::git::{CommitInfo, GitOperations, TagInfo};
use crate::manifest::{Manifest, PackageDescriptor};
use crate::project::{PACKAGE_DIR, ProjectLayout, SOURCE_DIR};
use crate::version::compute_target_version;
use std::path::PathBuf;

/// Outcome of a version bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionUpdate {
    /// Version before the bump
    pub previous: String,
    /// Version after the bump
    pub version: String,
    /// Manifest file that was rewritten
    pub manifest_path: PathBuf,
    /// Package descriptor that was rewritten
    pub descriptor_path: PathBuf,
}

/// The commit and tag created for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCommit {
    /// Release commit
    pub commit: CommitInfo,
    /// Annotated version tag
    pub tag: TagInfo,
}

/// Everything a publish produced
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Version bump
    pub update: VersionUpdate,
    /// Release archive
    pub archive: ReleaseArchive,
    /// Commit and tag
    pub git: ReleaseCommit,
}

/// Publish pipeline stages, reported as each one starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStage {
    /// Removing previous build output
    Clean,
    /// Compiling and copying build output
    Build,
    /// Rewriting manifest and package descriptor
    Bump {
        /// Current version
        from: String,
        /// Target version
        to: String,
    },
    /// Writing the release archive
    Package,
    /// Committing and tagging
    Commit,
}

/// Set the new version and URLs on both documents and write them.
///
/// `manifest` becomes `{raw}/master/{root}/{file}`, `download` becomes
/// `{raw}/v{version}/package/{name}-v{version}.zip`.
pub fn bump_manifest(
    manifest: &mut Manifest,
    descriptor: &mut PackageDescriptor,
    version: &str,
    urls: &RepositoryUrls,
) -> Result<()> {
    let manifest_url = format!(
        "{}/master/{}/{}",
        urls.raw_url,
        manifest.root(),
        manifest.file_name()
    );
    let download_url = format!(
        "{}/v{version}/{PACKAGE_DIR}/{}-v{version}.zip",
        urls.raw_url,
        manifest.name()
    );

    descriptor.set_version(version);
    manifest.set("version", version);
    manifest.set("url", urls.repository.as_str());
    manifest.set("manifest", manifest_url);
    manifest.set("download", download_url);

    descriptor.save()?;
    manifest.save()?;
    Ok(())
}

/// Resolve the manifest, compute the target version from `specifier` and
/// rewrite manifest and `package.json`. Returns the bumped manifest.
pub fn update_version(
    layout: &ProjectLayout,
    config: &FoundryConfig,
    specifier: Option<&str>,
) -> Result<(Manifest, VersionUpdate)> {
    let urls = config.repository_urls()?;
    let manifest = Manifest::resolve(layout)?;
    let version = compute_target_version(manifest.version(), specifier)?;
    apply_version(layout, manifest, &version, &urls)
}

fn apply_version(
    layout: &ProjectLayout,
    mut manifest: Manifest,
    version: &str,
    urls: &RepositoryUrls,
) -> Result<(Manifest, VersionUpdate)> {
    log::info!("Updating version number to '{version}'");
    let previous = manifest.version().to_string();

    let mut descriptor = PackageDescriptor::load(layout.package_descriptor())?;
    bump_manifest(&mut manifest, &mut descriptor, version, urls)?;

    let update = VersionUpdate {
        previous,
        version: version.to_string(),
        manifest_path: manifest.path().to_path_buf(),
        descriptor_path: descriptor.path().to_path_buf(),
    };
    Ok((manifest, update))
}

/// Stage `package/`, commit as `v{version}` and tag `v{version}`.
///
/// A tag failure leaves the commit in place and reports its hash.
pub async fn commit_and_tag<G: GitOperations>(git: &G, version: &str) -> Result<ReleaseCommit> {
    let tag_name = format!("v{version}");

    git.stage_paths(&[PathBuf::from(PACKAGE_DIR)]).await?;
    let commit = git.commit_tracked_changes(&tag_name).await?;
    log::info!("Committed {} \"{}\"", commit.short_hash, commit.message);

    let tag = git
        .create_annotated_tag(&tag_name, &format!("Updated to {version}"))
        .await
        .map_err(|e| match e {
            ReleaseError::Git(GitError::TagFailed { tag, reason, .. }) => {
                ReleaseError::Git(GitError::TagFailed {
                    tag,
                    commit: Some(commit.hash.clone()),
                    reason,
                })
            }
            other => other,
        })?;
    log::info!("Tagged {}", tag.name);

    Ok(ReleaseCommit { commit, tag })
}

/// clean → build → bump → package → commit and tag.
///
/// `on_stage` is called as each stage starts.
pub async fn publish<G, F>(
    layout: &ProjectLayout,
    config: &FoundryConfig,
    git: &G,
    specifier: Option<&str>,
    mut on_stage: F,
) -> Result<PublishResult>
where
    G: GitOperations,
    F: FnMut(&PublishStage),
{
    let urls = config.repository_urls()?;
    let name = Manifest::resolve(layout)?.name().to_string();

    on_stage(&PublishStage::Clean);
    build::clean(layout, &name).await?;

    on_stage(&PublishStage::Build);
    build::compile(layout, &name).await?;
    build::copy_dist(layout, &name).await?;

    let current = Manifest::resolve(layout)?;
    let target = compute_target_version(current.version(), specifier)?;
    on_stage(&PublishStage::Bump {
        from: current.version().to_string(),
        to: target.clone(),
    });
    let (manifest, update) = apply_version(layout, current, &target, &urls)?;

    if manifest.root() == SOURCE_DIR {
        build::copy_path(
            manifest.path(),
            &layout.build_dir().join(manifest.file_name()),
        )
        .await?;
    }

    on_stage(&PublishStage::Package);
    let archive = package_archive(&manifest, &layout.build_dir(), &layout.package_dir()).await?;

    on_stage(&PublishStage::Commit);
    let git = commit_and_tag(git, manifest.version()).await?;

    Ok(PublishResult {
        update,
        archive,
        git,
    })
}
