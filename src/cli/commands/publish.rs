//! publish task.

use crate::cli::RuntimeConfig;
use crate::config::FoundryConfig;
use crate::error::Result;
use crate::git::KodegenGitOperations;
use crate::release::{PublishStage, publish};

/// Full release against the repository at the project root
pub(super) async fn execute_publish(config: &RuntimeConfig, specifier: Option<&str>) -> Result<()> {
    let layout = config.layout();
    let foundry = FoundryConfig::load(layout.root())?;
    let git = KodegenGitOperations::open(layout.root()).await?;

    let result = publish(layout, &foundry, &git, specifier, |stage| match stage {
        PublishStage::Clean => config.section("Clean"),
        PublishStage::Build => config.section("Build"),
        PublishStage::Bump { from, to } => {
            config.section("Update");
            config.info_println(&format!("Updating version number {from} → {to}"));
        }
        PublishStage::Package => config.section("Package"),
        PublishStage::Commit => config.section("Git"),
    })
    .await?;

    config.success_println(&format!(
        "Zip file {} written ({} bytes)",
        result.archive.path.display(),
        result.archive.size
    ));
    config.success_println(&format!(
        "Committed {} \"{}\"",
        result.git.commit.short_hash, result.git.commit.message
    ));
    config.success_println(&format!("Tagged {}", result.git.tag.name));
    Ok(())
}
