//! clean, copyDist, build, copySystem and deploy tasks.

use super::package_name;
use crate::build::{self, DeployOutcome};
use crate::cli::RuntimeConfig;
use crate::config::FoundryConfig;
use crate::error::Result;

/// Remove built files from dist/
pub(super) async fn execute_clean(config: &RuntimeConfig) -> Result<()> {
    let name = package_name(config)?;
    let removed = build::clean(config.layout(), &name).await?;
    if removed.is_empty() {
        config.println("Nothing to clean");
    } else {
        config.println("Files cleaned:");
        for path in removed {
            config.indent(&path.display().to_string());
        }
    }
    Ok(())
}

/// Copy static files from src/ to dist/
pub(super) async fn execute_copy_dist(config: &RuntimeConfig) -> Result<()> {
    let name = package_name(config)?;
    let copied = build::copy_dist(config.layout(), &name).await?;
    config.println(&format!("Copied {} entries into dist/", copied.len()));
    for entry in copied {
        config.verbose_println(&entry);
    }
    Ok(())
}

/// clean, compile, copyDist
pub(super) async fn execute_build(config: &RuntimeConfig) -> Result<()> {
    let name = package_name(config)?;
    config.section(&format!("Building {name}"));
    build::build(config.layout(), &name).await
}

/// Copy dist/ into the user data folder, or remove it there
pub(super) async fn execute_copy_system(config: &RuntimeConfig, clean: bool) -> Result<()> {
    let name = package_name(config)?;
    let foundry = FoundryConfig::load(config.layout().root())?;

    match build::deploy_to_user_data(config.layout(), &foundry, &name, clean).await? {
        DeployOutcome::Removed { target } => {
            config.warning_println(&format!("Removed build in {}", target.display()));
        }
        DeployOutcome::Copied { target, entries } => {
            config.println(&format!("Copied build to {}", target.display()));
            for entry in entries {
                config.verbose_println(&entry);
            }
        }
    }
    Ok(())
}

/// build, then copySystem
pub(super) async fn execute_deploy(config: &RuntimeConfig) -> Result<()> {
    execute_build(config).await?;
    execute_copy_system(config, false).await
}
