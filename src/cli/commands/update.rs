//! update task.

use crate::cli::RuntimeConfig;
use crate::config::FoundryConfig;
use crate::error::Result;
use crate::release::update_version;

/// Bump manifest and package.json to the version `specifier` selects
pub(super) fn execute_update(config: &RuntimeConfig, specifier: Option<&str>) -> Result<()> {
    let foundry = FoundryConfig::load(config.layout().root())?;
    let (manifest, update) = update_version(config.layout(), &foundry, specifier)?;

    config.success_println(&format!(
        "Updated version {} → {}",
        update.previous, update.version
    ));
    config.indent(&format!("manifest: {}", manifest.manifest_url().unwrap_or_default()));
    config.indent(&format!("download: {}", manifest.download_url().unwrap_or_default()));
    config.verbose_println(&format!("Wrote {}", update.manifest_path.display()));
    config.verbose_println(&format!("Wrote {}", update.descriptor_path.display()));
    Ok(())
}
