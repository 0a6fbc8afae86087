//! package task.

use crate::archive::{clean_packages, package_archive};
use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::manifest::Manifest;

/// Zip dist/ into package/, or remove package/ with `clean`
pub(super) async fn execute_package(config: &RuntimeConfig, clean: bool) -> Result<()> {
    let layout = config.layout();

    if clean {
        if clean_packages(&layout.package_dir()).await? {
            config.warning_println("Removed all packaged files");
        } else {
            config.println("No packaged files to remove");
        }
        return Ok(());
    }

    let manifest = Manifest::resolve(layout)?;
    let archive = package_archive(&manifest, &layout.build_dir(), &layout.package_dir()).await?;
    config.println(&format!("{} total bytes", archive.size));
    config.success_println(&format!("Zip file {} has been written", manifest.archive_name()));
    Ok(())
}
