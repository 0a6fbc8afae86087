//! watch task.

use super::package_name;
use crate::build;
use crate::cli::RuntimeConfig;
use crate::error::Result;
use std::time::Duration;

/// Rebuild on every change under src/ until Ctrl-C
pub(super) async fn execute_watch(config: &RuntimeConfig, debounce_ms: u64) -> Result<()> {
    let name = package_name(config)?;
    config.info_println(&format!(
        "Watching {} (Ctrl-C to stop)",
        config.layout().source_dir().display()
    ));

    build::watch(
        config.layout(),
        &name,
        Duration::from_millis(debounce_ms),
        |outcome| match outcome {
            Ok(()) => config.success_println("Rebuilt"),
            Err(e) => config.error_println(&format!("Rebuild failed: {e}")),
        },
    )
    .await
}
