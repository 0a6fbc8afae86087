//! Task execution functions.
//!
//! Each task maps onto library calls, prints progress through the
//! [`RuntimeConfig`] and turns failures into exit code 1.

mod build;
mod package;
mod publish;
mod update;
mod watch;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;
use crate::manifest::Manifest;

use build::{execute_build, execute_clean, execute_copy_dist, execute_copy_system, execute_deploy};
use package::execute_package;
use publish::execute_publish;
use update::execute_update;
use watch::execute_watch;

/// Execute the task named by the parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    // Validate arguments
    if let Err(validation_error) = args.validate() {
        // Create output for validation errors (never quiet)
        let output = super::OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {validation_error}"));
        return Ok(1);
    }

    let config = RuntimeConfig::from_args(&args)?;

    let result = match &args.command {
        Command::Clean => execute_clean(&config).await,
        Command::Watch { debounce } => execute_watch(&config, *debounce).await,
        Command::Package { clean } => execute_package(&config, *clean).await,
        Command::Update { update } => execute_update(&config, update.as_deref()),
        Command::CopySystem { clean } => execute_copy_system(&config, *clean).await,
        Command::CopyDist => execute_copy_dist(&config).await,
        Command::Build => execute_build(&config).await,
        Command::Deploy => execute_deploy(&config).await,
        Command::Publish { update } => execute_publish(&config, update.as_deref()).await,
    };

    match result {
        Ok(()) => {
            config.success_println(&format!(
                "Task '{}' completed successfully",
                args.command.name()
            ));
            Ok(0)
        }
        Err(e) => {
            config.error_println(&format!("Task '{}' failed: {}", args.command.name(), e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() && !config.is_quiet() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    config.println(&format!("  • {suggestion}"));
                }
            }

            Ok(1)
        }
    }
}

/// Name of the package, from whichever manifest resolves
fn package_name(config: &RuntimeConfig) -> Result<String> {
    let manifest = Manifest::resolve(config.layout())?;
    config.verbose_println(&format!(
        "Using {} ({} {})",
        manifest.path().display(),
        manifest.name(),
        manifest.version()
    ));
    Ok(manifest.name().to_string())
}
