//! Script and stylesheet compilation through external tools.
//!
//! TypeScript goes through `tsc`, Less through `lessc`. Each step is skipped
//! when its input is absent, so plain-JavaScript packages never need either
//! tool installed.

use super::imports::rewrite_relative_imports;
use crate::error::{BuildError, Result};
use crate::project::ProjectLayout;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Compile scripts then styles
pub async fn compile(layout: &ProjectLayout, name: &str) -> Result<()> {
    compile_typescript(layout).await?;
    compile_styles(layout, name).await?;
    Ok(())
}

/// Run `tsc` over `src/tsconfig.json` into `dist/`, then give relative
/// imports in the emitted scripts a `.js` extension. Returns whether it ran.
pub async fn compile_typescript(layout: &ProjectLayout) -> Result<bool> {
    let tsconfig = layout.source_dir().join("tsconfig.json");
    if !tsconfig.is_file() {
        log::debug!("No {}, skipping TypeScript", tsconfig.display());
        return Ok(false);
    }

    let out_dir = layout.build_dir();
    run_tool(
        "tsc",
        [
            OsStr::new("--project"),
            tsconfig.as_os_str(),
            OsStr::new("--outDir"),
            out_dir.as_os_str(),
        ],
    )
    .await?;
    log::info!("✓ Compiled TypeScript into {}", out_dir.display());

    let rewritten = rewrite_relative_imports(&out_dir).await?;
    log::debug!("Added .js to relative imports in {rewritten} file(s)");
    Ok(true)
}

/// Run `lessc` over `src/styles/{name}.less` into `dist/styles/{name}.css`
/// with an inline source map. Returns whether it ran.
pub async fn compile_styles(layout: &ProjectLayout, name: &str) -> Result<bool> {
    let input = layout.source_dir().join("styles").join(format!("{name}.less"));
    if !input.is_file() {
        log::debug!("No {}, skipping Less", input.display());
        return Ok(false);
    }

    let styles_dir = layout.build_dir().join("styles");
    tokio::fs::create_dir_all(&styles_dir).await?;
    let output: PathBuf = styles_dir.join(format!("{name}.css"));

    run_tool(
        "lessc",
        [
            OsStr::new("--source-map-map-inline"),
            input.as_os_str(),
            output.as_os_str(),
        ],
    )
    .await?;
    log::info!("✓ Compiled {}", output.display());
    Ok(true)
}

async fn run_tool<'a>(tool: &str, args: impl IntoIterator<Item = &'a OsStr>) -> Result<()> {
    let path = which::which(tool).map_err(|_| BuildError::ToolNotFound {
        tool: tool.to_string(),
    })?;
    log::debug!("Running {}", path.display());

    let output = tokio::process::Command::new(&path)
        .args(args)
        .output()
        .await?;

    if !output.status.success() {
        // tsc reports diagnostics on stdout
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stderr = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };
        return Err(BuildError::ToolFailed {
            tool: tool.to_string(),
            status: output.status.to_string(),
            stderr,
        }
        .into());
    }
    Ok(())
}
