//! Build steps: cleaning `dist/`, copying static files, compiling scripts
//! and styles, watching sources and deploying to the host's user data.

mod compile;
mod deploy;
mod fs;
mod imports;
mod watch;

pub use compile::{compile, compile_styles, compile_typescript};
pub use deploy::{DeployOutcome, deploy_to_user_data};
pub use fs::{copy_path, remove_path};
pub use imports::{add_js_extensions, rewrite_relative_imports};
pub use watch::{SourceWatcher, watch};

use crate::error::Result;
use crate::project::ProjectLayout;
use std::path::PathBuf;

/// Entries copied from `src/` into `dist/`
const SOURCE_STATICS: &[&str] = &[
    "assets",
    "lang",
    "module",
    "packs",
    "templates",
    "module.json",
    "system.json",
    "template.json",
];

/// Compiled stylesheet folder, present in `dist/` only
const STYLES_DIR: &str = "styles";

/// Static entries for a package named `name`: the shared list plus `{name}.js`
pub fn source_statics(name: &str) -> Vec<String> {
    let mut entries: Vec<String> = SOURCE_STATICS.iter().map(|s| s.to_string()).collect();
    entries.insert(5, format!("{name}.js"));
    entries
}

/// Entries that live in `dist/`: the source statics plus compiled styles
pub fn build_statics(name: &str) -> Vec<String> {
    let mut entries = source_statics(name);
    entries.insert(4, STYLES_DIR.to_string());
    entries
}

/// Remove built files from `dist/`, leaving anything else in place.
///
/// Nothing is removed unless the package has an entry script
/// (`src/{name}.ts` or `src/{name}.js`). Returns the removed paths.
pub async fn clean(layout: &ProjectLayout, name: &str) -> Result<Vec<PathBuf>> {
    let source = layout.source_dir();
    let has_entry_script =
        source.join(format!("{name}.ts")).is_file() || source.join(format!("{name}.js")).is_file();

    if !has_entry_script {
        log::info!("No entry script for '{name}' in {}, nothing to clean", source.display());
        return Ok(Vec::new());
    }

    let entries = build_statics(name);
    log::info!("Files to clean: {}", entries.join(", "));

    let build_dir = layout.build_dir();
    let mut removed = Vec::new();
    for entry in entries {
        let path = build_dir.join(&entry);
        if remove_path(&path).await? {
            log::debug!("Removed {}", path.display());
            removed.push(path);
        }
    }
    Ok(removed)
}

/// Copy every static entry that exists in `src/` into `dist/`. Returns the
/// copied entry names.
pub async fn copy_dist(layout: &ProjectLayout, name: &str) -> Result<Vec<String>> {
    let source = layout.source_dir();
    let build_dir = layout.build_dir();
    let mut copied = Vec::new();

    for entry in source_statics(name) {
        let from = source.join(&entry);
        if from.exists() {
            copy_path(&from, &build_dir.join(&entry)).await?;
            log::debug!("Copied {entry} into {}", build_dir.display());
            copied.push(entry);
        }
    }
    Ok(copied)
}

/// clean → compile → copyDist
pub async fn build(layout: &ProjectLayout, name: &str) -> Result<()> {
    clean(layout, name).await?;
    compile(layout, name).await?;
    copy_dist(layout, name).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statics_include_entry_script_and_styles() {
        let src = source_statics("hero6e");
        assert!(src.contains(&"hero6e.js".to_string()));
        assert!(!src.contains(&"styles".to_string()));

        let dist = build_statics("hero6e");
        assert!(dist.contains(&"styles".to_string()));
        assert_eq!(dist.len(), src.len() + 1);
    }
}
