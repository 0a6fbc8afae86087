use foundry_release::build::{self, DeployOutcome};
use foundry_release::error::{ConfigError, ManifestError};
use foundry_release::{FoundryConfig, ProjectLayout, ReleaseError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> (TempDir, ProjectLayout) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("hero6e");
    write(&root.join("src/system.json"), r#"{"name": "hero6e", "version": "1.0.0"}"#);
    write(&root.join("src/hero6e.js"), "export {};");
    write(&root.join("src/lang/en.json"), "{}");
    write(&root.join("src/templates/item.html"), "<div></div>");
    write(&root.join("src/notes.md"), "not a static entry");
    let layout = ProjectLayout::new(&root).unwrap();
    (dir, layout)
}

#[tokio::test]
async fn copy_dist_copies_only_static_entries() {
    let (_dir, layout) = project();
    let copied = build::copy_dist(&layout, "hero6e").await.unwrap();

    assert_eq!(copied, ["lang", "templates", "hero6e.js", "system.json"]);
    let dist = layout.build_dir();
    assert!(dist.join("lang/en.json").is_file());
    assert!(dist.join("templates/item.html").is_file());
    assert!(dist.join("system.json").is_file());
    assert!(!dist.join("notes.md").exists());
}

#[tokio::test]
async fn copy_dist_overwrites_previous_output() {
    let (_dir, layout) = project();
    write(&layout.build_dir().join("hero6e.js"), "old");
    build::copy_dist(&layout, "hero6e").await.unwrap();
    assert_eq!(
        fs::read_to_string(layout.build_dir().join("hero6e.js")).unwrap(),
        "export {};"
    );
}

#[tokio::test]
async fn clean_removes_statics_and_keeps_other_files() {
    let (_dir, layout) = project();
    let dist = layout.build_dir();
    write(&dist.join("hero6e.js"), "built");
    write(&dist.join("styles/hero6e.css"), "body {}");
    write(&dist.join("templates/item.html"), "<div></div>");
    write(&dist.join("README.txt"), "keep");

    let removed = build::clean(&layout, "hero6e").await.unwrap();

    assert_eq!(removed.len(), 3);
    assert!(!dist.join("hero6e.js").exists());
    assert!(!dist.join("styles").exists());
    assert!(!dist.join("templates").exists());
    assert!(dist.join("README.txt").is_file());
}

#[tokio::test]
async fn clean_without_entry_script_removes_nothing() {
    let (_dir, layout) = project();
    fs::remove_file(layout.source_dir().join("hero6e.js")).unwrap();
    write(&layout.build_dir().join("hero6e.js"), "built");

    assert!(build::clean(&layout, "hero6e").await.unwrap().is_empty());
    assert!(layout.build_dir().join("hero6e.js").is_file());
}

#[tokio::test]
async fn build_without_compilers_cleans_and_copies() {
    let (_dir, layout) = project();
    write(&layout.build_dir().join("templates/stale.html"), "stale");

    build::build(&layout, "hero6e").await.unwrap();

    assert!(layout.build_dir().join("templates/item.html").is_file());
    assert!(!layout.build_dir().join("templates/stale.html").exists());
}

fn user_data(dir: &TempDir) -> FoundryConfig {
    let data_path = dir.path().join("userdata");
    fs::create_dir_all(data_path.join("Data")).unwrap();
    FoundryConfig {
        data_path: Some(data_path),
        ..Default::default()
    }
}

#[tokio::test]
async fn deploy_copies_build_into_systems_folder() {
    let (dir, layout) = project();
    let config = user_data(&dir);
    build::copy_dist(&layout, "hero6e").await.unwrap();
    write(&layout.build_dir().join("styles/hero6e.css"), "body {}");

    let outcome = build::deploy_to_user_data(&layout, &config, "hero6e", false)
        .await
        .unwrap();

    let target = dir.path().join("userdata/Data/systems/hero6e");
    match outcome {
        DeployOutcome::Copied {
            target: copied_to,
            entries,
        } => {
            assert_eq!(copied_to, target);
            assert!(entries.contains(&"styles".to_string()));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(target.join("styles/hero6e.css").is_file());
    assert!(target.join("system.json").is_file());
}

#[tokio::test]
async fn deploy_clean_removes_target() {
    let (dir, layout) = project();
    let config = user_data(&dir);
    let target = dir.path().join("userdata/Data/systems/hero6e");
    write(&target.join("hero6e.js"), "deployed");

    let outcome = build::deploy_to_user_data(&layout, &config, "hero6e", true)
        .await
        .unwrap();

    assert_eq!(outcome, DeployOutcome::Removed { target: target.clone() });
    assert!(!target.exists());
}

#[tokio::test]
async fn deploy_requires_data_subdirectory() {
    let (dir, layout) = project();
    let config = FoundryConfig {
        data_path: Some(dir.path().join("nowhere")),
        ..Default::default()
    };

    let err = build::deploy_to_user_data(&layout, &config, "hero6e", false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReleaseError::Config(ConfigError::LinkTargetInvalid { .. })
    ));
}

#[tokio::test]
async fn deploy_requires_manifest_in_src() {
    let (dir, layout) = project();
    let config = user_data(&dir);
    fs::remove_file(layout.source_dir().join("system.json")).unwrap();

    let err = build::deploy_to_user_data(&layout, &config, "hero6e", false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReleaseError::Manifest(ManifestError::NotFound { .. })
    ));
}
