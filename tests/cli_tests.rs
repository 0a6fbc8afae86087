use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        &root.join("src/module.json"),
        r#"{"name": "hero-tools", "version": "0.4.1"}"#,
    );
    write(&root.join("dist/module.json"), r#"{"name": "hero-tools", "version": "0.4.1"}"#);
    write(&root.join("dist/scripts/main.js"), "export {};");
    write(&root.join("package.json"), r#"{"name": "hero-tools", "version": "0.4.1"}"#);
    dir
}

fn foundry_release(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("foundry_release").unwrap();
    cmd.arg("--root").arg(root);
    cmd
}

#[test]
fn package_writes_versioned_zip() {
    let dir = project();
    foundry_release(dir.path())
        .arg("package")
        .assert()
        .success()
        .stdout(predicate::str::contains("hero-tools-v0.4.1.zip"));

    assert!(dir.path().join("package/hero-tools-v0.4.1.zip").is_file());
}

#[test]
fn package_clean_removes_package_dir_without_packaging() {
    let dir = project();
    write(&dir.path().join("package/hero-tools-v0.4.0.zip"), "old");

    foundry_release(dir.path())
        .args(["package", "--clean"])
        .assert()
        .success();

    assert!(!dir.path().join("package").exists());
}

#[test]
fn package_short_clean_flag_is_accepted() {
    let dir = project();
    write(&dir.path().join("package/hero-tools-v0.4.0.zip"), "old");

    foundry_release(dir.path()).args(["package", "-c"]).assert().success();
    assert!(!dir.path().join("package").exists());
}

#[test]
fn update_without_config_fails() {
    let dir = project();
    foundry_release(dir.path())
        .args(["update", "--update=patch"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("foundryconfig.json not found"));
}

#[test]
fn update_rewrites_manifest() {
    let dir = project();
    write(
        &dir.path().join("foundryconfig.json"),
        r#"{"rawURL": "https://raw.example/dev/hero-tools", "repository": "https://example/dev/hero-tools"}"#,
    );

    foundry_release(dir.path())
        .args(["update", "-u=major"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.1 → 1.0.0"));

    let manifest = fs::read_to_string(dir.path().join("src/module.json")).unwrap();
    assert!(manifest.contains("\"version\": \"1.0.0\""));
    assert!(manifest.contains(
        "\"download\": \"https://raw.example/dev/hero-tools/v1.0.0/package/hero-tools-v1.0.0.zip\""
    ));
    let descriptor = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(descriptor.contains("\"version\": \"1.0.0\""));
}

#[test]
fn update_with_unknown_specifier_fails() {
    let dir = project();
    write(
        &dir.path().join("foundryconfig.json"),
        r#"{"rawURL": "https://raw.example", "repository": "https://example"}"#,
    );

    foundry_release(dir.path())
        .args(["update", "--update", "bigger"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Incorrect version arguments"));
}

#[test]
fn copy_system_requires_config() {
    let dir = project();
    foundry_release(dir.path())
        .arg("copySystem")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("foundryconfig.json not found"));
}

#[test]
fn missing_manifest_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    foundry_release(dir.path())
        .arg("package")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not find module.json or system.json"));
}

/// Executable shell script `name` in `dir`, for standing in a compiler
#[cfg(unix)]
fn stub_tool(dir: &Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn build_without_tsc_on_path_fails() {
    let dir = project();
    write(&dir.path().join("src/tsconfig.json"), "{}");

    foundry_release(dir.path())
        .arg("build")
        .env("PATH", "")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Required tool 'tsc' not found"));
}

#[cfg(unix)]
#[test]
fn build_reports_failing_stylesheet_compiler() {
    let dir = project();
    let bin = tempfile::tempdir().unwrap();
    stub_tool(bin.path(), "lessc", "echo 'unrecognised input' >&2\nexit 2");
    write(&dir.path().join("src/styles/hero-tools.less"), "body {");

    foundry_release(dir.path())
        .arg("build")
        .env("PATH", bin.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'lessc' failed"))
        .stderr(predicate::str::contains("unrecognised input"));
}

#[cfg(unix)]
#[test]
fn build_adds_js_extension_to_compiled_relative_imports() {
    let dir = project();
    let bin = tempfile::tempdir().unwrap();
    // tsc is invoked as: --project <tsconfig> --outDir <dist>
    stub_tool(
        bin.path(),
        "tsc",
        r#"printf "import { roll } from './dice';\nimport 'lodash';\n" > "$4/hero-tools.js""#,
    );
    write(&dir.path().join("src/tsconfig.json"), "{}");

    foundry_release(dir.path())
        .arg("build")
        .env("PATH", bin.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("dist/hero-tools.js")).unwrap(),
        "import { roll } from './dice.js';\nimport 'lodash';\n"
    );
}
