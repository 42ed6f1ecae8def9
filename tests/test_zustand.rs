use std::fs;
use std::path::Path;

use clap::Parser;
use scaffold_kit::commands::zustand::{ZustandArgs, run};
use tempfile::TempDir;

fn args(target: &Path, extra: &[&str]) -> ZustandArgs {
    let target = target.to_string_lossy().into_owned();
    let mut argv = vec!["zustand-store", "--path", target.as_str()];
    argv.extend_from_slice(extra);
    ZustandArgs::try_parse_from(argv).unwrap()
}

#[test]
fn test_zustand_web_pattern() {
    let dir = TempDir::new().unwrap();
    let report = run(&args(dir.path(), &["--pattern", "web", "--name", "ToolList"]), None).unwrap();

    assert!(report.is_success());
    assert_eq!(report.created.len(), 5);
    let context = fs::read_to_string(dir.path().join("context.ts")).unwrap();
    assert!(context.contains("ToolListContext"));
    assert!(!context.contains("{{"));
    assert!(dir.path().join("utils/flattenActions.ts").exists());
}

#[test]
fn test_zustand_core_with_slices() {
    let dir = TempDir::new().unwrap();
    let report = run(&args(dir.path(), &["--pattern", "core", "--name", "Core", "--slices", "auth,user"]), None).unwrap();

    assert!(report.is_success());
    assert_eq!(report.created.len(), 2 + 2 + 1);
    let auth = fs::read_to_string(dir.path().join("slices/auth.ts")).unwrap();
    assert!(auth.contains("AuthSlice"));
    let index = fs::read_to_string(dir.path().join("index.ts")).unwrap();
    assert!(index.contains("export type CoreSlice = AuthSlice & UserSlice"));
}

#[test]
fn test_zustand_core_single_slice() {
    let dir = TempDir::new().unwrap();
    let report = run(&args(dir.path(), &["--pattern", "core", "--name", "Settings", "--slices", "prefs"]), None).unwrap();

    assert!(report.is_success());
    let index = fs::read_to_string(dir.path().join("index.ts")).unwrap();
    assert!(index.contains("export type SettingsSlice = PrefsSlice"));
    assert!(index.contains("createPrefsSlice(...args)"));
}

#[test]
fn test_zustand_existing_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("types.ts"), "// mine").unwrap();

    let report = run(&args(dir.path(), &["--pattern", "web", "--name", "ToolList"]), None).unwrap();
    assert!(report.is_success());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(fs::read_to_string(dir.path().join("types.ts")).unwrap(), "// mine");
}

#[test]
fn test_zustand_rejects_bad_names() {
    let dir = TempDir::new().unwrap();
    assert!(run(&args(dir.path(), &["--pattern", "web", "--name", "toolList"]), None).is_err());
    assert!(run(&args(dir.path(), &["--pattern", "core", "--name", "Core", "--slices", "Auth"]), None).is_err());
    assert!(run(&args(dir.path(), &["--pattern", "core", "--name", "Core", "--slices", " , "]), None).is_err());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_zustand_dry_run() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("store");
    let report = run(&args(&target, &["--pattern", "core", "--name", "Core", "--slices", "a,b", "--dry-run"]), None).unwrap();

    assert!(report.is_success());
    assert!(report.created.iter().all(|c| c.starts_with("[dry-run] ")));
    assert!(!target.exists());
}
