//! Snapshot file handling and JSON output.

use super::helpers::{Workspace, write_seeded_store, write_utf8};
use super::*;
use crate::output::write_json;
use crate::snapshot::{WhenMissing, load_store, save_store};
use dispatch_core::test_support::seeded_store;
use rstest::rstest;

#[rstest]
fn saved_snapshots_load_back_unchanged() {
    let workspace = Workspace::new();
    let path = workspace.join("nested/deeper/store.json");
    let store = seeded_store(2);

    save_store(&path, &store).expect("save snapshot");
    let loaded = load_store(&path, ARG_STORE, WhenMissing::Fail).expect("load snapshot");
    assert_eq!(loaded, store);
}

#[rstest]
fn saving_leaves_no_temporary_file_behind() {
    let workspace = Workspace::new();
    let path = workspace.join("store.json");
    write_seeded_store(&path, 1);

    save_store(&path, &seeded_store(3)).expect("overwrite snapshot");
    let names: Vec<String> = std::fs::read_dir(workspace.join(".").as_std_path())
        .expect("list workspace")
        .map(|entry| {
            entry
                .expect("directory entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, vec!["store.json".to_owned()]);
}

#[rstest]
#[case::fail(WhenMissing::Fail, false)]
#[case::start_empty(WhenMissing::StartEmpty, true)]
fn missing_snapshots_follow_the_policy(#[case] when_missing: WhenMissing, #[case] ok: bool) {
    let workspace = Workspace::new();
    let path = workspace.join("absent.json");

    match load_store(&path, ARG_STORE, when_missing) {
        Ok(store) => {
            assert!(ok, "expected a failure");
            assert_eq!(store, dispatch_core::MemoryDispatchStore::default());
        }
        Err(CliError::MissingSourceFile { field, path: missing }) => {
            assert!(!ok, "expected an empty store");
            assert_eq!(field, ARG_STORE);
            assert_eq!(missing, path);
        }
        Err(other) => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn directories_are_not_snapshots() {
    let workspace = Workspace::new();
    let path = workspace.join("store.json");
    std::fs::create_dir(path.as_std_path()).expect("create directory");

    let err = load_store(&path, ARG_STORE, WhenMissing::StartEmpty)
        .expect_err("directory should be rejected");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_STORE),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn corrupt_snapshots_report_the_path() {
    let workspace = Workspace::new();
    let path = workspace.join("store.json");
    write_utf8(&path, b"{ not valid json");

    let err = load_store(&path, ARG_STORE, WhenMissing::Fail).expect_err("invalid JSON");
    match err {
        CliError::ParseFile { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected ParseFile, found {other:?}"),
    }
}

#[rstest]
fn json_output_ends_with_a_newline() {
    let mut buffer = Vec::new();
    write_json(&mut buffer, &serde_json::json!({ "count": 2 })).expect("write JSON");
    let text = String::from_utf8(buffer).expect("utf-8 output");
    assert_eq!(text, "{\n  \"count\": 2\n}\n");
}
