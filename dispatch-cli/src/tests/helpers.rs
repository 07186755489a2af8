//! Temporary workspaces and fixture files for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use dispatch_core::MemoryDispatchStore;
use dispatch_core::test_support::seeded_store;
use tempfile::TempDir;

use super::*;

/// A temporary directory addressed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn join(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

pub(super) fn write_store(path: &Utf8Path, store: &MemoryDispatchStore) {
    let payload = serde_json::to_vec_pretty(store).expect("serialise store");
    write_utf8(path, &payload);
}

/// Write the Moscow/Saint Petersburg store with `courier_count` couriers.
pub(super) fn write_seeded_store(path: &Utf8Path, courier_count: u64) {
    write_store(path, &seeded_store(courier_count));
}

pub(super) fn read_store(path: &Utf8Path) -> MemoryDispatchStore {
    let payload = std::fs::read(path.as_std_path()).expect("read store snapshot");
    serde_json::from_slice(&payload).expect("decode store snapshot")
}

/// An import document with three orders and two couriers.
pub(super) const IMPORT_DOCUMENT: &str = r#"{
  "orders": [
    {"location": "moscow-1", "latitude": 55.75, "longitude": 37.61, "recipient": "Ivanov I.", "items": ["bread"]},
    {"location": "moscow-2", "latitude": 55.76, "longitude": 37.62, "recipient": "Petrova A."},
    {"location": "petersburg", "latitude": 59.93, "longitude": 30.31, "recipient": "Sidorov P."}
  ],
  "couriers": [
    {"courier_id": 1, "name": "Fedorov", "latitude": 55.75, "longitude": 37.62, "available": true},
    {"courier_id": 2, "name": "Smirnova", "latitude": 59.94, "longitude": 30.32, "available": true}
  ]
}"#;

/// Parse `argv` and run the selected command, capturing stdout.
pub(super) fn run_cli(argv: &[&str], stdout: &mut Vec<u8>) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(argv).map_err(CliError::from)?;
    execute(cli.command, stdout)
}
