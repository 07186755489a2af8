//! Store snapshot files, read and written through `cap-std`.
//!
//! Snapshots are replaced atomically: the new document is written beside
//! the target under a temporary name and then renamed over it.

use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use dispatch_core::MemoryDispatchStore;
use log::debug;
use serde::de::DeserializeOwned;

use crate::CliError;

/// How to treat a snapshot path with no file behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WhenMissing {
    /// Start from an empty store.
    StartEmpty,
    /// Report [`CliError::MissingSourceFile`].
    Fail,
}

/// Load the store snapshot at `path`.
pub(crate) fn load_store(
    path: &Utf8Path,
    field: &'static str,
    when_missing: WhenMissing,
) -> Result<MemoryDispatchStore, CliError> {
    match require_file(path, field) {
        Ok(()) => read_json(path),
        Err(CliError::MissingSourceFile { .. }) if when_missing == WhenMissing::StartEmpty => {
            debug!("no snapshot at {path}; starting from an empty store");
            Ok(MemoryDispatchStore::default())
        }
        Err(err) => Err(err),
    }
}

/// Write `store` to `path`, creating parent directories as needed.
pub(crate) fn save_store(path: &Utf8Path, store: &MemoryDispatchStore) -> Result<(), CliError> {
    ensure_parent_dir(path).map_err(|source| CliError::CreateParent {
        path: path
            .parent()
            .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf),
        source,
    })?;
    let write_error = |source: io::Error| CliError::WriteSnapshot {
        path: path.to_path_buf(),
        source,
    };
    let (dir, file_name) = open_dir_and_file(path).map_err(write_error)?;
    let temp_name = format!(".{file_name}.tmp");
    let file = dir.create(&temp_name).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, store).map_err(|source| {
        CliError::SerialiseSnapshot {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").map_err(write_error)?;
    writer.flush().map_err(write_error)?;
    drop(writer);
    dir.rename(&temp_name, &dir, &file_name).map_err(write_error)?;
    debug!("saved store snapshot to {path}");
    Ok(())
}

/// Decode a JSON document from `path`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_file(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == ErrorKind::NotFound => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Split a parent path into an ambient base directory and a relative suffix.
fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();
    let (base, relative) = match std_parent.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;
    Ok((dir, relative))
}
