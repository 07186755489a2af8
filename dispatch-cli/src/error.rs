//! Error types emitted by the dispatch CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use dispatch_core::StoreError;
use dispatch_service::DispatchError;
use thiserror::Error;

/// Errors emitted by the dispatch CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Installing the log backend failed.
    #[error("failed to initialise logging: {0}")]
    InitLogging(#[source] std::io::Error),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading a JSON input file failed.
    #[error("failed to read {path:?}: {source}")]
    ReadFile {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// A JSON input file could not be decoded.
    #[error("failed to parse JSON at {path:?}: {source}")]
    ParseFile {
        /// File being decoded.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// Creating the snapshot's parent directory failed.
    #[error("failed to create directory {path:?}: {source}")]
    CreateParent {
        /// Directory being created.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing the store snapshot failed.
    #[error("failed to write store snapshot {path:?}: {source}")]
    WriteSnapshot {
        /// Snapshot being written.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Serialising the store snapshot failed.
    #[error("failed to serialise store snapshot {path:?}: {source}")]
    SerialiseSnapshot {
        /// Snapshot being written.
        path: Utf8PathBuf,
        /// Encoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// Importing records into the store failed.
    #[error("failed to import {path:?}: {source}")]
    Import {
        /// File being imported.
        path: Utf8PathBuf,
        /// Store rejection.
        #[source]
        source: StoreError,
    },
    /// A record lookup failed.
    #[error(transparent)]
    Lookup(StoreError),
    /// A dispatch step failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
