//! `import` command: add orders and couriers to the store snapshot.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use dispatch_core::{Courier, DispatchStore, Order, StoreError};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::snapshot::{WhenMissing, load_store, read_json, require_file, save_store};
use crate::{ARG_IMPORT_PATH, ARG_STORE, CliError, ENV_IMPORT_PATH, ENV_IMPORT_STORE};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read a JSON document of the form \
                 {\"orders\": [...], \"couriers\": [...]} and add every \
                 record to the store snapshot. The snapshot is created when \
                 it does not exist yet; duplicate orders or couriers abort \
                 the import without touching the snapshot.",
    about = "Import orders and couriers from JSON"
)]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct ImportArgs {
    /// Path to the JSON file to import.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) import_path: Option<Utf8PathBuf>,
    /// Path to the store snapshot.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

impl ImportArgs {
    pub(crate) fn into_config(self) -> Result<ImportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ImportConfig::try_from(merged)
    }
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    /// JSON file holding the records.
    pub(crate) import_path: Utf8PathBuf,
    /// Store snapshot to extend.
    pub(crate) store: Utf8PathBuf,
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        let import_path = args.import_path.ok_or(CliError::MissingArgument {
            field: ARG_IMPORT_PATH,
            env: ENV_IMPORT_PATH,
        })?;
        let store = args.store.ok_or(CliError::MissingArgument {
            field: ARG_STORE,
            env: ENV_IMPORT_STORE,
        })?;
        Ok(Self { import_path, store })
    }
}

/// Records accepted by `import`. Either list may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub(crate) struct ImportFile {
    #[serde(default)]
    pub(crate) orders: Vec<Order>,
    #[serde(default)]
    pub(crate) couriers: Vec<Courier>,
}

/// Counts printed after a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct ImportSummary {
    pub(crate) orders: usize,
    pub(crate) couriers: usize,
}

pub(crate) fn run_import_with(args: ImportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let summary = import_records(&config)?;
    write_json(writer, &summary)
}

fn import_records(config: &ImportConfig) -> Result<ImportSummary, CliError> {
    require_file(&config.import_path, ARG_IMPORT_PATH)?;
    let file: ImportFile = read_json(&config.import_path)?;
    let mut store = load_store(&config.store, ARG_STORE, WhenMissing::StartEmpty)?;
    let import_error = |source: StoreError| CliError::Import {
        path: config.import_path.clone(),
        source,
    };

    let summary = ImportSummary {
        orders: file.orders.len(),
        couriers: file.couriers.len(),
    };
    for order in file.orders {
        store.insert_order(order).map_err(import_error)?;
    }
    for courier in file.couriers {
        store.insert_courier(courier).map_err(import_error)?;
    }

    save_store(&config.store, &store)?;
    info!(
        "imported {} orders and {} couriers into {}",
        summary.orders, summary.couriers, config.store
    );
    Ok(summary)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ImportConfig, CliError> {
    let merged = ImportArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ImportConfig::try_from(merged)
}
