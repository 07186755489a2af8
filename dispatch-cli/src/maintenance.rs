//! `show` and `reset` commands over a single store collection.

use std::fmt;
use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use dispatch_core::{DispatchStore, MemoryDispatchStore};
use dispatch_partition::HillClimbPartitioner;
use dispatch_service::DispatchConfig;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::snapshot::{WhenMissing, load_store, save_store};
use crate::{
    ARG_COLLECTION, ARG_STORE, CliError, CliService, ENV_RESET_COLLECTION, ENV_RESET_STORE,
    ENV_SHOW_COLLECTION, ENV_SHOW_STORE,
};

/// Store collections addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Collection {
    /// Customer orders.
    Orders,
    /// Couriers.
    Couriers,
    /// Delivery batches.
    Batches,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Orders => "orders",
            Self::Couriers => "couriers",
            Self::Batches => "batches",
        })
    }
}

/// CLI arguments for the `show` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print a store collection as JSON")]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct ShowArgs {
    /// Collection to print.
    #[arg(value_enum, value_name = "collection")]
    #[serde(default)]
    pub(crate) collection: Option<Collection>,
    /// Path to the store snapshot.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

/// CLI arguments for the `reset` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Prepare the store for a fresh dispatch round. `orders` \
                 returns every order to the new state without a courier, \
                 `couriers` makes every courier available and empty-handed, \
                 and `batches` deletes every batch.",
    about = "Reset a store collection"
)]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct ResetArgs {
    /// Collection to reset.
    #[arg(value_enum, value_name = "collection")]
    #[serde(default)]
    pub(crate) collection: Option<Collection>,
    /// Path to the store snapshot.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

impl ShowArgs {
    pub(crate) fn into_config(self) -> Result<CollectionConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CollectionConfig::try_from(merged)
    }
}

impl ResetArgs {
    pub(crate) fn into_config(self) -> Result<CollectionConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CollectionConfig::try_from(merged)
    }
}

/// Resolved configuration shared by `show` and `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CollectionConfig {
    /// Collection to act on.
    pub(crate) collection: Collection,
    /// Store snapshot to read.
    pub(crate) store: Utf8PathBuf,
}

impl CollectionConfig {
    fn resolve(
        collection: Option<Collection>,
        store: Option<Utf8PathBuf>,
        collection_env: &'static str,
        store_env: &'static str,
    ) -> Result<Self, CliError> {
        Ok(Self {
            collection: collection.ok_or(CliError::MissingArgument {
                field: ARG_COLLECTION,
                env: collection_env,
            })?,
            store: store.ok_or(CliError::MissingArgument {
                field: ARG_STORE,
                env: store_env,
            })?,
        })
    }
}

impl TryFrom<ShowArgs> for CollectionConfig {
    type Error = CliError;

    fn try_from(args: ShowArgs) -> Result<Self, Self::Error> {
        Self::resolve(
            args.collection,
            args.store,
            ENV_SHOW_COLLECTION,
            ENV_SHOW_STORE,
        )
    }
}

impl TryFrom<ResetArgs> for CollectionConfig {
    type Error = CliError;

    fn try_from(args: ResetArgs) -> Result<Self, Self::Error> {
        Self::resolve(
            args.collection,
            args.store,
            ENV_RESET_COLLECTION,
            ENV_RESET_STORE,
        )
    }
}

/// Result printed by `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct ResetSummary {
    pub(crate) collection: Collection,
    pub(crate) count: usize,
}

pub(crate) fn run_show_with(args: ShowArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = load_store(&config.store, ARG_STORE, WhenMissing::Fail)?;
    match config.collection {
        Collection::Orders => write_json(writer, &store.orders()),
        Collection::Couriers => write_json(writer, &store.couriers()),
        Collection::Batches => write_json(writer, &store.batches()),
    }
}

pub(crate) fn run_reset_with(args: ResetArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let summary = reset_collection(&config)?;
    write_json(writer, &summary)
}

fn reset_collection(config: &CollectionConfig) -> Result<ResetSummary, CliError> {
    let store = load_store(&config.store, ARG_STORE, WhenMissing::Fail)?;
    let mut service = CliService::new(
        store,
        HillClimbPartitioner::new(),
        DispatchConfig::default(),
    );
    let count = match config.collection {
        Collection::Orders => service.reset_orders(),
        Collection::Couriers => service.reset_couriers(),
        Collection::Batches => service.reset_batches(),
    };
    let updated: MemoryDispatchStore = service.into_store();
    save_store(&config.store, &updated)?;
    info!("reset {count} {} in {}", config.collection, config.store);
    Ok(ResetSummary {
        collection: config.collection,
        count,
    })
}

#[cfg(test)]
pub(crate) fn show_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<CollectionConfig, CliError> {
    let merged = ShowArgs::merge_from_layers(layers).map_err(CliError::from)?;
    CollectionConfig::try_from(merged)
}
