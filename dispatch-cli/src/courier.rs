//! `courier` and `courier-orders` commands: look up a single courier.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use dispatch_core::{CourierId, DispatchStore, MemoryDispatchStore, StoreError};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::snapshot::{WhenMissing, load_store};
use crate::{
    ARG_COURIER_ID, ARG_STORE, CliError, ENV_COURIER_ID, ENV_COURIER_ORDERS_ID,
    ENV_COURIER_ORDERS_STORE, ENV_COURIER_STORE,
};

/// CLI arguments for the `courier` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print one courier as JSON")]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct CourierArgs {
    /// Identifier of the courier.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) courier_id: Option<CourierId>,
    /// Path to the store snapshot.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

/// CLI arguments for the `courier-orders` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print the orders carried by one courier as JSON")]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct CourierOrdersArgs {
    /// Identifier of the courier.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) courier_id: Option<CourierId>,
    /// Path to the store snapshot.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

impl CourierArgs {
    pub(crate) fn into_config(self) -> Result<CourierConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CourierConfig::try_from(merged)
    }
}

impl CourierOrdersArgs {
    pub(crate) fn into_config(self) -> Result<CourierConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CourierConfig::try_from(merged)
    }
}

/// Resolved configuration shared by the courier lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CourierConfig {
    /// Courier to look up.
    pub(crate) courier_id: CourierId,
    /// Store snapshot to read.
    pub(crate) store: Utf8PathBuf,
}

impl CourierConfig {
    fn resolve(
        courier_id: Option<CourierId>,
        store: Option<Utf8PathBuf>,
        id_env: &'static str,
        store_env: &'static str,
    ) -> Result<Self, CliError> {
        Ok(Self {
            courier_id: courier_id.ok_or(CliError::MissingArgument {
                field: ARG_COURIER_ID,
                env: id_env,
            })?,
            store: store.ok_or(CliError::MissingArgument {
                field: ARG_STORE,
                env: store_env,
            })?,
        })
    }

    fn load(&self) -> Result<MemoryDispatchStore, CliError> {
        let store = load_store(&self.store, ARG_STORE, WhenMissing::Fail)?;
        if store.courier(self.courier_id).is_none() {
            return Err(CliError::Lookup(StoreError::UnknownCourier(self.courier_id)));
        }
        Ok(store)
    }
}

impl TryFrom<CourierArgs> for CourierConfig {
    type Error = CliError;

    fn try_from(args: CourierArgs) -> Result<Self, Self::Error> {
        Self::resolve(args.courier_id, args.store, ENV_COURIER_ID, ENV_COURIER_STORE)
    }
}

impl TryFrom<CourierOrdersArgs> for CourierConfig {
    type Error = CliError;

    fn try_from(args: CourierOrdersArgs) -> Result<Self, Self::Error> {
        Self::resolve(
            args.courier_id,
            args.store,
            ENV_COURIER_ORDERS_ID,
            ENV_COURIER_ORDERS_STORE,
        )
    }
}

pub(crate) fn run_courier_with(args: CourierArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = config.load()?;
    write_json(writer, &store.courier(config.courier_id))
}

pub(crate) fn run_courier_orders_with(
    args: CourierOrdersArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = config.load()?;
    write_json(writer, &store.courier_orders(config.courier_id))
}
