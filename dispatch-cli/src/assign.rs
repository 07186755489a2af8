//! `assign` command: hand open batches to available couriers.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use dispatch_partition::HillClimbPartitioner;
use dispatch_service::DispatchConfig;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::snapshot::{WhenMissing, load_store, save_store};
use crate::{ARG_STORE, CliError, CliService, ENV_ASSIGN_STORE};

/// CLI arguments for the `assign` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Pair available couriers with open batches in the order \
                 they were stored. Couriers or batches left over are \
                 reported in the printed summary and stay untouched.",
    about = "Assign open batches to available couriers"
)]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct AssignArgs {
    /// Path to the store snapshot.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

impl AssignArgs {
    pub(crate) fn into_config(self) -> Result<AssignConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AssignConfig::try_from(merged)
    }
}

/// Resolved `assign` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssignConfig {
    /// Store snapshot to update.
    pub(crate) store: Utf8PathBuf,
}

impl TryFrom<AssignArgs> for AssignConfig {
    type Error = CliError;

    fn try_from(args: AssignArgs) -> Result<Self, Self::Error> {
        let store = args.store.ok_or(CliError::MissingArgument {
            field: ARG_STORE,
            env: ENV_ASSIGN_STORE,
        })?;
        Ok(Self { store })
    }
}

pub(crate) fn run_assign_with(args: AssignArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = load_store(&config.store, ARG_STORE, WhenMissing::Fail)?;
    let mut service = CliService::new(
        store,
        HillClimbPartitioner::new(),
        DispatchConfig::default(),
    );
    let summary = service.assign_couriers()?;
    save_store(&config.store, &service.into_store())?;
    write_json(writer, &summary)
}
