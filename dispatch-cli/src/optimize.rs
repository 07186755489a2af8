//! `optimize` command: partition new orders into batches.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use dispatch_partition::HillClimbPartitioner;
use dispatch_service::DispatchConfig;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::snapshot::{WhenMissing, load_store, save_store};
use crate::{
    ARG_GROUPS, ARG_ITERATIONS, ARG_SEED, ARG_STORE, CliError, CliService, ENV_OPTIMIZE_STORE,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Partition every order in the new state into geographically \
                 compact batches. Orders are grouped greedily and then \
                 refined by hill climbing; each non-empty group becomes a \
                 batch waiting for a courier. The batches are printed as \
                 JSON.",
    about = "Partition new orders into batches"
)]
#[ortho_config(prefix = "DISPATCH")]
pub(crate) struct OptimizeArgs {
    /// Path to the store snapshot.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
    /// Number of batches to form (default 3).
    #[arg(long = ARG_GROUPS, value_name = "count")]
    #[serde(default)]
    pub(crate) groups: Option<usize>,
    /// Refinement iterations (default 1000).
    #[arg(long = ARG_ITERATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) iterations: Option<u64>,
    /// Seed for the refinement random source (default 0).
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptimizeConfig {
    /// Store snapshot to optimise.
    pub(crate) store: Utf8PathBuf,
    /// Partitioning parameters.
    pub(crate) dispatch: DispatchConfig,
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let store = args.store.ok_or(CliError::MissingArgument {
            field: ARG_STORE,
            env: ENV_OPTIMIZE_STORE,
        })?;
        let defaults = DispatchConfig::default();
        let dispatch = DispatchConfig::new(
            args.groups.unwrap_or(defaults.group_count),
            args.iterations.unwrap_or(defaults.iteration_budget),
            args.seed.unwrap_or(defaults.seed),
        );
        Ok(Self { store, dispatch })
    }
}

pub(crate) fn run_optimize_with(
    args: OptimizeArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let store = load_store(&config.store, ARG_STORE, WhenMissing::Fail)?;
    let mut service = CliService::new(store, HillClimbPartitioner::new(), config.dispatch);
    let batches = service.optimize_orders()?;
    save_store(&config.store, &service.into_store())?;
    info!("saved {} new batches to {}", batches.len(), config.store);
    write_json(writer, &batches)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
