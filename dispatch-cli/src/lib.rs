//! Command-line interface for the courier dispatcher.
//!
//! Every subcommand works on a JSON snapshot of a
//! [`MemoryDispatchStore`](dispatch_core::MemoryDispatchStore): it loads the
//! snapshot, applies one dispatch step, writes the snapshot back, and prints
//! the result as JSON on stdout.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{ArgAction, Parser, Subcommand};
use dispatch_core::MemoryDispatchStore;
use dispatch_partition::HillClimbPartitioner;
use dispatch_service::DispatchService;

mod assign;
mod courier;
mod error;
mod import;
mod logging;
mod maintenance;
mod optimize;
mod output;
mod snapshot;

pub use error::CliError;

use assign::{AssignArgs, run_assign_with};
use courier::{CourierArgs, CourierOrdersArgs, run_courier_orders_with, run_courier_with};
use import::{ImportArgs, run_import_with};
use maintenance::{ResetArgs, ShowArgs, run_reset_with, run_show_with};
use optimize::{OptimizeArgs, run_optimize_with};

/// Service over a loaded snapshot, as every command drives it.
pub(crate) type CliService = DispatchService<MemoryDispatchStore, HillClimbPartitioner>;

pub(crate) const ARG_STORE: &str = "store";
pub(crate) const ARG_IMPORT_PATH: &str = "path";
pub(crate) const ARG_COLLECTION: &str = "collection";
pub(crate) const ARG_GROUPS: &str = "groups";
pub(crate) const ARG_ITERATIONS: &str = "iterations";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_COURIER_ID: &str = "courier-id";

pub(crate) const ENV_IMPORT_STORE: &str = "DISPATCH_CMDS_IMPORT_STORE";
pub(crate) const ENV_IMPORT_PATH: &str = "DISPATCH_CMDS_IMPORT_IMPORT_PATH";
pub(crate) const ENV_SHOW_STORE: &str = "DISPATCH_CMDS_SHOW_STORE";
pub(crate) const ENV_SHOW_COLLECTION: &str = "DISPATCH_CMDS_SHOW_COLLECTION";
pub(crate) const ENV_OPTIMIZE_STORE: &str = "DISPATCH_CMDS_OPTIMIZE_STORE";
pub(crate) const ENV_ASSIGN_STORE: &str = "DISPATCH_CMDS_ASSIGN_STORE";
pub(crate) const ENV_RESET_STORE: &str = "DISPATCH_CMDS_RESET_STORE";
pub(crate) const ENV_RESET_COLLECTION: &str = "DISPATCH_CMDS_RESET_COLLECTION";
pub(crate) const ENV_COURIER_STORE: &str = "DISPATCH_CMDS_COURIER_STORE";
pub(crate) const ENV_COURIER_ID: &str = "DISPATCH_CMDS_COURIER_COURIER_ID";
pub(crate) const ENV_COURIER_ORDERS_STORE: &str = "DISPATCH_CMDS_COURIER_ORDERS_STORE";
pub(crate) const ENV_COURIER_ORDERS_ID: &str = "DISPATCH_CMDS_COURIER_ORDERS_COURIER_ID";

/// Run the dispatch CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments fail to parse, logging cannot be
/// installed, or the selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logger(cli.verbose).map_err(CliError::InitLogging)?;
    let mut stdout = std::io::stdout().lock();
    execute(cli.command, &mut stdout)
}

fn execute(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Import(args) => run_import_with(args, writer),
        Command::Show(args) => run_show_with(args, writer),
        Command::Courier(args) => run_courier_with(args, writer),
        Command::CourierOrders(args) => run_courier_orders_with(args, writer),
        Command::Optimize(args) => run_optimize_with(args, writer),
        Command::Assign(args) => run_assign_with(args, writer),
        Command::Reset(args) => run_reset_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dispatch",
    about = "Batch delivery orders and hand them to couriers",
    version
)]
struct Cli {
    /// Increase log detail (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add orders and couriers from a JSON file to the store snapshot.
    Import(ImportArgs),
    /// Print orders, couriers or batches as JSON.
    Show(ShowArgs),
    /// Print one courier as JSON.
    Courier(CourierArgs),
    /// Print the orders a courier carries as JSON.
    CourierOrders(CourierOrdersArgs),
    /// Partition new orders into delivery batches.
    Optimize(OptimizeArgs),
    /// Hand open batches to available couriers.
    Assign(AssignArgs),
    /// Reset orders, couriers or batches for a fresh round.
    Reset(ResetArgs),
}

#[cfg(test)]
mod tests;
