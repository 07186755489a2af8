//! Shared test harness modules for the dispatch CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod snapshot_unit;
mod unit;
