//! Delivery-point partitioning engine.
//!
//! This crate provides [`HillClimbPartitioner`], the default implementation
//! of the [`Partitioner`](dispatch_core::Partitioner) trait. Points are first
//! placed greedily, each joining the group whose members are closest in total
//! haversine distance, and the result is then improved by a fixed number of
//! single-point relocation moves. A move is kept only when it strictly lowers
//! the objective, so refinement never makes a partition worse.
//!
//! The building blocks ([`construct()`], [`cost`], [`nearest_group`] and
//! [`refine()`]) are public so callers can drive the stages separately, for
//! example with their own random source.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod construct;
mod objective;
mod partitioner;
mod refine;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use construct::{construct, nearest_group};
pub use objective::{cost, distance_sum, group_cost};
pub use partitioner::{HillClimbPartitioner, partition};
pub use refine::{RefineOutcome, refine};
