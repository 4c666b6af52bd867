//! Batch Middleware Contract
//!
//! A privileged logic target for the Threshold Bridge: the bridge's
//! execution engine authorizes one call per quorum signature, and this
//! contract fans that single call out into an ordered sequence of
//! transfer-then-invoke steps against one user-supplied contract.
//!
//! Ownership is a one-time setup step: the deployer hands the contract to
//! the bridge and no further transfer is possible, so no third party can
//! ever trigger batched calls. Unlike the engine's contained target
//! invocation, a batch is atomic as a unit — any failing sub-call reverts
//! the whole batch.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
