//! Threshold Bridge Contract - Quorum-Signed Cross-Chain Execution Core
//!
//! This contract is the trust core of a two-way bridge: it tracks a weighted
//! validator set as a single checkpoint hash, verifies that submissions carry
//! enough aggregate signing power, and executes each authorized "logic call"
//! exactly once.
//!
//! # Validator Set (Checkpoint)
//! Only the keccak256 checkpoint of the set is persisted. Every privileged
//! call supplies the full set, which is re-hashed and compared. Updates are
//! signed by the outgoing set and carry a strictly increasing nonce.
//!
//! # Logic Calls
//! A relayer submits a call description plus validator signatures over its
//! digest. After checkpoint, deadline, threshold and replay checks pass, the
//! bridge moves the declared CW20 amounts, pays the relayer fee, and invokes
//! the target contract with the opaque payload exactly once.
//!
//! # Security
//! - Fixed-point threshold comparison over validator power (basis points)
//! - Per-scope invalidation nonces as the replay defense, independent of
//!   signature validity
//! - Target failures are contained: a reverting target cannot undo nonce
//!   consumption and re-earn its authorization
//! - Emergency pause and timelocked admin handover

pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod state;
pub mod verify;

pub use crate::error::ContractError;
pub use crate::hash::{checkpoint_digest, eth_signed_message_hash, keccak256, EthAddress};
