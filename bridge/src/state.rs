//! State definitions for the Threshold Bridge contract.
//!
//! The contract deliberately persists almost nothing about the validator
//! set: only its 32-byte checkpoint hash and version nonce. Callers supply
//! the full set on every privileged call, which is re-hashed and compared
//! against the stored checkpoint. This bounds storage regardless of set
//! size, at the cost of argument size and per-call validation.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for pause and handover operations
    pub admin: Addr,
    /// Domain-separation identifier mixed into every digest (32 bytes).
    /// Immutable after instantiation.
    pub bridge_id: [u8; 32],
    /// Required fraction of total validator power, in basis points of
    /// 10000 (e.g. 6666 for two thirds). Immutable after instantiation.
    pub power_threshold_bps: u64,
    /// Whether the bridge is currently paused
    pub paused: bool,
}

/// Pending admin change proposal
#[cw_serde]
pub struct PendingAdmin {
    /// Proposed new admin address
    pub new_address: Addr,
    /// Block time when the change can be executed
    pub execute_after: Timestamp,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:threshold-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "1.0.0";

/// Basis-point denominator for the power threshold comparison
pub const THRESHOLD_DENOMINATOR: u64 = 10_000;

/// 7 days in seconds for admin change timelock
pub const ADMIN_TIMELOCK_DURATION: u64 = 604_800;

/// Reply id for the contained logic-call target invocation
pub const REPLY_LOGIC_CALL: u64 = 1;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Pending admin proposal (if any)
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");

/// Checkpoint hash of the current validator set
pub const CHECKPOINT: Item<[u8; 32]> = Item::new("checkpoint");

/// Version nonce of the current validator set (strictly increasing)
pub const VALSET_NONCE: Item<u64> = Item::new("valset_nonce");

/// Highest consumed nonce per invalidation scope.
/// Key: 32-byte invalidation id as &[u8], Value: last-consumed nonce.
/// Absent means no nonce consumed yet (treated as 0).
pub const INVALIDATION_NONCES: Map<&[u8], u64> = Map::new("invalidation_nonces");
