//! Message types for the Threshold Bridge contract.
//!
//! Both privileged calls take the full current validator set as explicit
//! arguments rather than looking it up internally: the contract stores only
//! the set's checkpoint hash, so the digest must be recomputed from the
//! submitted arrays and compared against it.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary, Timestamp};

use common::{LogicCallArgs, Signature};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for pause and handover operations
    pub admin: String,
    /// 32-byte domain-separation identifier for all digests
    pub bridge_id: HexBinary,
    /// Required power fraction in basis points (1..=10000, e.g. 6666)
    pub power_threshold_bps: u64,
    /// Initial validator identities (20 bytes each, parallel with `powers`)
    pub validators: Vec<HexBinary>,
    /// Initial voting powers (parallel with `validators`)
    pub powers: Vec<u64>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    /// Replace the stored validator-set checkpoint.
    ///
    /// Authorization: quorum of the *current* (outgoing) validator set,
    /// signing the checkpoint digest of the new set.
    UpdateValidatorSet {
        /// New validator identities (20 bytes each)
        new_validators: Vec<HexBinary>,
        /// New voting powers (parallel with `new_validators`)
        new_powers: Vec<u64>,
        /// New set version; must be strictly greater than the stored nonce
        new_valset_nonce: u64,
        /// Current validator identities (must hash to the stored checkpoint)
        current_validators: Vec<HexBinary>,
        /// Current voting powers
        current_powers: Vec<u64>,
        /// Current set version as stored
        current_valset_nonce: u64,
        /// Signature slots aligned 1:1 with `current_validators`
        signatures: Vec<Option<Signature>>,
    },

    /// Execute one quorum-authorized logic call.
    ///
    /// Authorization: quorum of the current validator set over the
    /// logic-call digest of `call`. Replay-protected by the invalidation
    /// ledger, independent of signature validity.
    SubmitLogicCall {
        /// Current validator identities (must hash to the stored checkpoint)
        validators: Vec<HexBinary>,
        /// Current voting powers
        powers: Vec<u64>,
        /// Current set version as stored
        valset_nonce: u64,
        /// Signature slots aligned 1:1 with `validators`
        signatures: Vec<Option<Signature>>,
        /// The call to authorize and execute
        call: LogicCallArgs,
    },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Pause the bridge (admin only)
    Pause {},

    /// Unpause the bridge (admin only)
    Unpause {},

    /// Initiate 7-day timelock for admin transfer
    ProposeAdmin { new_admin: String },

    /// Complete admin transfer after timelock
    AcceptAdmin {},

    /// Cancel pending admin change
    CancelAdminProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns the stored checkpoint hash and validator-set nonce
    #[returns(CheckpointResponse)]
    Checkpoint {},

    /// Returns the highest consumed nonce for an invalidation scope
    /// (0 if none consumed yet)
    #[returns(InvalidationNonceResponse)]
    InvalidationNonce {
        /// 32-byte scope key
        invalidation_id: HexBinary,
    },

    /// Returns pending admin proposal details
    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},

    /// Compute the checkpoint digest for a validator set without storing it
    /// (relayer tooling parity)
    #[returns(DigestResponse)]
    ComputeCheckpoint {
        validators: Vec<HexBinary>,
        powers: Vec<u64>,
        valset_nonce: u64,
    },

    /// Compute the digest a validator must sign to authorize `call`
    #[returns(DigestResponse)]
    ComputeLogicCallDigest { call: LogicCallArgs },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub bridge_id: HexBinary,
    pub power_threshold_bps: u64,
    pub paused: bool,
}

#[cw_serde]
pub struct CheckpointResponse {
    /// Current checkpoint hash (32 bytes)
    pub checkpoint: HexBinary,
    /// Current validator-set nonce
    pub valset_nonce: u64,
}

#[cw_serde]
pub struct InvalidationNonceResponse {
    pub invalidation_id: HexBinary,
    pub nonce: u64,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}

#[cw_serde]
pub struct DigestResponse {
    /// 32-byte digest
    pub digest: HexBinary,
}
