//! Error types for the Threshold Bridge contract.
//!
//! Every rejection carries enough detail for a relayer to distinguish
//! "resubmit with a fresh timeout" from "permanently replayed" from
//! "gather more signatures".

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending admin can accept")]
    UnauthorizedPendingAdmin,

    #[error("No pending admin change")]
    NoPendingAdmin,

    #[error("Timelock not expired: {remaining_seconds} seconds remaining")]
    TimelockNotExpired { remaining_seconds: u64 },

    #[error("Bridge is paused")]
    BridgePaused,

    // ========================================================================
    // Validator Set Errors
    // ========================================================================

    #[error("Stale validator set nonce: stored {current}, submitted {submitted}")]
    StaleValsetNonce { current: u64, submitted: u64 },

    #[error("Malformed validator set: {reason}")]
    MalformedValidatorSet { reason: String },

    #[error("Supplied validator set does not match the stored checkpoint")]
    InvalidValidatorSet,

    #[error("Invalid power threshold: must be between 1 and 10000 basis points")]
    InvalidThreshold,

    // ========================================================================
    // Authorization Power Errors
    // ========================================================================

    #[error("Insufficient power: accumulated {cumulative_power}, required {required_power}")]
    InsufficientPower {
        cumulative_power: u128,
        required_power: u128,
    },

    // ========================================================================
    // Logic Call Errors
    // ========================================================================

    #[error("Malformed logic call: {reason}")]
    MalformedCall { reason: String },

    #[error("Logic call expired: timeout {time_out}, block time {now}")]
    Expired { time_out: u64, now: u64 },

    #[error(
        "Replay: invalidation scope {invalidation_id} already consumed nonce {current}, \
         submitted {submitted}"
    )]
    Replay {
        invalidation_id: String,
        submitted: u64,
        current: u64,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
