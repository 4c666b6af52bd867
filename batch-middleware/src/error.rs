//! Error types for the batch middleware contract.

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only the owner can perform this action")]
    Unauthorized,

    #[error("Ownership already transferred; it cannot be changed again")]
    OwnershipLocked,

    #[error("Malformed batch: {reason}")]
    MalformedBatch { reason: String },
}
