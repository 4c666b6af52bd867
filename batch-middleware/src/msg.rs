//! Message types for the batch middleware contract.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

/// Instantiate message. The deployer becomes the initial owner and is
/// expected to hand the contract to the bridge via `TransferOwnership`.
#[cw_serde]
pub struct InstantiateMsg {}

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    /// One-time ownership handover (deployer → bridge). Rejected once used.
    TransferOwnership {
        /// The new (final) owner
        new_owner: String,
    },

    /// Run an ordered batch of transfer-then-invoke steps.
    ///
    /// Authorization: owner only. For each index i, `amounts[i]` of
    /// `token_contract` is transferred to `target_contract`, which is then
    /// invoked with `payloads[i]`. Any failing sub-call reverts the whole
    /// batch.
    LogicBatch {
        /// Amount transferred ahead of each sub-call (parallel with
        /// `payloads`)
        amounts: Vec<Uint128>,
        /// Opaque execute messages for the target (parallel with `amounts`)
        payloads: Vec<Binary>,
        /// The contract every sub-call targets
        target_contract: String,
        /// The CW20 token funding the sub-calls
        token_contract: String,
    },
}

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the current owner and whether ownership is locked
    #[returns(OwnerResponse)]
    Owner {},
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
    pub transferred: bool,
}
