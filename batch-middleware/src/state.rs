//! State definitions for the batch middleware contract.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

/// Ownership record. The privilege chain is a plain capability check:
/// caller identity must equal the stored owner.
#[cw_serde]
pub struct Ownership {
    /// The only address allowed to submit batches
    pub owner: Addr,
    /// Set once `TransferOwnership` has been used; locks further transfers
    pub transferred: bool,
}

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:batch-middleware";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = "1.0.0";

/// Ownership storage
pub const OWNERSHIP: Item<Ownership> = Item::new("ownership");
