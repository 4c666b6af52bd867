//! Wire types for threshold-signed bridge submissions.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, HexBinary, Uint128};

/// A recoverable secp256k1 signature over a bridge digest.
///
/// `v` is accepted as either 0/1 or the Ethereum-style 27/28; `r` and `s`
/// are each exactly 32 bytes. A validator that did not endorse a call is
/// represented by `None` in the signature array, not by a zeroed signature.
#[cw_serde]
pub struct Signature {
    /// Recovery id (0/1 or 27/28)
    pub v: u8,
    /// Signature r component (32 bytes)
    pub r: HexBinary,
    /// Signature s component (32 bytes)
    pub s: HexBinary,
}

/// Arguments describing one authorized logic call.
///
/// The `transfer_*` and `fee_*` arrays are parallel: index i of the amount
/// array pairs with index i of the token-contract array. `payload` is opaque
/// to the bridge and handed verbatim to the logic contract.
#[cw_serde]
pub struct LogicCallArgs {
    /// Amounts moved from bridge custody to the logic contract
    pub transfer_amounts: Vec<Uint128>,
    /// CW20 contracts for the transfer amounts (parallel array)
    pub transfer_token_contracts: Vec<String>,
    /// Amounts paid to the submitting relayer
    pub fee_amounts: Vec<Uint128>,
    /// CW20 contracts for the fee amounts (parallel array)
    pub fee_token_contracts: Vec<String>,
    /// The contract invoked with `payload`
    pub logic_contract_address: String,
    /// Opaque execute message for the logic contract
    pub payload: Binary,
    /// Absolute block-time deadline in seconds
    pub time_out: u64,
    /// Replay-protection scope key (32 bytes)
    pub invalidation_id: HexBinary,
    /// Monotonic counter within the invalidation scope
    pub invalidation_nonce: u64,
}

/// A validated (token, amount) pair.
///
/// The external call surface keeps parallel arrays for digest compatibility;
/// handlers zip them into this record at the message boundary so length
/// mismatches are caught once, up front.
#[cw_serde]
pub struct TokenAmount {
    /// CW20 token contract
    pub token: Addr,
    /// Amount in the token's smallest unit
    pub amount: Uint128,
}
