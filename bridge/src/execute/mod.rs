//! Execute handlers for the Threshold Bridge contract.
//!
//! - `valset` - validator-set checkpoint updates
//! - `logic_call` - quorum-authorized logic call execution
//! - `admin` - pause, unpause and admin transfer

mod admin;
mod logic_call;
mod valset;

pub use admin::*;
pub use logic_call::*;
pub use valset::*;

use cosmwasm_std::{HexBinary, Storage};

use crate::error::ContractError;
use crate::hash::{checkpoint_digest, EthAddress};
use crate::state::CHECKPOINT;

/// Parse a 20-byte validator identity.
pub(crate) fn parse_identity(identity: &HexBinary) -> Result<EthAddress, ContractError> {
    identity
        .to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidLength {
            expected: 20,
            got: identity.len(),
        })
}

/// Parse a 32-byte value (bridge id, invalidation id).
pub(crate) fn parse_bytes32(value: &HexBinary) -> Result<[u8; 32], ContractError> {
    value
        .to_vec()
        .try_into()
        .map_err(|_| ContractError::InvalidLength {
            expected: 32,
            got: value.len(),
        })
}

/// A validator set parsed from parallel message arrays.
pub(crate) struct ParsedValset {
    pub identities: Vec<EthAddress>,
    pub powers: Vec<u64>,
    pub nonce: u64,
}

/// Parse the submitted current set: identities decode and the arrays are
/// parallel. Content validation (uniqueness, non-zero power) happened when
/// the set was approved; the checkpoint comparison binds us to exactly that
/// approved content.
pub(crate) fn parse_current_set(
    validators: &[HexBinary],
    powers: &[u64],
    nonce: u64,
) -> Result<ParsedValset, ContractError> {
    if validators.len() != powers.len() {
        return Err(ContractError::MalformedValidatorSet {
            reason: format!(
                "validators/powers length mismatch: {} vs {}",
                validators.len(),
                powers.len()
            ),
        });
    }

    let identities = validators
        .iter()
        .map(parse_identity)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedValset {
        identities,
        powers: powers.to_vec(),
        nonce,
    })
}

/// Fully validate a set about to become the checkpoint: parallel, non-empty,
/// unique identities, non-zero total power.
pub(crate) fn validate_new_set(
    validators: &[HexBinary],
    powers: &[u64],
    nonce: u64,
) -> Result<ParsedValset, ContractError> {
    let set = parse_current_set(validators, powers, nonce)?;

    if set.identities.is_empty() {
        return Err(ContractError::MalformedValidatorSet {
            reason: "validator set is empty".to_string(),
        });
    }

    let mut seen = set.identities.clone();
    seen.sort_unstable();
    if seen.windows(2).any(|pair| pair[0] == pair[1]) {
        return Err(ContractError::MalformedValidatorSet {
            reason: "duplicate validator identity".to_string(),
        });
    }

    if set.powers.iter().all(|p| *p == 0) {
        return Err(ContractError::MalformedValidatorSet {
            reason: "total power is zero".to_string(),
        });
    }

    Ok(set)
}

/// Require that a submitted set re-hashes to the stored checkpoint.
pub(crate) fn require_stored_checkpoint(
    storage: &dyn Storage,
    bridge_id: &[u8; 32],
    set: &ParsedValset,
) -> Result<(), ContractError> {
    let stored = CHECKPOINT.load(storage)?;
    let computed = checkpoint_digest(bridge_id, set.nonce, &set.identities, &set.powers);
    if computed != stored {
        return Err(ContractError::InvalidValidatorSet);
    }
    Ok(())
}

/// Require that the signature slots align 1:1 with the validator array.
pub(crate) fn require_signature_alignment(
    set: &ParsedValset,
    signatures: &[Option<common::Signature>],
) -> Result<(), ContractError> {
    if signatures.len() != set.identities.len() {
        return Err(ContractError::MalformedValidatorSet {
            reason: format!(
                "signatures/validators length mismatch: {} vs {}",
                signatures.len(),
                set.identities.len()
            ),
        });
    }
    Ok(())
}
