//! Validator-set checkpoint updates.
//!
//! The outgoing set authorizes its own replacement: signatures from the
//! currently checkpointed validators are checked against the checkpoint
//! digest of the new set. A successful update is final; there is no
//! rollback path.

use cosmwasm_std::{DepsMut, HexBinary, MessageInfo, Response};

use common::Signature;

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, checkpoint_digest};
use crate::state::{CHECKPOINT, CONFIG, VALSET_NONCE};
use crate::verify::{check_validator_power, total_power};

use super::{
    require_signature_alignment, require_stored_checkpoint, validate_new_set, parse_current_set,
};

/// Replace the stored checkpoint with a new validator set.
#[allow(clippy::too_many_arguments)]
pub fn execute_update_validator_set(
    deps: DepsMut,
    _info: MessageInfo,
    new_validators: Vec<HexBinary>,
    new_powers: Vec<u64>,
    new_valset_nonce: u64,
    current_validators: Vec<HexBinary>,
    current_powers: Vec<u64>,
    current_valset_nonce: u64,
    signatures: Vec<Option<Signature>>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    let stored_nonce = VALSET_NONCE.load(deps.storage)?;
    if new_valset_nonce <= stored_nonce {
        return Err(ContractError::StaleValsetNonce {
            current: stored_nonce,
            submitted: new_valset_nonce,
        });
    }

    let new_set = validate_new_set(&new_validators, &new_powers, new_valset_nonce)?;

    let current_set =
        parse_current_set(&current_validators, &current_powers, current_valset_nonce)?;
    require_signature_alignment(&current_set, &signatures)?;
    require_stored_checkpoint(deps.storage, &config.bridge_id, &current_set)?;

    // The digest signed for a set update is the new checkpoint hash itself.
    let new_checkpoint = checkpoint_digest(
        &config.bridge_id,
        new_set.nonce,
        &new_set.identities,
        &new_set.powers,
    );
    check_validator_power(
        deps.api,
        &new_checkpoint,
        &current_set.identities,
        &current_set.powers,
        &signatures,
        config.power_threshold_bps,
    )?;

    CHECKPOINT.save(deps.storage, &new_checkpoint)?;
    VALSET_NONCE.save(deps.storage, &new_valset_nonce)?;

    Ok(Response::new()
        .add_attribute("action", "update_validator_set")
        .add_attribute("valset_nonce", new_valset_nonce.to_string())
        .add_attribute("checkpoint", bytes32_to_hex(&new_checkpoint))
        .add_attribute("validator_count", new_set.identities.len().to_string())
        .add_attribute("total_power", total_power(&new_set.powers).to_string()))
}
