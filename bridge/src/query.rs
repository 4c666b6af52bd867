//! Query message handlers.

use cosmwasm_std::{Deps, HexBinary, StdError, StdResult};

use common::LogicCallArgs;

use crate::execute::compute_logic_call_digest;
use crate::hash::checkpoint_digest;
use crate::msg::{
    CheckpointResponse, ConfigResponse, DigestResponse, InvalidationNonceResponse,
    PendingAdminResponse,
};
use crate::state::{CHECKPOINT, CONFIG, INVALIDATION_NONCES, PENDING_ADMIN, VALSET_NONCE};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        bridge_id: HexBinary::from(config.bridge_id.to_vec()),
        power_threshold_bps: config.power_threshold_bps,
        paused: config.paused,
    })
}

pub fn query_checkpoint(deps: Deps) -> StdResult<CheckpointResponse> {
    let checkpoint = CHECKPOINT.load(deps.storage)?;
    let valset_nonce = VALSET_NONCE.load(deps.storage)?;
    Ok(CheckpointResponse {
        checkpoint: HexBinary::from(checkpoint.to_vec()),
        valset_nonce,
    })
}

pub fn query_invalidation_nonce(
    deps: Deps,
    invalidation_id: HexBinary,
) -> StdResult<InvalidationNonceResponse> {
    if invalidation_id.len() != 32 {
        return Err(StdError::generic_err(format!(
            "invalidation id must be 32 bytes, got {}",
            invalidation_id.len()
        )));
    }
    let nonce = INVALIDATION_NONCES
        .may_load(deps.storage, invalidation_id.as_slice())?
        .unwrap_or(0);
    Ok(InvalidationNonceResponse {
        invalidation_id,
        nonce,
    })
}

pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_address: p.new_address,
        execute_after: p.execute_after,
    }))
}

pub fn query_compute_checkpoint(
    deps: Deps,
    validators: Vec<HexBinary>,
    powers: Vec<u64>,
    valset_nonce: u64,
) -> StdResult<DigestResponse> {
    let config = CONFIG.load(deps.storage)?;
    let set = crate::execute::parse_current_set(&validators, &powers, valset_nonce)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    let digest = checkpoint_digest(&config.bridge_id, set.nonce, &set.identities, &set.powers);
    Ok(DigestResponse {
        digest: HexBinary::from(digest.to_vec()),
    })
}

pub fn query_compute_logic_call_digest(
    deps: Deps,
    call: LogicCallArgs,
) -> StdResult<DigestResponse> {
    let config = CONFIG.load(deps.storage)?;
    let digest = compute_logic_call_digest(deps, &config.bridge_id, &call)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(DigestResponse {
        digest: HexBinary::from(digest.to_vec()),
    })
}
