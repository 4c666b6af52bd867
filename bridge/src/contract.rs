//! Threshold Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdError, StdResult, SubMsgResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_admin, execute_cancel_admin_proposal, execute_pause, execute_propose_admin,
    execute_submit_logic_call, execute_unpause, execute_update_validator_set, parse_bytes32,
    validate_new_set,
};
use crate::hash::{bytes32_to_hex, checkpoint_digest};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_checkpoint, query_compute_checkpoint, query_compute_logic_call_digest, query_config,
    query_invalidation_nonce, query_pending_admin,
};
use crate::state::{
    Config, CHECKPOINT, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, REPLY_LOGIC_CALL,
    THRESHOLD_DENOMINATOR, VALSET_NONCE,
};
use crate::verify::total_power;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let bridge_id = parse_bytes32(&msg.bridge_id)?;

    if msg.power_threshold_bps == 0 || msg.power_threshold_bps > THRESHOLD_DENOMINATOR {
        return Err(ContractError::InvalidThreshold);
    }

    // The initial set is trusted by construction; subsequent sets require a
    // quorum of their predecessor.
    let initial_set = validate_new_set(&msg.validators, &msg.powers, 0)?;
    let checkpoint = checkpoint_digest(
        &bridge_id,
        initial_set.nonce,
        &initial_set.identities,
        &initial_set.powers,
    );

    let config = Config {
        admin,
        bridge_id,
        power_threshold_bps: msg.power_threshold_bps,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;
    CHECKPOINT.save(deps.storage, &checkpoint)?;
    VALSET_NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("checkpoint", bytes32_to_hex(&checkpoint))
        .add_attribute("validator_count", initial_set.identities.len().to_string())
        .add_attribute("total_power", total_power(&initial_set.powers).to_string())
        .add_attribute(
            "power_threshold_bps",
            msg.power_threshold_bps.to_string(),
        ))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::UpdateValidatorSet {
            new_validators,
            new_powers,
            new_valset_nonce,
            current_validators,
            current_powers,
            current_valset_nonce,
            signatures,
        } => execute_update_validator_set(
            deps,
            info,
            new_validators,
            new_powers,
            new_valset_nonce,
            current_validators,
            current_powers,
            current_valset_nonce,
            signatures,
        ),
        ExecuteMsg::SubmitLogicCall {
            validators,
            powers,
            valset_nonce,
            signatures,
            call,
        } => execute_submit_logic_call(
            deps, env, info, validators, powers, valset_nonce, signatures, call,
        ),

        // Admin operations
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ProposeAdmin { new_admin } => execute_propose_admin(deps, env, info, new_admin),
        ExecuteMsg::AcceptAdmin {} => execute_accept_admin(deps, env, info),
        ExecuteMsg::CancelAdminProposal {} => execute_cancel_admin_proposal(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Contain a failed target invocation.
///
/// The logic-call target is dispatched with reply-on-error: reaching this
/// handler with an error means the target's own effects were rolled back,
/// while the invalidation nonce and custody transfers committed in the
/// submitting call stand. Returning Ok here is what makes the containment
/// stick.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != REPLY_LOGIC_CALL {
        return Err(ContractError::Std(StdError::generic_err(format!(
            "unknown reply id: {}",
            msg.id
        ))));
    }

    match msg.result {
        SubMsgResult::Err(err) => Ok(Response::new()
            .add_attribute("action", "logic_call_target_failed")
            .add_attribute("error", err)),
        SubMsgResult::Ok(_) => Ok(Response::new().add_attribute("action", "logic_call_target_ok")),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Checkpoint {} => to_json_binary(&query_checkpoint(deps)?),
        QueryMsg::InvalidationNonce { invalidation_id } => {
            to_json_binary(&query_invalidation_nonce(deps, invalidation_id)?)
        }
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
        QueryMsg::ComputeCheckpoint {
            validators,
            powers,
            valset_nonce,
        } => to_json_binary(&query_compute_checkpoint(
            deps,
            validators,
            powers,
            valset_nonce,
        )?),
        QueryMsg::ComputeLogicCallDigest { call } => {
            to_json_binary(&query_compute_logic_call_digest(deps, call)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
