//! Batch Middleware Contract - Entry Points

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, OwnerResponse, QueryMsg};
use crate::state::{Ownership, CONTRACT_NAME, CONTRACT_VERSION, OWNERSHIP};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let ownership = Ownership {
        owner: info.sender.clone(),
        transferred: false,
    };
    OWNERSHIP.save(deps.storage, &ownership)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", info.sender))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::LogicBatch {
            amounts,
            payloads,
            target_contract,
            token_contract,
        } => execute_logic_batch(deps, info, amounts, payloads, target_contract, token_contract),
    }
}

/// One-time ownership handover. After this the owner is final.
fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let ownership = OWNERSHIP.load(deps.storage)?;
    if info.sender != ownership.owner {
        return Err(ContractError::Unauthorized);
    }
    if ownership.transferred {
        return Err(ContractError::OwnershipLocked);
    }

    let new_owner_addr = deps.api.addr_validate(&new_owner)?;
    OWNERSHIP.save(
        deps.storage,
        &Ownership {
            owner: new_owner_addr.clone(),
            transferred: true,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("new_owner", new_owner_addr))
}

/// Fan one authorized call out into ordered transfer-then-invoke steps.
///
/// Sub-messages are dispatched as plain messages in index order, so the
/// failure of any sub-call reverts the entire batch, including this
/// contract's own state-free execution. The outer bridge contains that
/// failure as a single failed logic call.
fn execute_logic_batch(
    deps: DepsMut,
    info: MessageInfo,
    amounts: Vec<Uint128>,
    payloads: Vec<Binary>,
    target_contract: String,
    token_contract: String,
) -> Result<Response, ContractError> {
    let ownership = OWNERSHIP.load(deps.storage)?;
    if info.sender != ownership.owner {
        return Err(ContractError::Unauthorized);
    }

    if amounts.len() != payloads.len() {
        return Err(ContractError::MalformedBatch {
            reason: format!(
                "amounts/payloads length mismatch: {} vs {}",
                amounts.len(),
                payloads.len()
            ),
        });
    }

    let target = deps.api.addr_validate(&target_contract)?;
    let token = deps.api.addr_validate(&token_contract)?;

    let mut messages: Vec<CosmosMsg> = Vec::with_capacity(amounts.len() * 2);
    for (amount, payload) in amounts.iter().zip(&payloads) {
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: target.to_string(),
                amount: *amount,
            })?,
            funds: vec![],
        }));
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: target.to_string(),
            msg: payload.clone(),
            funds: vec![],
        }));
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "logic_batch")
        .add_attribute("target_contract", target)
        .add_attribute("token_contract", token)
        .add_attribute("batch_size", amounts.len().to_string()))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Owner {} => {
            let ownership = OWNERSHIP.load(deps.storage)?;
            to_json_binary(&OwnerResponse {
                owner: ownership.owner,
                transferred: ownership.transferred,
            })
        }
    }
}
