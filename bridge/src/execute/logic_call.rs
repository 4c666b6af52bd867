//! Quorum-authorized logic call execution.
//!
//! The engine validates a proposed call against the stored checkpoint, the
//! threshold policy and the invalidation ledger, moves the declared token
//! amounts, then invokes the target exactly once. The target invocation is
//! dispatched with reply-on-error: a reverting target rolls back only its
//! own sub-call, never the consumed invalidation nonce or the transfers
//! committed before it. Replay protection therefore holds even against a
//! misbehaving target.

use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, Deps, DepsMut, Env, HexBinary, MessageInfo, Response, SubMsg,
    Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::{LogicCallArgs, Signature, TokenAmount};

use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, contract_word, logic_call_digest, LogicCallDigestInput};
use crate::state::{CONFIG, INVALIDATION_NONCES, REPLY_LOGIC_CALL};
use crate::verify::check_validator_power;

use super::{parse_bytes32, parse_current_set, require_signature_alignment, require_stored_checkpoint};

/// Execute one quorum-authorized logic call.
pub fn execute_submit_logic_call(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    validators: Vec<HexBinary>,
    powers: Vec<u64>,
    valset_nonce: u64,
    signatures: Vec<Option<Signature>>,
    call: LogicCallArgs,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    // 1. The supplied set must hash to the stored checkpoint.
    let current_set = parse_current_set(&validators, &powers, valset_nonce)?;
    require_signature_alignment(&current_set, &signatures)?;
    require_stored_checkpoint(deps.storage, &config.bridge_id, &current_set)?;

    // 2. Deadline against execution-time clock.
    let now = env.block.time.seconds();
    if call.time_out <= now {
        return Err(ContractError::Expired {
            time_out: call.time_out,
            now,
        });
    }

    // 3. Validate the call shape: parallel arrays become paired records at
    //    this boundary, so length mismatches cannot survive past it.
    let transfers = zip_token_amounts(
        deps.as_ref(),
        &call.transfer_amounts,
        &call.transfer_token_contracts,
        "transfer",
    )?;
    let fees = zip_token_amounts(
        deps.as_ref(),
        &call.fee_amounts,
        &call.fee_token_contracts,
        "fee",
    )?;
    let logic_contract = deps.api.addr_validate(&call.logic_contract_address)?;
    let invalidation_id = parse_bytes32(&call.invalidation_id)?;

    // 4. Recompute the call digest and check signed power against it.
    let digest = compute_call_digest(
        deps.as_ref(),
        &config.bridge_id,
        &call,
        &transfers,
        &fees,
        &logic_contract,
        invalidation_id,
    )?;
    check_validator_power(
        deps.api,
        &digest,
        &current_set.identities,
        &current_set.powers,
        &signatures,
        config.power_threshold_bps,
    )?;

    // 5. Invalidation ledger: strictly increasing per scope, the sole
    //    duplicate-execution defense independent of signatures.
    let consumed = INVALIDATION_NONCES
        .may_load(deps.storage, invalidation_id.as_slice())?
        .unwrap_or(0);
    if call.invalidation_nonce <= consumed {
        return Err(ContractError::Replay {
            invalidation_id: bytes32_to_hex(&invalidation_id),
            submitted: call.invalidation_nonce,
            current: consumed,
        });
    }
    INVALIDATION_NONCES.save(
        deps.storage,
        invalidation_id.as_slice(),
        &call.invalidation_nonce,
    )?;

    // 6. Custody transfers to the logic contract, then relayer fees to the
    //    submitter — both dispatched before the target so it can neither
    //    observe nor interfere with fee settlement.
    let mut messages: Vec<CosmosMsg> = Vec::with_capacity(transfers.len() + fees.len());
    for transfer in &transfers {
        messages.push(cw20_transfer(transfer, &logic_contract)?);
    }
    for fee in &fees {
        messages.push(cw20_transfer(fee, &info.sender)?);
    }

    // 7. Exactly one target invocation, failure-contained via reply.
    let target = SubMsg::reply_on_error(
        WasmMsg::Execute {
            contract_addr: logic_contract.to_string(),
            msg: call.payload.clone(),
            funds: vec![],
        },
        REPLY_LOGIC_CALL,
    );

    Ok(Response::new()
        .add_messages(messages)
        .add_submessage(target)
        .add_attribute("action", "submit_logic_call")
        .add_attribute("digest", bytes32_to_hex(&digest))
        .add_attribute("logic_contract", logic_contract.to_string())
        .add_attribute("invalidation_id", bytes32_to_hex(&invalidation_id))
        .add_attribute("invalidation_nonce", call.invalidation_nonce.to_string())
        .add_attribute("relayer", info.sender.to_string()))
}

/// Query-side digest computation, exposed for relayer tooling.
pub fn compute_logic_call_digest(
    deps: Deps,
    bridge_id: &[u8; 32],
    call: &LogicCallArgs,
) -> Result<[u8; 32], ContractError> {
    let transfers = zip_token_amounts(
        deps,
        &call.transfer_amounts,
        &call.transfer_token_contracts,
        "transfer",
    )?;
    let fees = zip_token_amounts(deps, &call.fee_amounts, &call.fee_token_contracts, "fee")?;
    let logic_contract = deps.api.addr_validate(&call.logic_contract_address)?;
    let invalidation_id = parse_bytes32(&call.invalidation_id)?;

    compute_call_digest(
        deps,
        bridge_id,
        call,
        &transfers,
        &fees,
        &logic_contract,
        invalidation_id,
    )
}

fn compute_call_digest(
    deps: Deps,
    bridge_id: &[u8; 32],
    call: &LogicCallArgs,
    transfers: &[TokenAmount],
    fees: &[TokenAmount],
    logic_contract: &Addr,
    invalidation_id: [u8; 32],
) -> Result<[u8; 32], ContractError> {
    let transfer_amounts: Vec<u128> = transfers.iter().map(|t| t.amount.u128()).collect();
    let fee_amounts: Vec<u128> = fees.iter().map(|t| t.amount.u128()).collect();

    let transfer_tokens = transfers
        .iter()
        .map(|t| contract_word(deps, &t.token))
        .collect::<Result<Vec<_>, _>>()?;
    let fee_tokens = fees
        .iter()
        .map(|t| contract_word(deps, &t.token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(logic_call_digest(
        bridge_id,
        &LogicCallDigestInput {
            transfer_amounts: &transfer_amounts,
            transfer_tokens: &transfer_tokens,
            fee_amounts: &fee_amounts,
            fee_tokens: &fee_tokens,
            logic_contract: contract_word(deps, logic_contract)?,
            payload: call.payload.as_slice(),
            time_out: call.time_out,
            invalidation_id,
            invalidation_nonce: call.invalidation_nonce,
        },
    ))
}

/// Zip parallel amount/token arrays into validated paired records.
fn zip_token_amounts(
    deps: Deps,
    amounts: &[Uint128],
    tokens: &[String],
    kind: &str,
) -> Result<Vec<TokenAmount>, ContractError> {
    if amounts.len() != tokens.len() {
        return Err(ContractError::MalformedCall {
            reason: format!(
                "{kind} amounts/contracts length mismatch: {} vs {}",
                amounts.len(),
                tokens.len()
            ),
        });
    }

    amounts
        .iter()
        .zip(tokens)
        .map(|(amount, token)| {
            let token = deps.api.addr_validate(token)?;
            Ok(TokenAmount {
                token,
                amount: *amount,
            })
        })
        .collect()
}

fn cw20_transfer(pair: &TokenAmount, recipient: &Addr) -> Result<CosmosMsg, ContractError> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: pair.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount: pair.amount,
        })?,
        funds: vec![],
    }))
}
