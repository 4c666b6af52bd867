//! Batch middleware: one-shot ownership and fan-out batches driven through
//! a quorum-authorized logic call.

mod suite;

use cosmwasm_std::{to_json_binary, Addr, Binary, HexBinary, Uint128};
use cw_multi_test::{App, Executor};

use batch_middleware::msg::{ExecuteMsg, InstantiateMsg, OwnerResponse, QueryMsg};
use batch_middleware::ContractError;
use bridge::msg::ExecuteMsg as BridgeExecuteMsg;
use common::LogicCallArgs;

use suite::{contract_middleware, identities, powers, setup, sign_all, CounterExecuteMsg};

fn ping() -> Binary {
    to_json_binary(&CounterExecuteMsg::Ping {}).unwrap()
}

#[test]
fn ownership_transfers_exactly_once() {
    let mut app = App::default();
    let deployer = Addr::unchecked("terra1deployer");
    let outsider = Addr::unchecked("terra1outsider");
    let successor = Addr::unchecked("terra1successor");

    let code_id = app.store_code(contract_middleware());
    let middleware = app
        .instantiate_contract(
            code_id,
            deployer.clone(),
            &InstantiateMsg {},
            &[],
            "batch-middleware",
            None,
        )
        .unwrap();

    // Deployer starts as owner.
    let owner: OwnerResponse = app
        .wrap()
        .query_wasm_smart(&middleware, &QueryMsg::Owner {})
        .unwrap();
    assert_eq!(owner.owner, deployer);
    assert!(!owner.transferred);

    // Only the owner can hand over.
    let err: ContractError = app
        .execute_contract(
            outsider.clone(),
            middleware.clone(),
            &ExecuteMsg::TransferOwnership {
                new_owner: outsider.to_string(),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Unauthorized);

    app.execute_contract(
        deployer.clone(),
        middleware.clone(),
        &ExecuteMsg::TransferOwnership {
            new_owner: successor.to_string(),
        },
        &[],
    )
    .unwrap();

    let owner: OwnerResponse = app
        .wrap()
        .query_wasm_smart(&middleware, &QueryMsg::Owner {})
        .unwrap();
    assert_eq!(owner.owner, successor);
    assert!(owner.transferred);

    // Even the new owner cannot transfer again.
    let err: ContractError = app
        .execute_contract(
            successor.clone(),
            middleware.clone(),
            &ExecuteMsg::TransferOwnership {
                new_owner: deployer.to_string(),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::OwnershipLocked);
}

#[test]
fn batch_requires_owner_and_parallel_arrays() {
    let mut app = App::default();
    let deployer = Addr::unchecked("terra1deployer");
    let outsider = Addr::unchecked("terra1outsider");

    let code_id = app.store_code(contract_middleware());
    let middleware = app
        .instantiate_contract(
            code_id,
            deployer.clone(),
            &InstantiateMsg {},
            &[],
            "batch-middleware",
            None,
        )
        .unwrap();

    let err: ContractError = app
        .execute_contract(
            outsider,
            middleware.clone(),
            &ExecuteMsg::LogicBatch {
                amounts: vec![Uint128::new(5)],
                payloads: vec![ping()],
                target_contract: "terra1target".to_string(),
                token_contract: "terra1token".to_string(),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Unauthorized);

    let err: ContractError = app
        .execute_contract(
            deployer,
            middleware,
            &ExecuteMsg::LogicBatch {
                amounts: vec![Uint128::new(5), Uint128::new(5)],
                payloads: vec![ping()],
                target_contract: "terra1target".to_string(),
                token_contract: "terra1token".to_string(),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert!(matches!(err, ContractError::MalformedBatch { .. }));
}

/// End-to-end: a logic call funds the middleware with 50 units plus a
/// 10-unit fee, and the middleware fans out ten 5-unit sub-calls.
#[test]
fn bridge_drives_ten_call_batch() {
    let mut suite = setup(&[2000, 2000, 2000, 2000, 2000]);
    let token = suite.deploy_cw20(1_000_000);
    let counter = suite.deploy_counter();
    let middleware = suite.deploy_middleware();

    let batch = ExecuteMsg::LogicBatch {
        amounts: vec![Uint128::new(5); 10],
        payloads: vec![ping(); 10],
        target_contract: counter.to_string(),
        token_contract: token.to_string(),
    };
    let call = LogicCallArgs {
        transfer_amounts: vec![Uint128::new(50)],
        transfer_token_contracts: vec![token.to_string()],
        fee_amounts: vec![Uint128::new(10)],
        fee_token_contracts: vec![token.to_string()],
        logic_contract_address: middleware.to_string(),
        payload: to_json_binary(&batch).unwrap(),
        time_out: suite.block_time() + 600,
        invalidation_id: HexBinary::from([7u8; 32].to_vec()),
        invalidation_nonce: 1,
    };

    let digest = suite.logic_call_digest(&call);
    let signatures = sign_all(&suite.validators, &digest);
    let msg = BridgeExecuteMsg::SubmitLogicCall {
        validators: identities(&suite.validators),
        powers: powers(&suite.validators),
        valset_nonce: 0,
        signatures,
        call,
    };
    suite
        .app
        .execute_contract(suite.relayer.clone(), suite.bridge.clone(), &msg, &[])
        .unwrap();

    assert_eq!(suite.counter_count(&counter), 10);
    assert_eq!(suite.cw20_balance(&token, &counter), 50);
    assert_eq!(suite.cw20_balance(&token, &middleware), 0);
    assert_eq!(suite.cw20_balance(&token, &suite.relayer), 10);
    assert_eq!(suite.cw20_balance(&token, &suite.bridge), 1_000_000 - 60);
}

/// One failing sub-call reverts the whole batch, while the outer bridge
/// keeps its nonce consumption and the middleware funding transfer.
#[test]
fn failing_sub_call_aborts_whole_batch() {
    let mut suite = setup(&[2000, 2000, 2000, 2000, 2000]);
    let token = suite.deploy_cw20(1_000_000);
    let counter = suite.deploy_counter();
    let middleware = suite.deploy_middleware();

    let mut payloads = vec![ping(); 10];
    payloads[5] = to_json_binary(&CounterExecuteMsg::Fail {}).unwrap();
    let batch = ExecuteMsg::LogicBatch {
        amounts: vec![Uint128::new(5); 10],
        payloads,
        target_contract: counter.to_string(),
        token_contract: token.to_string(),
    };
    let call = LogicCallArgs {
        transfer_amounts: vec![Uint128::new(50)],
        transfer_token_contracts: vec![token.to_string()],
        fee_amounts: vec![Uint128::new(10)],
        fee_token_contracts: vec![token.to_string()],
        logic_contract_address: middleware.to_string(),
        payload: to_json_binary(&batch).unwrap(),
        time_out: suite.block_time() + 600,
        invalidation_id: HexBinary::from([7u8; 32].to_vec()),
        invalidation_nonce: 1,
    };

    let digest = suite.logic_call_digest(&call);
    let signatures = sign_all(&suite.validators, &digest);
    let msg = BridgeExecuteMsg::SubmitLogicCall {
        validators: identities(&suite.validators),
        powers: powers(&suite.validators),
        valset_nonce: 0,
        signatures,
        call,
    };
    let res = suite
        .app
        .execute_contract(suite.relayer.clone(), suite.bridge.clone(), &msg, &[])
        .unwrap();
    assert!(res.events.iter().any(|event| {
        event
            .attributes
            .iter()
            .any(|attr| attr.value == "logic_call_target_failed")
    }));

    // The first five sub-transfers were rolled back with the batch; the
    // funding transfer and relayer fee are outside the contained failure.
    assert_eq!(suite.counter_count(&counter), 0);
    assert_eq!(suite.cw20_balance(&token, &counter), 0);
    assert_eq!(suite.cw20_balance(&token, &middleware), 50);
    assert_eq!(suite.cw20_balance(&token, &suite.relayer), 10);
}
