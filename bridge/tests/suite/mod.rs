//! Shared test harness: signing validators, a bridge/cw20/middleware app
//! setup, and a tiny counter contract used as the logic-call target.
#![allow(dead_code)]

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, DepsMut, Empty, Env, HexBinary, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw20::{BalanceResponse, Cw20Coin, Cw20QueryMsg};
use cw_multi_test::{
    no_init, App, AppBuilder, BankKeeper, Contract, ContractWrapper, Executor,
    MockAddressGenerator, MockApiBech32, WasmKeeper,
};
use cw_storage_plus::Item;
use k256::ecdsa::SigningKey;

use bridge::msg::{DigestResponse, InstantiateMsg, QueryMsg};
use bridge::{eth_signed_message_hash, keccak256, EthAddress};
use common::{LogicCallArgs, Signature};

// ============================================================================
// Signing validators
// ============================================================================

pub struct Validator {
    pub key: SigningKey,
    pub power: u64,
}

impl Validator {
    pub fn address(&self) -> EthAddress {
        let point = self.key.verifying_key().to_encoded_point(false);
        let hash = keccak256(&point.as_bytes()[1..]);
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hash[12..]);
        addr
    }

    pub fn address_hex(&self) -> HexBinary {
        HexBinary::from(self.address().to_vec())
    }

    pub fn sign(&self, digest: &[u8; 32]) -> Signature {
        let message_hash = eth_signed_message_hash(digest);
        let (sig, recid) = self.key.sign_prehash_recoverable(&message_hash).unwrap();
        let bytes = sig.to_bytes();
        Signature {
            v: recid.to_byte(),
            r: HexBinary::from(bytes[..32].to_vec()),
            s: HexBinary::from(bytes[32..].to_vec()),
        }
    }
}

/// Deterministic validator keys, one per power entry.
pub fn make_validators(powers: &[u64]) -> Vec<Validator> {
    powers
        .iter()
        .enumerate()
        .map(|(i, power)| {
            let mut seed = [0u8; 32];
            seed[31] = (i + 1) as u8;
            Validator {
                key: SigningKey::from_slice(&seed).unwrap(),
                power: *power,
            }
        })
        .collect()
}

pub fn identities(validators: &[Validator]) -> Vec<HexBinary> {
    validators.iter().map(|v| v.address_hex()).collect()
}

pub fn powers(validators: &[Validator]) -> Vec<u64> {
    validators.iter().map(|v| v.power).collect()
}

/// Every validator signs the digest.
pub fn sign_all(validators: &[Validator], digest: &[u8; 32]) -> Vec<Option<Signature>> {
    validators.iter().map(|v| Some(v.sign(digest))).collect()
}

// ============================================================================
// Counter contract (logic-call target)
// ============================================================================

#[cw_serde]
pub enum CounterExecuteMsg {
    /// Increment the counter
    Ping {},
    /// Always fails (exercises target-failure containment)
    Fail {},
}

#[cw_serde]
pub enum CounterQueryMsg {
    Count {},
}

const COUNT: Item<u64> = Item::new("count");

fn counter_instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> Result<Response, StdError> {
    COUNT.save(deps.storage, &0)?;
    Ok(Response::new())
}

fn counter_execute(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: CounterExecuteMsg,
) -> Result<Response, StdError> {
    match msg {
        CounterExecuteMsg::Ping {} => {
            let count = COUNT.load(deps.storage)? + 1;
            COUNT.save(deps.storage, &count)?;
            Ok(Response::new().add_attribute("count", count.to_string()))
        }
        CounterExecuteMsg::Fail {} => Err(StdError::generic_err("counter: forced failure")),
    }
}

fn counter_query(deps: cosmwasm_std::Deps, _env: Env, msg: CounterQueryMsg) -> StdResult<Binary> {
    match msg {
        CounterQueryMsg::Count {} => to_json_binary(&COUNT.load(deps.storage)?),
    }
}

// ============================================================================
// Contract wrappers
// ============================================================================

pub fn contract_bridge() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        bridge::contract::execute,
        bridge::contract::instantiate,
        bridge::contract::query,
    )
    .with_reply(bridge::contract::reply);
    Box::new(contract)
}

pub fn contract_middleware() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        batch_middleware::contract::execute,
        batch_middleware::contract::instantiate,
        batch_middleware::contract::query,
    );
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

pub fn contract_counter() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(counter_execute, counter_instantiate, counter_query);
    Box::new(contract)
}

// ============================================================================
// Suite setup
// ============================================================================

pub const THRESHOLD_BPS: u64 = 6666;

/// Multi-test app with a bech32 API so canonical addresses fit in 32 bytes.
pub type BridgeApp = App<BankKeeper, MockApiBech32>;

pub struct Suite {
    pub app: BridgeApp,
    pub admin: Addr,
    pub relayer: Addr,
    pub bridge: Addr,
    pub validators: Vec<Validator>,
}

/// Instantiate the bridge with deterministic validators for `powers`.
pub fn setup(validator_powers: &[u64]) -> Suite {
    let mut app = AppBuilder::default()
        .with_api(MockApiBech32::new("terra"))
        .with_wasm(WasmKeeper::default().with_address_generator(MockAddressGenerator))
        .build(no_init);
    let admin = app.api().addr_make("admin");
    let relayer = app.api().addr_make("relayer");

    let validators = make_validators(validator_powers);

    let code_id = app.store_code(contract_bridge());
    let bridge = app
        .instantiate_contract(
            code_id,
            admin.clone(),
            &InstantiateMsg {
                admin: admin.to_string(),
                bridge_id: HexBinary::from(keccak256(b"test-bridge").to_vec()),
                power_threshold_bps: THRESHOLD_BPS,
                validators: identities(&validators),
                powers: powers(&validators),
            },
            &[],
            "threshold-bridge",
            Some(admin.to_string()),
        )
        .unwrap();

    Suite {
        app,
        admin,
        relayer,
        bridge,
        validators,
    }
}

impl Suite {
    /// Ask the contract for the checkpoint digest of a validator set.
    pub fn checkpoint_digest(
        &self,
        validators: &[Validator],
        valset_nonce: u64,
    ) -> [u8; 32] {
        let resp: DigestResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::ComputeCheckpoint {
                    validators: identities(validators),
                    powers: powers(validators),
                    valset_nonce,
                },
            )
            .unwrap();
        resp.digest.to_array().unwrap()
    }

    /// Ask the contract for the digest authorizing `call`.
    pub fn logic_call_digest(&self, call: &LogicCallArgs) -> [u8; 32] {
        let resp: DigestResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.bridge,
                &QueryMsg::ComputeLogicCallDigest { call: call.clone() },
            )
            .unwrap();
        resp.digest.to_array().unwrap()
    }

    /// Deploy a cw20 with the full supply held by the bridge (its custody).
    pub fn deploy_cw20(&mut self, supply: u128) -> Addr {
        let code_id = self.app.store_code(contract_cw20());
        self.app
            .instantiate_contract(
                code_id,
                self.admin.clone(),
                &cw20_base::msg::InstantiateMsg {
                    name: "Test Token".to_string(),
                    symbol: "TEST".to_string(),
                    decimals: 6,
                    initial_balances: vec![Cw20Coin {
                        address: self.bridge.to_string(),
                        amount: Uint128::new(supply),
                    }],
                    mint: None,
                    marketing: None,
                },
                &[],
                "test-token",
                None,
            )
            .unwrap()
    }

    pub fn deploy_counter(&mut self) -> Addr {
        let code_id = self.app.store_code(contract_counter());
        self.app
            .instantiate_contract(
                code_id,
                self.admin.clone(),
                &Empty {},
                &[],
                "counter",
                None,
            )
            .unwrap()
    }

    /// Deploy the middleware and hand ownership to the bridge.
    pub fn deploy_middleware(&mut self) -> Addr {
        let code_id = self.app.store_code(contract_middleware());
        let middleware = self
            .app
            .instantiate_contract(
                code_id,
                self.admin.clone(),
                &batch_middleware::msg::InstantiateMsg {},
                &[],
                "batch-middleware",
                None,
            )
            .unwrap();
        self.app
            .execute_contract(
                self.admin.clone(),
                middleware.clone(),
                &batch_middleware::msg::ExecuteMsg::TransferOwnership {
                    new_owner: self.bridge.to_string(),
                },
                &[],
            )
            .unwrap();
        middleware
    }

    pub fn cw20_balance(&self, token: &Addr, account: &Addr) -> u128 {
        let resp: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: account.to_string(),
                },
            )
            .unwrap();
        resp.balance.u128()
    }

    pub fn counter_count(&self, counter: &Addr) -> u64 {
        self.app
            .wrap()
            .query_wasm_smart(counter, &CounterQueryMsg::Count {})
            .unwrap()
    }

    pub fn block_time(&self) -> u64 {
        self.app.block_info().time.seconds()
    }
}
