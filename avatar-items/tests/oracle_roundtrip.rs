use cosmwasm_schema::cw_serde;
use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{
    coins, to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdResult, Uint128, WasmMsg,
};
use cw_multi_test::{App, ContractWrapper, Executor};
use cw_storage_plus::Map;

use avatar_items::error::ContractError;
use avatar_items::msg::{BalanceResponse, ExecuteMsg, InstantiateMsg, QueryMsg, WaitingResponse};
use avatar_items::state::Category;

const FEE_DENOM: &str = "uvrf";
const FEE: u128 = 25;

/// Stand-in randomness oracle: records who asked for which request id and,
/// on `Deliver`, calls the requester back with the supplied values.
mod mock_oracle {
    use super::*;

    const REQUESTS: Map<u64, Addr> = Map::new("requests");

    #[cw_serde]
    pub enum OracleMsg {
        RequestRandomness { request_id: u64, num_values: u32 },
        Deliver {
            request_id: u64,
            random_values: Vec<Uint128>,
        },
    }

    pub fn instantiate(
        _deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        _msg: Empty,
    ) -> StdResult<Response> {
        Ok(Response::new())
    }

    pub fn execute(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        msg: OracleMsg,
    ) -> StdResult<Response> {
        match msg {
            OracleMsg::RequestRandomness { request_id, .. } => {
                REQUESTS.save(deps.storage, request_id, &info.sender)?;
                Ok(Response::new().add_attribute("action", "request_randomness"))
            }
            // the request is kept, so a replayed delivery reaches the consumer again
            OracleMsg::Deliver {
                request_id,
                random_values,
            } => {
                let consumer = REQUESTS.load(deps.storage, request_id)?;
                let callback = WasmMsg::Execute {
                    contract_addr: consumer.to_string(),
                    msg: to_json_binary(&ExecuteMsg::FulfillRandomness {
                        request_id,
                        random_values,
                    })?,
                    funds: vec![],
                };
                Ok(Response::new().add_message(callback))
            }
        }
    }

    pub fn query(_deps: Deps, _env: Env, _msg: Empty) -> StdResult<Binary> {
        to_json_binary(&Empty {})
    }
}

use mock_oracle::OracleMsg;

/// Contract error rendered through the multi-test error chain.
type Outcome = Result<(), String>;

struct Suite {
    app: App,
    owner: Addr,
    buyer: Addr,
    oracle: Addr,
    items: Addr,
}

fn suite() -> Suite {
    let api = MockApi::default();
    let owner = api.addr_make("owner");
    let buyer = api.addr_make("buyer");
    let mut app = App::new(|router, _api, storage| {
        router
            .bank
            .init_balance(storage, &owner, coins(1_000, FEE_DENOM))
            .unwrap();
    });

    let oracle_code = app.store_code(Box::new(ContractWrapper::new(
        mock_oracle::execute,
        mock_oracle::instantiate,
        mock_oracle::query,
    )));
    let items_code = app.store_code(Box::new(ContractWrapper::new(
        avatar_items::contract::execute,
        avatar_items::contract::instantiate,
        avatar_items::contract::query,
    )));

    let oracle = app
        .instantiate_contract(oracle_code, owner.clone(), &Empty {}, &[], "oracle", None)
        .unwrap();
    // the owner pre-funds the randomness budget
    let items = app
        .instantiate_contract(
            items_code,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                oracle: oracle.to_string(),
                pack_price: Uint128::new(10),
                randomness_fee: coins(FEE, FEE_DENOM),
                authorized: vec![owner.to_string()],
            },
            &coins(100, FEE_DENOM),
            "avatar-items",
            None,
        )
        .unwrap();

    let mut suite = Suite {
        app,
        owner,
        buyer,
        oracle,
        items,
    };

    let catalog = [
        (Category::Skin, "blue skin"),
        (Category::UpperBody, "red Shirt"),
        (Category::LowerBody, "yellow Pants"),
        (Category::Shoes, "purple Shoes"),
        (Category::Accessories, "chain"),
    ];
    for (category, name) in catalog {
        suite.exec_owner(&ExecuteMsg::AddItem {
            category,
            name: name.to_string(),
            supply: 1000,
        });
    }
    suite.exec_owner(&ExecuteMsg::EarnRewards {
        recipient: suite.buyer.to_string(),
        amount: Uint128::new(20),
    });
    suite
}

impl Suite {
    fn exec_owner(&mut self, msg: &ExecuteMsg) {
        self.app
            .execute_contract(self.owner.clone(), self.items.clone(), msg, &[])
            .unwrap();
    }

    fn buy_pack(&mut self) -> Outcome {
        self.app
            .execute_contract(self.buyer.clone(), self.items.clone(), &ExecuteMsg::BuyPack { account: None }, &[])
            .map(|_| ())
            .map_err(|err| err.root_cause().to_string())
    }

    fn deliver(&mut self, request_id: u64) -> Outcome {
        self.app
            .execute_contract(
                self.owner.clone(),
                self.oracle.clone(),
                &OracleMsg::Deliver {
                    request_id,
                    random_values: (1..=5u128).map(Uint128::new).collect(),
                },
                &[],
            )
            .map(|_| ())
            .map_err(|err| err.root_cause().to_string())
    }

    fn waiting(&self) -> WaitingResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                self.items.to_string(),
                &QueryMsg::WaitingForResponse {
                    address: self.buyer.to_string(),
                },
            )
            .unwrap()
    }

    fn balance(&self, item_id: u64) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                self.items.to_string(),
                &QueryMsg::Balance {
                    address: self.buyer.to_string(),
                    item_id,
                },
            )
            .unwrap();
        res.balance
    }
}

#[test]
fn pack_round_trip_through_oracle() {
    let mut suite = suite();

    suite.buy_pack().unwrap();
    let state = suite.waiting();
    assert!(state.waiting);
    assert_eq!(state.request_id, Some(1));
    assert_eq!(suite.balance(0), Uint128::new(10));

    // the request carried the configured fee to the oracle
    let paid = suite.app.wrap().query_balance(&suite.oracle, FEE_DENOM).unwrap();
    assert_eq!(paid.amount, Uint128::new(FEE));

    suite.deliver(1).unwrap();
    assert!(!suite.waiting().waiting);
    for item_id in 1..=5 {
        assert_eq!(suite.balance(item_id), Uint128::one());
    }
}

#[test]
fn replayed_delivery_is_rejected() {
    let mut suite = suite();
    suite.buy_pack().unwrap();
    suite.deliver(1).unwrap();

    let err = suite.deliver(1).unwrap_err();
    assert_eq!(err, ContractError::UnknownRequest { request_id: 1 }.to_string());
    for item_id in 1..=5 {
        assert_eq!(suite.balance(item_id), Uint128::one());
    }
}

#[test]
fn second_purchase_waits_for_callback() {
    let mut suite = suite();
    suite.buy_pack().unwrap();

    let err = suite.buy_pack().unwrap_err();
    assert_eq!(err, ContractError::PurchasePending { request_id: 1 }.to_string());

    suite.deliver(1).unwrap();
    suite.buy_pack().unwrap();
    assert_eq!(suite.waiting().request_id, Some(2));
    assert_eq!(suite.balance(0), Uint128::zero());
}

#[test]
fn direct_fulfillment_by_non_oracle_fails() {
    let mut suite = suite();
    suite.buy_pack().unwrap();

    let err = suite
        .app
        .execute_contract(
            suite.buyer.clone(),
            suite.items.clone(),
            &ExecuteMsg::FulfillRandomness {
                request_id: 1,
                random_values: vec![Uint128::zero(); 5],
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        ContractError::Unauthorized {
            role: "randomness oracle".to_string()
        }
        .to_string()
    );
    assert!(suite.waiting().waiting);
}
