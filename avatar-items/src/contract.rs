use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order, Response,
    StdError, StdResult, Storage, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::catalog;
use crate::error::ContractError;
use crate::helpers::{
    assert_authorized, assert_can_spend, assert_not_paused, assert_oracle, assert_owner,
    reject_funds,
};
use crate::ledger;
use crate::msg::*;
use crate::powerup;
use crate::selection;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:avatar-items";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.pack_price.is_zero() {
        return Err(ContractError::InvalidParameter {
            reason: "pack price must be greater than zero".to_string(),
        });
    }

    let owner = deps.api.addr_validate(&msg.owner)?;
    let oracle = deps.api.addr_validate(&msg.oracle)?;

    let config = Config {
        owner,
        oracle,
        pack_price: msg.pack_price,
        randomness_fee: msg.randomness_fee,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;
    NEXT_ITEM_ID.save(deps.storage, &1u64)?;
    NEXT_REQUEST_ID.save(deps.storage, &1u64)?;

    for address in &msg.authorized {
        let account = deps.api.addr_validate(address)?;
        AUTHORIZED.save(deps.storage, &account, &true)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("owner", config.owner.as_str())
        .add_attribute("oracle", config.oracle.as_str())
        .add_attribute("authorized", msg.authorized.len().to_string()))
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddItem {
            category,
            name,
            supply,
        } => execute_add_item(deps, env, info, category, name, supply),
        ExecuteMsg::AddSupply { item_id, amount } => {
            execute_add_supply(deps, env, info, item_id, amount)
        }
        ExecuteMsg::AddPowerUp {
            name,
            multiplier,
            duration_seconds,
        } => execute_add_power_up(deps, env, info, name, multiplier, duration_seconds),
        ExecuteMsg::Authorize { address } => execute_authorize(deps, env, info, address),
        ExecuteMsg::EarnRewards { recipient, amount } => {
            execute_earn_rewards(deps, env, info, recipient, amount)
        }
        ExecuteMsg::MintPowerUp {
            recipient,
            item_id,
            amount,
        } => execute_mint_power_up(deps, env, info, recipient, item_id, amount),
        ExecuteMsg::ActivatePowerUp { item_id } => {
            execute_activate_power_up(deps, env, info, item_id)
        }
        ExecuteMsg::BuyPack { account } => execute_buy_pack(deps, env, info, account),
        ExecuteMsg::FulfillRandomness {
            request_id,
            random_values,
        } => execute_fulfill_randomness(deps, env, info, request_id, random_values),
        ExecuteMsg::Transfer {
            recipient,
            item_id,
            amount,
        } => execute_transfer(deps, env, info, recipient, item_id, amount),
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            item_id,
            amount,
        } => execute_transfer_from(deps, env, info, owner, recipient, item_id, amount),
        ExecuteMsg::BatchTransfer {
            owner,
            recipient,
            items,
        } => execute_batch_transfer(deps, env, info, owner, recipient, items),
        ExecuteMsg::ApproveAll { operator } => execute_approve_all(deps, env, info, operator),
        ExecuteMsg::RevokeAll { operator } => execute_revoke_all(deps, env, info, operator),
        ExecuteMsg::SetPackPrice { price } => execute_set_pack_price(deps, env, info, price),
        ExecuteMsg::Pause {} => execute_set_paused(deps, info, true),
        ExecuteMsg::Unpause {} => execute_set_paused(deps, info, false),
        ExecuteMsg::ProposeOwner { new_owner } => {
            execute_propose_owner(deps, env, info, new_owner)
        }
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, env, info),
        ExecuteMsg::CancelOwnerTransfer {} => execute_cancel_owner_transfer(deps, env, info),
    }
}

// ─── Execute: Catalog ───────────────────────────────────────────────────────

pub fn execute_add_item(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    category: Category,
    name: String,
    supply: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let item = catalog::add_item(deps.storage, category, name, supply)?;

    Ok(Response::new()
        .add_event(
            Event::new("item_added")
                .add_attribute("item_id", item.id.to_string())
                .add_attribute("category", item.category.to_string())
                .add_attribute("name", &item.name)
                .add_attribute("supply", item.remaining_supply.to_string()),
        )
        .add_attribute("action", "add_item")
        .add_attribute("item_id", item.id.to_string()))
}

pub fn execute_add_supply(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    item_id: u64,
    amount: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let item = catalog::add_supply(deps.storage, item_id, amount)?;

    Ok(Response::new()
        .add_event(
            Event::new("supply_increased")
                .add_attribute("item_id", item_id.to_string())
                .add_attribute("amount", amount.to_string())
                .add_attribute("remaining_supply", item.remaining_supply.to_string()),
        )
        .add_attribute("action", "add_supply")
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("remaining_supply", item.remaining_supply.to_string()))
}

pub fn execute_add_power_up(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    name: String,
    multiplier: u64,
    duration_seconds: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let params = powerup::validate_params(multiplier, duration_seconds)?;
    let item = catalog::add_power_up(deps.storage, name, params)?;

    Ok(Response::new()
        .add_event(
            Event::new("item_added")
                .add_attribute("item_id", item.id.to_string())
                .add_attribute("category", item.category.to_string())
                .add_attribute("name", &item.name)
                .add_attribute("multiplier", multiplier.to_string())
                .add_attribute("duration_seconds", duration_seconds.to_string()),
        )
        .add_attribute("action", "add_power_up")
        .add_attribute("item_id", item.id.to_string()))
}

// ─── Execute: Minting ───────────────────────────────────────────────────────

pub fn execute_authorize(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let account = deps.api.addr_validate(&address)?;
    AUTHORIZED.save(deps.storage, &account, &true)?;

    Ok(Response::new()
        .add_event(Event::new("account_authorized").add_attribute("account", account.as_str()))
        .add_attribute("action", "authorize")
        .add_attribute("account", account.as_str()))
}

pub fn execute_earn_rewards(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_authorized(deps.as_ref(), &info.sender)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let recipient = deps.api.addr_validate(&recipient)?;
    let multiplier = powerup::current_multiplier(deps.storage, &recipient, env.block.time)?;
    let earned = powerup::boosted_amount(amount, multiplier)?;
    let minted = ledger::mint(deps.storage, &recipient, REWARD_ID, earned)?;

    Ok(Response::new()
        .add_event(minted)
        .add_attribute("action", "earn_rewards")
        .add_attribute("recipient", recipient.as_str())
        .add_attribute("base_amount", amount.to_string())
        .add_attribute("multiplier", multiplier.to_string())
        .add_attribute("earned", earned.to_string()))
}

pub fn execute_mint_power_up(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    item_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_authorized(deps.as_ref(), &info.sender)?;

    let item = catalog::describe(deps.storage, item_id)?;
    if item.power_up.is_none() {
        return Err(ContractError::InvalidParameter {
            reason: format!("item {item_id} is not a power-up"),
        });
    }
    let recipient = deps.api.addr_validate(&recipient)?;
    let minted = ledger::mint(deps.storage, &recipient, item_id, amount)?;

    Ok(Response::new()
        .add_event(minted)
        .add_attribute("action", "mint_power_up")
        .add_attribute("recipient", recipient.as_str())
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("amount", amount.to_string()))
}

// ─── Execute: Power-Up Activation ───────────────────────────────────────────

pub fn execute_activate_power_up(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    item_id: u64,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let now = env.block.time;
    let account = info.sender;

    let item = catalog::describe(deps.storage, item_id)?;
    let params = item.power_up.ok_or_else(|| ContractError::InvalidParameter {
        reason: format!("item {item_id} is not a power-up"),
    })?;

    if let Some(window) = POWER_UP_WINDOWS.may_load(deps.storage, &account)? {
        if powerup::is_live(&window, now) {
            return Err(ContractError::AlreadyActive {
                expires_at: window.expires_at.seconds(),
            });
        }
    }

    let burned = ledger::spend(deps.storage, &account, item_id, Uint128::one())?;
    let window = powerup::open_window(item_id, &params, now);
    POWER_UP_WINDOWS.save(deps.storage, &account, &window)?;

    Ok(Response::new()
        .add_event(burned)
        .add_event(
            Event::new("powerup_activated")
                .add_attribute("account", account.as_str())
                .add_attribute("item_id", item_id.to_string())
                .add_attribute("multiplier", window.multiplier.to_string())
                .add_attribute("expires_at", window.expires_at.seconds().to_string()),
        )
        .add_attribute("action", "activate_power_up")
        .add_attribute("account", account.as_str())
        .add_attribute("multiplier", window.multiplier.to_string())
        .add_attribute("expires_at", window.expires_at.seconds().to_string()))
}

// ─── Execute: Pack Purchase ─────────────────────────────────────────────────

pub fn execute_buy_pack(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    account: Option<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let config = CONFIG.load(deps.storage)?;
    let buyer = match account {
        Some(account) => deps.api.addr_validate(&account)?,
        None => info.sender.clone(),
    };
    assert_can_spend(deps.as_ref(), &buyer, &info.sender)?;

    // single flight: one outstanding request per account
    if let Some(request_id) = WAITING.may_load(deps.storage, &buyer)? {
        return Err(ContractError::PurchasePending { request_id });
    }

    let paid = ledger::spend(deps.storage, &buyer, REWARD_ID, config.pack_price)?;

    let request_id = NEXT_REQUEST_ID.load(deps.storage)?;
    let next = request_id.checked_add(1).ok_or(ContractError::Overflow)?;
    NEXT_REQUEST_ID.save(deps.storage, &next)?;
    PENDING_REQUESTS.save(deps.storage, request_id, &buyer)?;
    WAITING.save(deps.storage, &buyer, &request_id)?;

    let request = WasmMsg::Execute {
        contract_addr: config.oracle.to_string(),
        msg: to_json_binary(&OracleExecuteMsg::RequestRandomness {
            request_id,
            num_values: PACK_CATEGORIES.len() as u32,
        })?,
        funds: config.randomness_fee,
    };

    Ok(Response::new()
        .add_message(request)
        .add_event(paid)
        .add_event(
            Event::new("purchase_requested")
                .add_attribute("account", buyer.as_str())
                .add_attribute("request_id", request_id.to_string()),
        )
        .add_attribute("action", "buy_pack")
        .add_attribute("buyer", buyer.as_str())
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("price", config.pack_price.to_string()))
}

pub fn execute_fulfill_randomness(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    request_id: u64,
    random_values: Vec<Uint128>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_oracle(deps.as_ref(), &info.sender)?;

    let buyer = PENDING_REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::UnknownRequest { request_id })?;

    let draw = selection::draw_pack(deps.storage, &buyer, &random_values)?;

    PENDING_REQUESTS.remove(deps.storage, request_id);
    WAITING.remove(deps.storage, &buyer);

    for category in &draw.skipped {
        deps.api.debug(&format!(
            "request {request_id}: no {category} item in stock, slot skipped"
        ));
    }

    let minted = join(draw.minted.iter());
    let skipped = join(draw.skipped.iter());

    Ok(Response::new()
        .add_events(draw.events)
        .add_event(
            Event::new("purchase_fulfilled")
                .add_attribute("account", buyer.as_str())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("minted_items", &minted)
                .add_attribute("skipped_categories", &skipped),
        )
        .add_attribute("action", "fulfill_randomness")
        .add_attribute("buyer", buyer.as_str())
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("minted_items", minted))
}

fn join<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

// ─── Execute: Transfers ─────────────────────────────────────────────────────

pub fn execute_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    item_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let owner = info.sender.to_string();
    execute_transfer_from(deps, env, info, owner, recipient, item_id, amount)
}

pub fn execute_transfer_from(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    owner: String,
    recipient: String,
    item_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let owner = deps.api.addr_validate(&owner)?;
    assert_can_spend(deps.as_ref(), &owner, &info.sender)?;
    let recipient = deps.api.addr_validate(&recipient)?;
    let moved = ledger::transfer(deps.storage, &owner, &recipient, item_id, amount)?;

    Ok(Response::new()
        .add_event(moved)
        .add_attribute("action", "transfer")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("from", owner.as_str())
        .add_attribute("to", recipient.as_str())
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("amount", amount.to_string()))
}

pub fn execute_batch_transfer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    owner: Option<String>,
    recipient: String,
    items: Vec<ItemBalance>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let owner = match owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender.clone(),
    };
    assert_can_spend(deps.as_ref(), &owner, &info.sender)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let legs: Vec<(u64, Uint128)> = items.iter().map(|i| (i.item_id, i.amount)).collect();
    let moved = ledger::transfer_batch(deps.storage, &owner, &recipient, &legs)?;

    Ok(Response::new()
        .add_events(moved)
        .add_attribute("action", "batch_transfer")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("from", owner.as_str())
        .add_attribute("to", recipient.as_str())
        .add_attribute("item_ids", join(items.iter().map(|i| i.item_id))))
}

// ─── Execute: Operators ─────────────────────────────────────────────────────

pub fn execute_approve_all(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let operator = deps.api.addr_validate(&operator)?;
    if operator == info.sender {
        return Err(ContractError::InvalidParameter {
            reason: "an account cannot approve itself as operator".to_string(),
        });
    }
    OPERATORS.save(deps.storage, (&info.sender, &operator), &true)?;

    Ok(operator_response(&info.sender, &operator, true))
}

pub fn execute_revoke_all(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let operator = deps.api.addr_validate(&operator)?;
    OPERATORS.remove(deps.storage, (&info.sender, &operator));

    Ok(operator_response(&info.sender, &operator, false))
}

fn operator_response(owner: &Addr, operator: &Addr, approved: bool) -> Response {
    let action = if approved { "approve_all" } else { "revoke_all" };
    Response::new()
        .add_event(
            Event::new("approval_for_all")
                .add_attribute("owner", owner.as_str())
                .add_attribute("operator", operator.as_str())
                .add_attribute("approved", approved.to_string()),
        )
        .add_attribute("action", action)
        .add_attribute("owner", owner.as_str())
        .add_attribute("operator", operator.as_str())
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

fn update_config(
    storage: &mut dyn Storage,
    change: impl FnOnce(&mut Config),
) -> StdResult<Config> {
    CONFIG.update(storage, |mut config| -> StdResult<_> {
        change(&mut config);
        Ok(config)
    })
}

pub fn execute_set_pack_price(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    price: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    if price.is_zero() {
        return Err(ContractError::InvalidParameter {
            reason: "pack price must be greater than zero".to_string(),
        });
    }
    update_config(deps.storage, |config| config.pack_price = price)?;

    Ok(Response::new()
        .add_attribute("action", "set_pack_price")
        .add_attribute("price", price.to_string()))
}

/// `Pause {}` and `Unpause {}`. Setting the flag to its current value fails.
pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    if CONFIG.load(deps.storage)?.paused == paused {
        return Err(if paused {
            ContractError::Paused
        } else {
            ContractError::NotPaused
        });
    }
    update_config(deps.storage, |config| config.paused = paused)?;

    let action = if paused { "pause" } else { "unpause" };
    Ok(Response::new().add_attribute("action", action))
}

// ─── Ownership Handover ─────────────────────────────────────────────────────

pub fn execute_propose_owner(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    if PENDING_OWNER.exists(deps.storage) {
        return Err(ContractError::OwnerTransferAlreadyPending);
    }
    let proposed_owner = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(
        deps.storage,
        &PendingOwnerTransfer {
            proposed_owner: proposed_owner.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "propose_owner")
        .add_attribute("proposed_owner", proposed_owner.as_str()))
}

pub fn execute_accept_owner(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let PendingOwnerTransfer { proposed_owner } = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoOwnerTransferPending)?;
    if info.sender != proposed_owner {
        return Err(ContractError::NotPendingOwner);
    }
    let previous = CONFIG.load(deps.storage)?.owner;
    update_config(deps.storage, |config| config.owner = proposed_owner.clone())?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_event(
            Event::new("ownership_transferred")
                .add_attribute("previous_owner", previous.as_str())
                .add_attribute("new_owner", proposed_owner.as_str()),
        )
        .add_attribute("action", "accept_owner")
        .add_attribute("new_owner", proposed_owner.as_str()))
}

pub fn execute_cancel_owner_transfer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    if !PENDING_OWNER.exists(deps.storage) {
        return Err(ContractError::NoOwnerTransferPending);
    }
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new().add_attribute("action", "cancel_owner_transfer"))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query_config(deps),
        QueryMsg::Item { item_id } => query_item(deps, item_id),
        QueryMsg::ItemExists { name } => query_item_exists(deps, name),
        QueryMsg::ItemCounter {} => query_item_counter(deps),
        QueryMsg::Items { start_after, limit } => query_items(deps, start_after, limit),
        QueryMsg::Balance { address, item_id } => query_balance(deps, address, item_id),
        QueryMsg::BalanceBatch { address, item_ids } => {
            query_balance_batch(deps, address, item_ids)
        }
        QueryMsg::IsApprovedForAll { owner, operator } => {
            query_is_approved_for_all(deps, owner, operator)
        }
        QueryMsg::Balances {
            address,
            start_after,
            limit,
        } => query_balances(deps, address, start_after, limit),
        QueryMsg::TotalSupply { item_id } => query_total_supply(deps, item_id),
        QueryMsg::WaitingForResponse { address } => query_waiting_for_response(deps, address),
        QueryMsg::PendingRequest { request_id } => query_pending_request(deps, request_id),
        QueryMsg::CurrentMultiplier { address } => query_current_multiplier(deps, env, address),
        QueryMsg::ActivePowerUp { address } => query_active_power_up(deps, env, address),
        QueryMsg::IsAuthorized { address } => query_is_authorized(deps, address),
        QueryMsg::PendingOwner {} => query_pending_owner(deps),
    }
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

pub fn query_item(deps: Deps, item_id: u64) -> StdResult<Binary> {
    let item = catalog::describe(deps.storage, item_id)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&item)
}

pub fn query_item_exists(deps: Deps, name: String) -> StdResult<Binary> {
    to_json_binary(&ItemExistsResponse {
        exists: catalog::exists(deps.storage, &name),
    })
}

pub fn query_item_counter(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&ItemCounterResponse {
        next_item_id: NEXT_ITEM_ID.load(deps.storage)?,
    })
}

pub fn query_items(deps: Deps, start_after: Option<u64>, limit: Option<u32>) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let items = ITEMS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|entry| entry.map(|(_, item)| item))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&ItemsResponse { items })
}

pub fn query_balance(deps: Deps, address: String, item_id: u64) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    to_json_binary(&BalanceResponse {
        balance: ledger::balance_of(deps.storage, &addr, item_id)?,
    })
}

pub fn query_balance_batch(
    deps: Deps,
    address: String,
    item_ids: Vec<u64>,
) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let balances = item_ids
        .into_iter()
        .map(|item_id| {
            ledger::balance_of(deps.storage, &addr, item_id)
                .map(|amount| ItemBalance { item_id, amount })
        })
        .collect::<StdResult<Vec<_>>>()?;
    to_json_binary(&BalancesResponse { balances })
}

pub fn query_is_approved_for_all(
    deps: Deps,
    owner: String,
    operator: String,
) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    let operator = deps.api.addr_validate(&operator)?;
    let approved = OPERATORS
        .may_load(deps.storage, (&owner, &operator))?
        .unwrap_or(false);
    to_json_binary(&OperatorResponse { approved })
}

pub fn query_balances(
    deps: Deps,
    address: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let balances = BALANCES
        .prefix(&addr)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|entry| entry.map(|(item_id, amount)| ItemBalance { item_id, amount }))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&BalancesResponse { balances })
}

pub fn query_total_supply(deps: Deps, item_id: u64) -> StdResult<Binary> {
    to_json_binary(&TotalSupplyResponse {
        total: ledger::total_supply(deps.storage, item_id)?,
    })
}

pub fn query_waiting_for_response(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let request_id = WAITING.may_load(deps.storage, &addr)?;
    to_json_binary(&WaitingResponse {
        waiting: request_id.is_some(),
        request_id,
    })
}

pub fn query_pending_request(deps: Deps, request_id: u64) -> StdResult<Binary> {
    to_json_binary(&PENDING_REQUESTS.may_load(deps.storage, request_id)?)
}

pub fn query_current_multiplier(deps: Deps, env: Env, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    to_json_binary(&MultiplierResponse {
        multiplier: powerup::current_multiplier(deps.storage, &addr, env.block.time)?,
    })
}

pub fn query_active_power_up(deps: Deps, env: Env, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let window = POWER_UP_WINDOWS.may_load(deps.storage, &addr)?;
    let live = window
        .as_ref()
        .is_some_and(|w| powerup::is_live(w, env.block.time));
    to_json_binary(&ActivePowerUpResponse { window, live })
}

pub fn query_is_authorized(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    to_json_binary(&AuthorizedResponse {
        authorized: AUTHORIZED.may_load(deps.storage, &addr)?.unwrap_or(false),
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&PENDING_OWNER.may_load(deps.storage)?)
}

// ─── Migrate ────────────────────────────────────────────────────────────────

pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
