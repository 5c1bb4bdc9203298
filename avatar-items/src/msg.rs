use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Coin, Uint128};

use crate::state::{Category, PowerUpWindow};

#[cw_serde]
pub struct InstantiateMsg {
    /// Contract owner address
    pub owner: String,
    /// Randomness oracle contract address
    pub oracle: String,
    /// Pack price in reward currency units (must be non-zero)
    pub pack_price: Uint128,
    /// Funds forwarded to the oracle with every randomness request
    pub randomness_fee: Vec<Coin>,
    /// Accounts allowed to mint from the start
    pub authorized: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Append a catalog item (owner only). Power-ups use `AddPowerUp`.
    AddItem {
        category: Category,
        name: String,
        supply: u64,
    },
    /// Top up the remaining supply of an item (owner only)
    AddSupply { item_id: u64, amount: u64 },
    /// Append a power-up item (owner only)
    AddPowerUp {
        name: String,
        multiplier: u64,
        duration_seconds: u64,
    },
    /// Allow an account to mint rewards and power-ups (owner only)
    Authorize { address: String },
    /// Mint reward currency to `recipient`, scaled by their live power-up (authorized only)
    EarnRewards { recipient: String, amount: Uint128 },
    /// Mint power-up tokens to `recipient` without activating them (authorized only)
    MintPowerUp {
        recipient: String,
        item_id: u64,
        amount: Uint128,
    },
    /// Burn one of the sender's power-up tokens and start its boost window
    ActivatePowerUp { item_id: u64 },
    /// Pay `pack_price` reward units from `account` (default: the sender) and
    /// request randomness for a pack. Buying for someone else needs their operator approval.
    BuyPack { account: Option<String> },
    /// Oracle callback completing a pack purchase (oracle only)
    FulfillRandomness {
        request_id: u64,
        random_values: Vec<Uint128>,
    },
    /// Move units of any item id (including reward currency) to `recipient`
    Transfer {
        recipient: String,
        item_id: u64,
        amount: Uint128,
    },
    /// Move units out of `owner`'s balance (sender must be `owner` or an approved operator)
    TransferFrom {
        owner: String,
        recipient: String,
        item_id: u64,
        amount: Uint128,
    },
    /// Move several item ids at once. All legs succeed or none do.
    BatchTransfer {
        /// Account to debit (default: the sender)
        owner: Option<String>,
        recipient: String,
        items: Vec<ItemBalance>,
    },
    /// Let `operator` move all of the sender's items and buy packs with their rewards
    ApproveAll { operator: String },
    RevokeAll { operator: String },
    /// Change the pack price (owner only)
    SetPackPrice { price: Uint128 },
    /// Freeze purchases, transfers, minting and activation (owner only)
    Pause {},
    /// Unpause the contract (owner only)
    Unpause {},
    ProposeOwner { new_owner: String },
    AcceptOwner {},
    CancelOwnerTransfer {},
}

/// Message sent to the randomness oracle. The oracle answers with
/// `ExecuteMsg::FulfillRandomness` carrying the same `request_id`.
#[cw_serde]
pub enum OracleExecuteMsg {
    RequestRandomness { request_id: u64, num_values: u32 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},

    /// Fails for an unknown id
    #[returns(crate::state::CatalogItem)]
    Item { item_id: u64 },

    #[returns(ItemExistsResponse)]
    ItemExists { name: String },

    /// Id the next catalog entry will receive
    #[returns(ItemCounterResponse)]
    ItemCounter {},

    #[returns(ItemsResponse)]
    Items {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(BalanceResponse)]
    Balance { address: String, item_id: u64 },

    /// One entry per requested id, in request order, zero balances included
    #[returns(BalancesResponse)]
    BalanceBatch { address: String, item_ids: Vec<u64> },

    #[returns(OperatorResponse)]
    IsApprovedForAll { owner: String, operator: String },

    #[returns(BalancesResponse)]
    Balances {
        address: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Minted minus burned for an item id
    #[returns(TotalSupplyResponse)]
    TotalSupply { item_id: u64 },

    #[returns(WaitingResponse)]
    WaitingForResponse { address: String },

    #[returns(Option<Addr>)]
    PendingRequest { request_id: u64 },

    #[returns(MultiplierResponse)]
    CurrentMultiplier { address: String },

    #[returns(ActivePowerUpResponse)]
    ActivePowerUp { address: String },

    #[returns(AuthorizedResponse)]
    IsAuthorized { address: String },

    #[returns(Option<crate::state::PendingOwnerTransfer>)]
    PendingOwner {},
}

#[cw_serde]
pub struct ItemExistsResponse {
    pub exists: bool,
}

#[cw_serde]
pub struct ItemCounterResponse {
    pub next_item_id: u64,
}

#[cw_serde]
pub struct ItemsResponse {
    pub items: Vec<crate::state::CatalogItem>,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct ItemBalance {
    pub item_id: u64,
    pub amount: Uint128,
}

#[cw_serde]
pub struct BalancesResponse {
    pub balances: Vec<ItemBalance>,
}

#[cw_serde]
pub struct TotalSupplyResponse {
    pub total: Uint128,
}

#[cw_serde]
pub struct WaitingResponse {
    pub waiting: bool,
    pub request_id: Option<u64>,
}

#[cw_serde]
pub struct MultiplierResponse {
    pub multiplier: u64,
}

#[cw_serde]
pub struct ActivePowerUpResponse {
    /// Last window opened by the account, live or expired
    pub window: Option<PowerUpWindow>,
    pub live: bool,
}

#[cw_serde]
pub struct OperatorResponse {
    pub approved: bool,
}

#[cw_serde]
pub struct AuthorizedResponse {
    pub authorized: bool,
}

#[cw_serde]
pub struct MigrateMsg {}
