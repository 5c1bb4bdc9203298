use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use std::fmt;

/// Item id 0 is the fungible reward currency. It has no catalog entry and no supply cap.
pub const REWARD_ID: u64 = 0;

/// Longest boost window a power-up may grant (10 years).
pub const MAX_POWER_UP_DURATION: u64 = 315_360_000;

/// Contract-level configuration
#[cw_serde]
pub struct Config {
    /// Contract owner. Manages the catalog, authorizations, pack price and pause
    pub owner: Addr,
    /// Randomness oracle contract; the only address allowed to fulfill pack requests
    pub oracle: Addr,
    /// Price of one pack in reward currency units
    pub pack_price: Uint128,
    /// Funds attached to every randomness request sent to the oracle
    pub randomness_fee: Vec<Coin>,
    /// Freezes purchases, transfers, minting and activation (fulfillment still runs)
    pub paused: bool,
}

#[cw_serde]
pub struct PendingOwnerTransfer {
    pub proposed_owner: Addr,
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum Category {
    Skin,
    UpperBody,
    LowerBody,
    Shoes,
    Accessories,
    Banner,
    PowerUp,
}

/// Categories that receive exactly one item in every pack, in draw order.
pub const PACK_CATEGORIES: [Category; 5] = [
    Category::Skin,
    Category::UpperBody,
    Category::LowerBody,
    Category::Shoes,
    Category::Accessories,
];

impl Category {
    /// Storage key used by the per-category stock index.
    pub fn key(&self) -> u8 {
        match self {
            Category::Skin => 0,
            Category::UpperBody => 1,
            Category::LowerBody => 2,
            Category::Shoes => 3,
            Category::Accessories => 4,
            Category::Banner => 5,
            Category::PowerUp => 6,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Skin => "skin",
            Category::UpperBody => "upper_body",
            Category::LowerBody => "lower_body",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
            Category::Banner => "banner",
            Category::PowerUp => "power_up",
        };
        f.write_str(name)
    }
}

#[cw_serde]
pub struct PowerUpParams {
    pub multiplier: u64,
    pub duration_seconds: u64,
}

/// A catalog entry
#[cw_serde]
pub struct CatalogItem {
    pub id: u64,
    pub category: Category,
    pub name: String,
    /// Units still available to packs. Not tracked for power-ups.
    pub remaining_supply: u64,
    pub power_up: Option<PowerUpParams>,
}

/// An account's boost window. Expiry is evaluated at read time.
#[cw_serde]
pub struct PowerUpWindow {
    pub item_id: u64,
    pub multiplier: u64,
    pub expires_at: Timestamp,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_OWNER: Item<PendingOwnerTransfer> = Item::new("pending_owner");

/// Id the next catalog entry receives (starts at 1)
pub const NEXT_ITEM_ID: Item<u64> = Item::new("next_item_id");

/// item_id -> CatalogItem
pub const ITEMS: Map<u64, CatalogItem> = Map::new("items");

/// item name -> item_id, case-sensitive
pub const ITEM_NAMES: Map<&str, u64> = Map::new("item_names");

/// (category key, item_id) for every item with remaining supply > 0.
/// Entries leave when an item sells out and return when it is restocked.
pub const IN_STOCK: Map<(u8, u64), bool> = Map::new("in_stock");

/// (account, item_id) -> quantity. Zero balances are removed.
pub const BALANCES: Map<(&Addr, u64), Uint128> = Map::new("balances");

/// item_id -> minted minus burned
pub const TOTAL_SUPPLY: Map<u64, Uint128> = Map::new("total_supply");

/// (owner, operator) -> approved to move all of owner's items
pub const OPERATORS: Map<(&Addr, &Addr), bool> = Map::new("operators");

/// Accounts allowed to mint rewards and power-ups
pub const AUTHORIZED: Map<&Addr, bool> = Map::new("authorized");

/// Id the next randomness request receives (starts at 1)
pub const NEXT_REQUEST_ID: Item<u64> = Item::new("next_request_id");

/// request_id -> buyer, removed on fulfillment
pub const PENDING_REQUESTS: Map<u64, Addr> = Map::new("pending_requests");

/// buyer -> outstanding request_id. Present iff the buyer is waiting for the oracle.
pub const WAITING: Map<&Addr, u64> = Map::new("waiting");

pub const POWER_UP_WINDOWS: Map<&Addr, PowerUpWindow> = Map::new("power_up_windows");
