use cosmwasm_std::{Order, StdResult, Storage};

use crate::error::ContractError;
use crate::state::{
    CatalogItem, Category, PowerUpParams, IN_STOCK, ITEMS, ITEM_NAMES, NEXT_ITEM_ID,
};

fn insert(
    storage: &mut dyn Storage,
    category: Category,
    name: String,
    remaining_supply: u64,
    power_up: Option<PowerUpParams>,
) -> Result<CatalogItem, ContractError> {
    if name.is_empty() {
        return Err(ContractError::InvalidParameter {
            reason: "item name must not be empty".to_string(),
        });
    }
    if ITEM_NAMES.has(storage, &name) {
        return Err(ContractError::DuplicateName { name });
    }

    let id = NEXT_ITEM_ID.load(storage)?;
    let next = id.checked_add(1).ok_or(ContractError::Overflow)?;

    let item = CatalogItem {
        id,
        category,
        name,
        remaining_supply,
        power_up,
    };
    ITEMS.save(storage, id, &item)?;
    ITEM_NAMES.save(storage, &item.name, &id)?;
    if remaining_supply > 0 {
        IN_STOCK.save(storage, (category.key(), id), &true)?;
    }
    NEXT_ITEM_ID.save(storage, &next)?;

    Ok(item)
}

/// Append a regular (non power-up) item with an initial supply.
pub fn add_item(
    storage: &mut dyn Storage,
    category: Category,
    name: String,
    initial_supply: u64,
) -> Result<CatalogItem, ContractError> {
    if category == Category::PowerUp {
        return Err(ContractError::InvalidParameter {
            reason: "power-ups are created with add_power_up".to_string(),
        });
    }
    insert(storage, category, name, initial_supply, None)
}

/// Append a power-up item. Parameters must already be validated.
pub fn add_power_up(
    storage: &mut dyn Storage,
    name: String,
    params: PowerUpParams,
) -> Result<CatalogItem, ContractError> {
    insert(storage, Category::PowerUp, name, 0, Some(params))
}

pub fn add_supply(
    storage: &mut dyn Storage,
    item_id: u64,
    amount: u64,
) -> Result<CatalogItem, ContractError> {
    if amount == 0 {
        return Err(ContractError::ZeroAmount);
    }
    let mut item = describe(storage, item_id)?;
    if item.category == Category::PowerUp {
        return Err(ContractError::InvalidParameter {
            reason: "power-up supply is not tracked".to_string(),
        });
    }
    item.remaining_supply = item
        .remaining_supply
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;
    ITEMS.save(storage, item_id, &item)?;
    IN_STOCK.save(storage, (item.category.key(), item_id), &true)?;
    Ok(item)
}

pub fn exists(storage: &dyn Storage, name: &str) -> bool {
    ITEM_NAMES.has(storage, name)
}

pub fn describe(storage: &dyn Storage, item_id: u64) -> Result<CatalogItem, ContractError> {
    ITEMS
        .may_load(storage, item_id)?
        .ok_or(ContractError::UnknownItem { item_id })
}

/// Ids of the items in `category` that still have supply, ascending.
/// Reads only the stock index, so sold-out history costs nothing here.
pub fn in_stock(storage: &dyn Storage, category: Category) -> StdResult<Vec<u64>> {
    IN_STOCK
        .prefix(category.key())
        .keys(storage, None, None, Order::Ascending)
        .collect()
}

/// Take one unit of supply from `item_id`.
pub fn take_one(storage: &mut dyn Storage, item_id: u64) -> Result<(), ContractError> {
    let mut item = describe(storage, item_id)?;
    item.remaining_supply = item
        .remaining_supply
        .checked_sub(1)
        .ok_or(ContractError::SoldOut {
            category: item.category,
        })?;
    ITEMS.save(storage, item_id, &item)?;
    if item.remaining_supply == 0 {
        IN_STOCK.remove(storage, (item.category.key(), item_id));
    }
    Ok(())
}
