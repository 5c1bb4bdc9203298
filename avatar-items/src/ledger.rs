//! Multi-asset balance ledger.
//!
//! Every balance lives under `(account, item_id)`. `TOTAL_SUPPLY` tracks minted
//! minus burned per id, so the sum of all balances of an id always equals it.
//! Each movement returns the event an indexer sees for it.

use std::collections::BTreeMap;

use cosmwasm_std::{Addr, Event, StdResult, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{BALANCES, TOTAL_SUPPLY};

pub fn balance_of(storage: &dyn Storage, account: &Addr, item_id: u64) -> StdResult<Uint128> {
    Ok(BALANCES
        .may_load(storage, (account, item_id))?
        .unwrap_or_default())
}

pub fn total_supply(storage: &dyn Storage, item_id: u64) -> StdResult<Uint128> {
    Ok(TOTAL_SUPPLY.may_load(storage, item_id)?.unwrap_or_default())
}

fn save_balance(
    storage: &mut dyn Storage,
    account: &Addr,
    item_id: u64,
    balance: Uint128,
) -> StdResult<()> {
    if balance.is_zero() {
        BALANCES.remove(storage, (account, item_id));
        Ok(())
    } else {
        BALANCES.save(storage, (account, item_id), &balance)
    }
}

/// Check that `account` holds at least `amount` of `item_id` and return the balance left after debiting it.
fn debit(
    storage: &dyn Storage,
    account: &Addr,
    item_id: u64,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let balance = balance_of(storage, account, item_id)?;
    balance
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientBalance {
            item_id,
            balance,
            required: amount,
        })
}

pub fn mint(
    storage: &mut dyn Storage,
    account: &Addr,
    item_id: u64,
    amount: Uint128,
) -> Result<Event, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let balance = balance_of(storage, account, item_id)?
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    let supply = total_supply(storage, item_id)?
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;

    save_balance(storage, account, item_id, balance)?;
    TOTAL_SUPPLY.save(storage, item_id, &supply)?;

    Ok(Event::new("mint")
        .add_attribute("account", account.as_str())
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("amount", amount.to_string()))
}

/// Burn `amount` of `item_id` from `account`. Fails without touching state when the balance is short.
pub fn spend(
    storage: &mut dyn Storage,
    account: &Addr,
    item_id: u64,
    amount: Uint128,
) -> Result<Event, ContractError> {
    let remaining = debit(storage, account, item_id, amount)?;
    let supply = total_supply(storage, item_id)?
        .checked_sub(amount)
        .map_err(|_| ContractError::Overflow)?;

    save_balance(storage, account, item_id, remaining)?;
    TOTAL_SUPPLY.save(storage, item_id, &supply)?;

    Ok(Event::new("spend")
        .add_attribute("account", account.as_str())
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("amount", amount.to_string()))
}

/// Move units between accounts. Total supply is unchanged.
pub fn transfer(
    storage: &mut dyn Storage,
    from: &Addr,
    to: &Addr,
    item_id: u64,
    amount: Uint128,
) -> Result<Event, ContractError> {
    let remaining = debit(storage, from, item_id, amount)?;
    save_balance(storage, from, item_id, remaining)?;

    // read after the debit so a self-transfer nets out
    let credited = balance_of(storage, to, item_id)?
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    save_balance(storage, to, item_id, credited)?;

    Ok(Event::new("transfer")
        .add_attribute("from", from.as_str())
        .add_attribute("to", to.as_str())
        .add_attribute("item_id", item_id.to_string())
        .add_attribute("amount", amount.to_string()))
}

/// Move several `(item_id, amount)` legs between the same two accounts.
///
/// Every leg is checked against the sender's balances before anything is written,
/// so a short balance on any id leaves the ledger untouched. Repeated ids are summed.
pub fn transfer_batch(
    storage: &mut dyn Storage,
    from: &Addr,
    to: &Addr,
    legs: &[(u64, Uint128)],
) -> Result<Vec<Event>, ContractError> {
    if legs.is_empty() {
        return Err(ContractError::InvalidParameter {
            reason: "batch transfer needs at least one item".to_string(),
        });
    }

    let mut totals: BTreeMap<u64, Uint128> = BTreeMap::new();
    for (item_id, amount) in legs {
        if amount.is_zero() {
            return Err(ContractError::ZeroAmount);
        }
        let total = totals.entry(*item_id).or_default();
        *total = total.checked_add(*amount).map_err(|_| ContractError::Overflow)?;
    }
    for (item_id, total) in &totals {
        debit(storage, from, *item_id, *total)?;
    }

    legs.iter()
        .map(|(item_id, amount)| transfer(storage, from, to, *item_id, *amount))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    fn alice() -> Addr {
        Addr::unchecked("alice")
    }

    fn bob() -> Addr {
        Addr::unchecked("bob")
    }

    #[test]
    fn mint_creates_balance_and_supply() {
        let mut storage = MockStorage::new();
        let event = mint(&mut storage, &alice(), 0, Uint128::new(10)).unwrap();

        assert_eq!(event.ty, "mint");
        assert_eq!(balance_of(&storage, &alice(), 0).unwrap(), Uint128::new(10));
        assert_eq!(total_supply(&storage, 0).unwrap(), Uint128::new(10));
    }

    #[test]
    fn mint_zero_fails() {
        let mut storage = MockStorage::new();
        let err = mint(&mut storage, &alice(), 0, Uint128::zero()).unwrap_err();
        assert_eq!(err, ContractError::ZeroAmount);
    }

    #[test]
    fn mint_overflow_is_rejected() {
        let mut storage = MockStorage::new();
        mint(&mut storage, &alice(), 0, Uint128::MAX).unwrap();
        let err = mint(&mut storage, &alice(), 0, Uint128::one()).unwrap_err();
        assert_eq!(err, ContractError::Overflow);
        assert_eq!(balance_of(&storage, &alice(), 0).unwrap(), Uint128::MAX);
    }

    #[test]
    fn spend_more_than_balance_fails_without_change() {
        let mut storage = MockStorage::new();
        mint(&mut storage, &alice(), 3, Uint128::new(2)).unwrap();

        let err = spend(&mut storage, &alice(), 3, Uint128::new(5)).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientBalance {
                item_id: 3,
                balance: Uint128::new(2),
                required: Uint128::new(5),
            }
        );
        assert_eq!(balance_of(&storage, &alice(), 3).unwrap(), Uint128::new(2));
        assert_eq!(total_supply(&storage, 3).unwrap(), Uint128::new(2));
    }

    #[test]
    fn spend_to_zero_removes_entry() {
        let mut storage = MockStorage::new();
        mint(&mut storage, &alice(), 0, Uint128::new(10)).unwrap();
        spend(&mut storage, &alice(), 0, Uint128::new(10)).unwrap();

        assert!(BALANCES.may_load(&storage, (&alice(), 0)).unwrap().is_none());
        assert_eq!(total_supply(&storage, 0).unwrap(), Uint128::zero());
    }

    #[test]
    fn transfer_conserves_supply() {
        let mut storage = MockStorage::new();
        mint(&mut storage, &alice(), 1, Uint128::new(7)).unwrap();
        transfer(&mut storage, &alice(), &bob(), 1, Uint128::new(4)).unwrap();

        assert_eq!(balance_of(&storage, &alice(), 1).unwrap(), Uint128::new(3));
        assert_eq!(balance_of(&storage, &bob(), 1).unwrap(), Uint128::new(4));
        assert_eq!(total_supply(&storage, 1).unwrap(), Uint128::new(7));
    }

    #[test]
    fn batch_with_one_short_leg_moves_nothing() {
        let mut storage = MockStorage::new();
        mint(&mut storage, &alice(), 1, Uint128::new(5)).unwrap();
        mint(&mut storage, &alice(), 2, Uint128::new(1)).unwrap();

        let legs = [
            (1, Uint128::new(3)),
            (2, Uint128::new(1)),
            (1, Uint128::new(3)),
        ];
        let err = transfer_batch(&mut storage, &alice(), &bob(), &legs).unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientBalance {
                item_id: 1,
                balance: Uint128::new(5),
                required: Uint128::new(6),
            }
        );
        assert_eq!(balance_of(&storage, &alice(), 1).unwrap(), Uint128::new(5));
        assert_eq!(balance_of(&storage, &alice(), 2).unwrap(), Uint128::one());
        assert_eq!(balance_of(&storage, &bob(), 1).unwrap(), Uint128::zero());

        let events = transfer_batch(&mut storage, &alice(), &bob(), &legs[..2]).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(balance_of(&storage, &bob(), 1).unwrap(), Uint128::new(3));
        assert_eq!(balance_of(&storage, &bob(), 2).unwrap(), Uint128::one());
        assert_eq!(total_supply(&storage, 1).unwrap(), Uint128::new(5));
    }

    #[test]
    fn self_transfer_is_a_no_op() {
        let mut storage = MockStorage::new();
        mint(&mut storage, &alice(), 1, Uint128::new(7)).unwrap();
        transfer(&mut storage, &alice(), &alice(), 1, Uint128::new(7)).unwrap();
        assert_eq!(balance_of(&storage, &alice(), 1).unwrap(), Uint128::new(7));
    }
}
