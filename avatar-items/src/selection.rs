//! Pack draw: one item per pack category, chosen by `random % in_stock_count`.

use cosmwasm_std::{Addr, Event, Storage, Uint128};

use crate::catalog;
use crate::error::ContractError;
use crate::ledger;
use crate::state::{Category, PACK_CATEGORIES};

/// Outcome of opening one pack.
#[derive(Debug, Default, PartialEq)]
pub struct PackDraw {
    pub minted: Vec<u64>,
    pub skipped: Vec<Category>,
    pub events: Vec<Event>,
}

/// Map a raw random value onto `0..len`. `None` when there is nothing to pick from.
pub fn pick_index(random: Uint128, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = random.u128() % len as u128;
    Some(index as usize)
}

/// Pick one in-stock item of `category` and take one unit of its supply.
pub fn select_item(
    storage: &mut dyn Storage,
    category: Category,
    random: Uint128,
) -> Result<u64, ContractError> {
    let candidates = catalog::in_stock(storage, category)?;
    let index = pick_index(random, candidates.len()).ok_or(ContractError::SoldOut { category })?;
    let item_id = candidates[index];
    catalog::take_one(storage, item_id)?;
    Ok(item_id)
}

/// Draw one item for each pack category and mint it to `buyer`.
///
/// Consumes `random_values[i]` for the i-th pack category; extra values are ignored.
/// A category with no stock is skipped instead of failing the draw.
pub fn draw_pack(
    storage: &mut dyn Storage,
    buyer: &Addr,
    random_values: &[Uint128],
) -> Result<PackDraw, ContractError> {
    if random_values.len() < PACK_CATEGORIES.len() {
        return Err(ContractError::InsufficientRandomness {
            expected: PACK_CATEGORIES.len(),
            got: random_values.len(),
        });
    }

    let mut draw = PackDraw::default();
    for (category, random) in PACK_CATEGORIES.iter().zip(random_values) {
        match select_item(storage, *category, *random) {
            Ok(item_id) => {
                draw.events
                    .push(ledger::mint(storage, buyer, item_id, Uint128::one())?);
                draw.minted.push(item_id);
            }
            Err(ContractError::SoldOut { category }) => draw.skipped.push(category),
            Err(err) => return Err(err),
        }
    }
    Ok(draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NEXT_ITEM_ID;
    use cosmwasm_std::testing::MockStorage;

    fn stocked() -> MockStorage {
        let mut storage = MockStorage::new();
        NEXT_ITEM_ID.save(&mut storage, &1).unwrap();
        for (i, category) in PACK_CATEGORIES.iter().enumerate() {
            catalog::add_item(&mut storage, *category, format!("item-{i}-a"), 10).unwrap();
            catalog::add_item(&mut storage, *category, format!("item-{i}-b"), 10).unwrap();
        }
        storage
    }

    #[test]
    fn pick_index_wraps_modulo_len() {
        assert_eq!(pick_index(Uint128::new(7), 3), Some(1));
        assert_eq!(pick_index(Uint128::MAX, 1), Some(0));
        assert_eq!(pick_index(Uint128::new(5), 0), None);
    }

    #[test]
    fn draw_mints_one_item_per_category() {
        let mut storage = stocked();
        let buyer = Addr::unchecked("buyer");
        let values: Vec<Uint128> = [0u128, 1, 2, 3, 4].map(Uint128::new).to_vec();

        let draw = draw_pack(&mut storage, &buyer, &values).unwrap();

        // categories hold ids (1,2) (3,4) (5,6) (7,8) (9,10)
        assert_eq!(draw.minted, vec![1, 4, 5, 8, 9]);
        assert!(draw.skipped.is_empty());
        assert_eq!(draw.events.len(), 5);
        for id in &draw.minted {
            assert_eq!(
                ledger::balance_of(&storage, &buyer, *id).unwrap(),
                Uint128::one()
            );
            assert_eq!(catalog::describe(&storage, *id).unwrap().remaining_supply, 9);
        }
    }

    #[test]
    fn draw_skips_sold_out_category() {
        let mut storage = MockStorage::new();
        NEXT_ITEM_ID.save(&mut storage, &1).unwrap();
        catalog::add_item(&mut storage, Category::Skin, "only skin".into(), 1).unwrap();
        catalog::add_item(&mut storage, Category::Shoes, "no shoes".into(), 0).unwrap();

        let buyer = Addr::unchecked("buyer");
        let values = vec![Uint128::new(42); 5];
        let draw = draw_pack(&mut storage, &buyer, &values).unwrap();

        assert_eq!(draw.minted, vec![1]);
        assert_eq!(
            draw.skipped,
            vec![
                Category::UpperBody,
                Category::LowerBody,
                Category::Shoes,
                Category::Accessories
            ]
        );

        let again = draw_pack(&mut storage, &buyer, &values).unwrap();
        assert!(again.minted.is_empty());
        assert_eq!(again.skipped.len(), 5);
    }

    #[test]
    fn draw_requires_a_value_per_category() {
        let mut storage = stocked();
        let err = draw_pack(&mut storage, &Addr::unchecked("buyer"), &[Uint128::one(); 4])
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientRandomness {
                expected: 5,
                got: 4
            }
        );
    }
}
