use cosmwasm_std::{Addr, StdResult, Storage, Timestamp, Uint128};

use crate::error::ContractError;
use crate::state::{PowerUpParams, PowerUpWindow, MAX_POWER_UP_DURATION, POWER_UP_WINDOWS};

/// Multiplier applied when no boost is live.
pub const BASE_MULTIPLIER: u64 = 1;

pub fn validate_params(multiplier: u64, duration_seconds: u64) -> Result<PowerUpParams, ContractError> {
    if multiplier == 0 {
        return Err(ContractError::InvalidParameter {
            reason: "multiplier must be greater than zero".to_string(),
        });
    }
    if duration_seconds == 0 || duration_seconds > MAX_POWER_UP_DURATION {
        return Err(ContractError::InvalidParameter {
            reason: format!("duration must be between 1 and {MAX_POWER_UP_DURATION} seconds"),
        });
    }
    Ok(PowerUpParams {
        multiplier,
        duration_seconds,
    })
}

pub fn is_live(window: &PowerUpWindow, now: Timestamp) -> bool {
    now < window.expires_at
}

pub fn multiplier_at(window: Option<&PowerUpWindow>, now: Timestamp) -> u64 {
    match window {
        Some(w) if is_live(w, now) => w.multiplier,
        _ => BASE_MULTIPLIER,
    }
}

pub fn current_multiplier(storage: &dyn Storage, account: &Addr, now: Timestamp) -> StdResult<u64> {
    let window = POWER_UP_WINDOWS.may_load(storage, account)?;
    Ok(multiplier_at(window.as_ref(), now))
}

/// Build the window that activating `item_id` at `now` opens.
pub fn open_window(item_id: u64, params: &PowerUpParams, now: Timestamp) -> PowerUpWindow {
    PowerUpWindow {
        item_id,
        multiplier: params.multiplier,
        expires_at: now.plus_seconds(params.duration_seconds),
    }
}

pub fn boosted_amount(amount: Uint128, multiplier: u64) -> Result<Uint128, ContractError> {
    amount
        .checked_mul(Uint128::from(multiplier))
        .map_err(|_| ContractError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(expires_at: u64) -> PowerUpWindow {
        PowerUpWindow {
            item_id: 4,
            multiplier: 3,
            expires_at: Timestamp::from_seconds(expires_at),
        }
    }

    #[test]
    fn multiplier_falls_back_after_expiry() {
        let w = window(1_600);
        assert_eq!(multiplier_at(Some(&w), Timestamp::from_seconds(1_000)), 3);
        assert_eq!(multiplier_at(Some(&w), Timestamp::from_seconds(1_599)), 3);
        // expiry instant is already outside the window
        assert_eq!(multiplier_at(Some(&w), Timestamp::from_seconds(1_600)), 1);
        assert_eq!(multiplier_at(None, Timestamp::from_seconds(1_000)), 1);
    }

    #[test]
    fn open_window_adds_duration() {
        let params = validate_params(3, 600).unwrap();
        let w = open_window(4, &params, Timestamp::from_seconds(1_000));
        assert_eq!(w, window(1_600));
    }

    #[test]
    fn zero_params_are_rejected() {
        assert!(matches!(
            validate_params(0, 600),
            Err(ContractError::InvalidParameter { .. })
        ));
        assert!(matches!(
            validate_params(2, 0),
            Err(ContractError::InvalidParameter { .. })
        ));
        assert!(validate_params(2, MAX_POWER_UP_DURATION + 1).is_err());
    }

    #[test]
    fn boosted_amount_checks_overflow() {
        assert_eq!(boosted_amount(Uint128::new(10), 3).unwrap(), Uint128::new(30));
        assert_eq!(
            boosted_amount(Uint128::MAX, 2).unwrap_err(),
            ContractError::Overflow
        );
    }
}
