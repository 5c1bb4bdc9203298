use cosmwasm_std::{Addr, Deps, MessageInfo};

use crate::error::ContractError;
use crate::state::{AUTHORIZED, CONFIG, OPERATORS};

/// Verify the caller is the contract owner.
pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {
            role: "owner".to_string(),
        });
    }
    Ok(())
}

/// Verify the caller is on the authorization list. Ownership alone does not qualify.
pub fn assert_authorized(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if !AUTHORIZED.may_load(deps.storage, sender)?.unwrap_or(false) {
        return Err(ContractError::Unauthorized {
            role: "authorized account".to_string(),
        });
    }
    Ok(())
}

/// Verify `sender` may move `owner`'s items: either it is the owner or it holds
/// an operator approval from them.
pub fn assert_can_spend(deps: Deps, owner: &Addr, sender: &Addr) -> Result<(), ContractError> {
    if owner == sender {
        return Ok(());
    }
    if !OPERATORS
        .may_load(deps.storage, (owner, sender))?
        .unwrap_or(false)
    {
        return Err(ContractError::Unauthorized {
            role: "the owner or an approved operator".to_string(),
        });
    }
    Ok(())
}

/// Verify the caller is the configured randomness oracle.
pub fn assert_oracle(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.oracle {
        return Err(ContractError::Unauthorized {
            role: "randomness oracle".to_string(),
        });
    }
    Ok(())
}

/// Verify the contract is not paused.
pub fn assert_not_paused(deps: Deps) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}
