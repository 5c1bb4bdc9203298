use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

use crate::state::Category;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("contract is paused")]
    Paused,

    #[error("contract is not paused")]
    NotPaused,

    #[error("insufficient balance of item {item_id}: have {balance}, need {required}")]
    InsufficientBalance {
        item_id: u64,
        balance: Uint128,
        required: Uint128,
    },

    #[error("an item named {name:?} already exists")]
    DuplicateName { name: String },

    #[error("unknown item: {item_id}")]
    UnknownItem { item_id: u64 },

    #[error("unknown or already fulfilled randomness request: {request_id}")]
    UnknownRequest { request_id: u64 },

    #[error("a power-up is already active until {expires_at}")]
    AlreadyActive { expires_at: u64 },

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("no {category} item has remaining supply")]
    SoldOut { category: Category },

    #[error("a pack purchase is already waiting for randomness (request {request_id})")]
    PurchasePending { request_id: u64 },

    #[error("expected at least {expected} random values, got {got}")]
    InsufficientRandomness { expected: usize, got: usize },

    #[error("zero amount not allowed")]
    ZeroAmount,

    #[error("overflow in arithmetic operation")]
    Overflow,

    #[error("no owner transfer pending")]
    NoOwnerTransferPending,

    #[error("caller is not the pending owner")]
    NotPendingOwner,

    #[error("owner transfer already pending")]
    OwnerTransferAlreadyPending,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
