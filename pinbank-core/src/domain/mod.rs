//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O or logging.

mod account;
pub mod result;

pub use account::{
    Account, AccountKind, AccountType, CURRENT_OVERDRAFT_LIMIT, SAVINGS_MINIMUM_BALANCE,
};
