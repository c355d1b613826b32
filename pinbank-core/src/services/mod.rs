//! Service layer - business logic orchestration
//!
//! The ledger owns the accounts; the teller drives it on behalf of a front end.

mod ledger;
pub mod teller;

pub use ledger::Ledger;
pub use teller::{
    parse_amount, BalanceReceipt, OpenedAccount, TellerService, TransactionKind,
    TransactionReceipt,
};
