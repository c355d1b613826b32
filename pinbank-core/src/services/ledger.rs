//! Ledger - the in-memory account registry

use std::collections::HashMap;

use crate::domain::{Account, AccountKind, AccountType};

/// Account numbers start right after this value
const ACCOUNT_NUMBER_SEED: u64 = 1000;

/// Registry that owns every account it opens
///
/// Ids are minted from a counter and never reused. There is no way to close
/// an account or list the registry; callers look accounts up by id.
#[derive(Debug)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
    last_account_number: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            last_account_number: ACCOUNT_NUMBER_SEED,
        }
    }

    fn next_account_number(&mut self) -> String {
        self.last_account_number += 1;
        self.last_account_number.to_string()
    }

    /// Open an account of the given type and return its id
    pub fn open_account(&mut self, account_type: AccountType) -> String {
        let id = self.next_account_number();
        let account = Account::new(id.clone(), AccountKind::for_type(account_type));
        self.accounts.insert(id.clone(), account);
        tracing::info!(account_id = %id, kind = %account_type, "account opened");
        id
    }

    pub fn open_savings_account(&mut self) -> String {
        self.open_account(AccountType::Savings)
    }

    pub fn open_current_account(&mut self) -> String {
        self.open_account(AccountType::Current)
    }

    /// Look up an account. Unknown ids yield `None`, never an error.
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.open_savings_account(), "1001");
        assert_eq!(ledger.open_current_account(), "1002");
        assert_eq!(ledger.open_savings_account(), "1003");
    }

    #[test]
    fn test_opened_accounts_have_matching_kind() {
        let mut ledger = Ledger::new();
        let savings = ledger.open_savings_account();
        let current = ledger.open_current_account();

        assert_eq!(ledger.account(&savings).unwrap().account_type(), AccountType::Savings);
        assert_eq!(ledger.account(&current).unwrap().account_type(), AccountType::Current);
    }

    #[test]
    fn test_new_accounts_have_no_pin() {
        let mut ledger = Ledger::new();
        let id = ledger.open_current_account();
        assert!(!ledger.account(&id).unwrap().is_pin_registered());
    }

    #[test]
    fn test_unknown_account_is_none() {
        let mut ledger = Ledger::new();
        ledger.open_savings_account();
        assert!(ledger.account("1000").is_none());
        assert!(ledger.account("9999").is_none());
        assert!(ledger.account_mut("abc").is_none());
    }

    #[test]
    fn test_mutation_is_visible_through_lookup() {
        let mut ledger = Ledger::new();
        let id = ledger.open_current_account();

        let account = ledger.account_mut(&id).unwrap();
        account.register_pin("4321").unwrap();
        account.withdraw(rust_decimal::Decimal::from(250), "4321").unwrap();

        let balance = ledger.account(&id).unwrap().balance("4321").unwrap();
        assert_eq!(balance, rust_decimal::Decimal::from(-250));
    }

    #[test]
    fn test_separate_ledgers_mint_independently() {
        let mut first = Ledger::new();
        let mut second = Ledger::default();
        assert_eq!(first.open_savings_account(), "1001");
        assert_eq!(second.open_savings_account(), "1001");
    }
}
