//! Teller service - the caller-side workflow on top of the ledger
//!
//! Performs the checks a teller front end makes before touching an account
//! (missing input, PIN length, unknown account number), then delegates to the
//! domain model. Each successful call returns a serializable receipt.

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Config;
use crate::domain::result::Error;
use crate::domain::{Account, AccountType};
use crate::services::Ledger;

/// Teller service owning the ledger for a session
#[derive(Debug)]
pub struct TellerService {
    ledger: Ledger,
    min_pin_length: usize,
}

impl TellerService {
    pub fn new(config: &Config) -> Self {
        Self {
            ledger: Ledger::new(),
            min_pin_length: config.min_pin_length,
        }
    }

    /// Read-only view of the underlying registry
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn min_pin_length(&self) -> usize {
        self.min_pin_length
    }

    /// Open a new account
    pub fn open_account(&mut self, account_type: AccountType) -> OpenedAccount {
        let account_id = self.ledger.open_account(account_type);
        OpenedAccount {
            account_id,
            kind: account_type,
        }
    }

    /// Whether the account has a PIN yet, or `None` if it doesn't exist
    pub fn is_pin_registered(&self, account_id: &str) -> Option<bool> {
        self.ledger.account(account_id).map(Account::is_pin_registered)
    }

    /// Register the PIN for an account
    pub fn register_pin(&mut self, account_id: &str, pin: &str) -> Result<()> {
        if pin.is_empty() {
            bail!("Please enter a PIN");
        }
        if pin.chars().count() < self.min_pin_length {
            bail!("PIN must be at least {} digits", self.min_pin_length);
        }

        let account = lookup_mut(&mut self.ledger, account_id)?;
        let result = account.register_pin(pin);
        log_outcome("register_pin", account_id, &result);
        result?;
        Ok(())
    }

    /// Check an account balance
    pub fn balance(&self, account_id: &str, pin: &str) -> Result<BalanceReceipt> {
        require_credentials(account_id, pin)?;
        let account = self
            .ledger
            .account(account_id)
            .ok_or_else(|| account_not_found(account_id))?;

        let result = account.balance(pin);
        log_outcome("balance", account_id, &result);

        Ok(BalanceReceipt {
            account_id: account_id.to_string(),
            balance: result?,
        })
    }

    /// Deposit into an account
    pub fn deposit(
        &mut self,
        account_id: &str,
        pin: &str,
        amount: Decimal,
    ) -> Result<TransactionReceipt> {
        require_credentials(account_id, pin)?;
        let account = lookup_mut(&mut self.ledger, account_id)?;

        let result = account.deposit(amount, pin);
        log_outcome("deposit", account_id, &result);
        result?;

        Ok(TransactionReceipt {
            account_id: account_id.to_string(),
            kind: TransactionKind::Deposit,
            amount,
            balance: account.balance(pin)?,
        })
    }

    /// Withdraw from an account, subject to its withdrawal rule
    pub fn withdraw(
        &mut self,
        account_id: &str,
        pin: &str,
        amount: Decimal,
    ) -> Result<TransactionReceipt> {
        require_credentials(account_id, pin)?;
        let account = lookup_mut(&mut self.ledger, account_id)?;

        let result = account.withdraw(amount, pin);
        log_outcome("withdraw", account_id, &result);
        result?;

        Ok(TransactionReceipt {
            account_id: account_id.to_string(),
            kind: TransactionKind::Withdrawal,
            amount,
            balance: account.balance(pin)?,
        })
    }
}

/// Parse a user-entered amount
///
/// The sign is not checked here; the account rejects non-positive amounts.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("Please enter an amount");
    }
    trimmed
        .parse::<Decimal>()
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", trimmed))
}

fn require_credentials(account_id: &str, pin: &str) -> Result<()> {
    if account_id.trim().is_empty() {
        bail!("Please enter an account number");
    }
    if pin.is_empty() {
        bail!("Please enter your PIN");
    }
    Ok(())
}

fn account_not_found(account_id: &str) -> anyhow::Error {
    tracing::warn!(account_id, "account not found");
    anyhow::anyhow!("Account not found: {}", account_id)
}

fn lookup_mut<'a>(ledger: &'a mut Ledger, account_id: &str) -> Result<&'a mut Account> {
    ledger
        .account_mut(account_id)
        .ok_or_else(|| account_not_found(account_id))
}

/// Never logs the PIN or the balance
fn log_outcome<T>(operation: &str, account_id: &str, result: &std::result::Result<T, Error>) {
    match result {
        Ok(_) => tracing::debug!(operation, account_id, "operation succeeded"),
        Err(e) => tracing::warn!(operation, account_id, reason = e.kind(), "operation rejected"),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenedAccount {
    pub account_id: String,
    pub kind: AccountType,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceReceipt {
    pub account_id: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// Result of a deposit or withdrawal, with the balance read back afterwards
#[derive(Debug, Clone, Serialize)]
pub struct TransactionReceipt {
    pub account_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teller() -> TellerService {
        TellerService::new(&Config::default())
    }

    fn domain_error(err: &anyhow::Error) -> Option<&Error> {
        err.downcast_ref::<Error>()
    }

    #[test]
    fn test_open_account_receipt() {
        let mut teller = teller();
        let opened = teller.open_account(AccountType::Savings);
        assert_eq!(opened.account_id, "1001");
        assert_eq!(opened.kind, AccountType::Savings);
        assert_eq!(teller.is_pin_registered("1001"), Some(false));
        assert_eq!(teller.is_pin_registered("1002"), None);
    }

    #[test]
    fn test_register_pin_input_checks() {
        let mut teller = teller();
        let id = teller.open_account(AccountType::Current).account_id;

        let err = teller.register_pin(&id, "").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a PIN");

        let err = teller.register_pin(&id, "123").unwrap_err();
        assert_eq!(err.to_string(), "PIN must be at least 4 digits");

        let err = teller.register_pin("4040", "1234").unwrap_err();
        assert_eq!(err.to_string(), "Account not found: 4040");

        teller.register_pin(&id, "1234").unwrap();
        assert_eq!(teller.is_pin_registered(&id), Some(true));

        let err = teller.register_pin(&id, "5678").unwrap_err();
        assert_eq!(domain_error(&err), Some(&Error::AlreadyRegistered));
    }

    #[test]
    fn test_custom_min_pin_length() {
        let config = Config {
            min_pin_length: 6,
            ..Config::default()
        };
        let mut teller = TellerService::new(&config);
        let id = teller.open_account(AccountType::Savings).account_id;

        let err = teller.register_pin(&id, "12345").unwrap_err();
        assert_eq!(err.to_string(), "PIN must be at least 6 digits");
        teller.register_pin(&id, "123456").unwrap();
    }

    #[test]
    fn test_deposit_and_withdraw_receipts() {
        let mut teller = teller();
        let id = teller.open_account(AccountType::Savings).account_id;
        teller.register_pin(&id, "1234").unwrap();

        let receipt = teller.deposit(&id, "1234", Decimal::from(600)).unwrap();
        assert_eq!(receipt.kind, TransactionKind::Deposit);
        assert_eq!(receipt.amount, Decimal::from(600));
        assert_eq!(receipt.balance, Decimal::from(600));

        let receipt = teller.withdraw(&id, "1234", Decimal::from(100)).unwrap();
        assert_eq!(receipt.kind, TransactionKind::Withdrawal);
        assert_eq!(receipt.balance, Decimal::from(500));

        let receipt = teller.balance(&id, "1234").unwrap();
        assert_eq!(receipt.balance, Decimal::from(500));
    }

    #[test]
    fn test_domain_errors_pass_through() {
        let mut teller = teller();
        let id = teller.open_account(AccountType::Savings).account_id;

        let err = teller.balance(&id, "1234").unwrap_err();
        assert_eq!(domain_error(&err), Some(&Error::NotRegistered));

        teller.register_pin(&id, "1234").unwrap();
        let err = teller.deposit(&id, "9999", Decimal::from(10)).unwrap_err();
        assert_eq!(domain_error(&err), Some(&Error::InvalidPin));

        let err = teller.withdraw(&id, "1234", Decimal::from(10)).unwrap_err();
        assert!(matches!(
            domain_error(&err),
            Some(Error::MinimumBalanceViolation { .. })
        ));
    }

    #[test]
    fn test_missing_credentials() {
        let mut teller = teller();
        let id = teller.open_account(AccountType::Current).account_id;
        teller.register_pin(&id, "1234").unwrap();

        let err = teller.deposit("", "1234", Decimal::ONE).unwrap_err();
        assert_eq!(err.to_string(), "Please enter an account number");

        let err = teller.withdraw(&id, "", Decimal::ONE).unwrap_err();
        assert_eq!(err.to_string(), "Please enter your PIN");

        let err = teller.balance("7777", "1234").unwrap_err();
        assert_eq!(err.to_string(), "Account not found: 7777");
        assert!(domain_error(&err).is_none());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 150 ").unwrap(), Decimal::from(150));
        assert_eq!(parse_amount("12.50").unwrap(), Decimal::new(1250, 2));
        assert_eq!(parse_amount("-3").unwrap(), Decimal::from(-3));
        assert_eq!(parse_amount("").unwrap_err().to_string(), "Please enter an amount");
        assert_eq!(parse_amount("ten").unwrap_err().to_string(), "Invalid amount: ten");
    }
}
