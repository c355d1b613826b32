//! Account domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Balance floor shared by every savings account
pub const SAVINGS_MINIMUM_BALANCE: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Overdraft ceiling given to every new current account
pub const CURRENT_OVERDRAFT_LIMIT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Which kind of account to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Savings,
    Current,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Current => "current",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Ok(AccountType::Savings),
            "current" => Ok(AccountType::Current),
            other => Err(format!("unknown account type: {other}")),
        }
    }
}

/// Withdrawal policy carried by an account
///
/// Savings accounts share a type-level floor; current accounts carry their own
/// overdraft limit, fixed when the account is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Current { overdraft_limit: Decimal },
}

impl AccountKind {
    /// Kind used for a freshly opened account of the given type
    pub fn for_type(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Savings => AccountKind::Savings,
            AccountType::Current => AccountKind::Current {
                overdraft_limit: CURRENT_OVERDRAFT_LIMIT,
            },
        }
    }

    pub fn account_type(&self) -> AccountType {
        match self {
            AccountKind::Savings => AccountType::Savings,
            AccountKind::Current { .. } => AccountType::Current,
        }
    }

    /// Check that `balance - amount` stays within this kind's limit.
    /// Returns the resulting balance.
    fn check_withdrawal(&self, balance: Decimal, amount: Decimal) -> Result<Decimal> {
        let remaining = balance.checked_sub(amount).ok_or(Error::InvalidAmount)?;
        match self {
            AccountKind::Savings => {
                if remaining < SAVINGS_MINIMUM_BALANCE {
                    return Err(Error::MinimumBalanceViolation {
                        minimum: SAVINGS_MINIMUM_BALANCE,
                    });
                }
            }
            AccountKind::Current { overdraft_limit } => {
                if remaining < -*overdraft_limit {
                    return Err(Error::OverdraftLimitExceeded {
                        limit: *overdraft_limit,
                    });
                }
            }
        }
        Ok(remaining)
    }
}

/// A PIN-protected account held by a [`crate::services::Ledger`]
///
/// Accounts are only constructed by the ledger. Every balance read or change
/// goes through the PIN check first, and a failed call leaves the account
/// untouched.
pub struct Account {
    id: String,
    kind: AccountKind,
    balance: Decimal,
    pin: Option<String>,
    opened_at: DateTime<Utc>,
}

impl Account {
    pub(crate) fn new(id: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: id.into(),
            kind,
            balance: Decimal::ZERO,
            pin: None,
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn is_pin_registered(&self) -> bool {
        self.pin.is_some()
    }

    /// Register the account PIN. This can happen exactly once.
    ///
    /// An empty PIN is rejected with [`Error::InvalidPin`]; it would otherwise
    /// leave the account looking unregistered.
    pub fn register_pin(&mut self, pin: &str) -> Result<()> {
        if self.pin.is_some() {
            return Err(Error::AlreadyRegistered);
        }
        if pin.is_empty() {
            return Err(Error::InvalidPin);
        }
        self.pin = Some(pin.to_string());
        Ok(())
    }

    /// Plain string comparison. No hashing and no attempt limit.
    fn validate_pin(&self, pin: &str) -> Result<bool> {
        match &self.pin {
            None => Err(Error::NotRegistered),
            Some(stored) => Ok(stored == pin),
        }
    }

    fn authorize(&self, pin: &str) -> Result<()> {
        if self.validate_pin(pin)? {
            Ok(())
        } else {
            Err(Error::InvalidPin)
        }
    }

    /// Shared pre-validation for deposits and withdrawals
    fn validate_transaction(&self, amount: Decimal, pin: &str) -> Result<()> {
        self.authorize(pin)?;
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount);
        }
        Ok(())
    }

    pub fn balance(&self, pin: &str) -> Result<Decimal> {
        self.authorize(pin)?;
        Ok(self.balance)
    }

    pub fn deposit(&mut self, amount: Decimal, pin: &str) -> Result<()> {
        self.validate_transaction(amount, pin)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal, pin: &str) -> Result<()> {
        self.validate_transaction(amount, pin)?;
        self.balance = self.kind.check_withdrawal(self.balance, amount)?;
        Ok(())
    }
}

// Hand-written so the PIN and balance never end up in logs.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("pin_registered", &self.pin.is_some())
            .field("opened_at", &self.opened_at)
            .finish_non_exhaustive()
    }
}
