//! Integration tests for the teller workflow and configuration loading
//!
//! Configuration is read from a temporary directory so nothing touches the
//! user's real settings.

use rust_decimal::Decimal;
use tempfile::TempDir;

use pinbank_core::config::Config;
use pinbank_core::services::{parse_amount, TransactionKind};
use pinbank_core::{AccountType, Error, PinbankContext};

fn write_settings(dir: &TempDir, json: &str) {
    std::fs::write(dir.path().join("settings.json"), json).unwrap();
}

#[test]
fn test_context_without_settings_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = PinbankContext::new(temp_dir.path()).unwrap();
    assert_eq!(ctx.config.min_pin_length, 4);
    assert!(ctx.config.mask_pin_input);
    assert_eq!(ctx.teller.min_pin_length(), 4);
}

#[test]
fn test_context_reads_teller_settings() {
    let temp_dir = TempDir::new().unwrap();
    write_settings(&temp_dir, r#"{ "teller": { "minPinLength": 6, "maskPinInput": false } }"#);

    let mut ctx = PinbankContext::new(temp_dir.path()).unwrap();
    assert!(!ctx.config.mask_pin_input);

    let id = ctx.teller.open_account(AccountType::Savings).account_id;
    let err = ctx.teller.register_pin(&id, "1234").unwrap_err();
    assert_eq!(err.to_string(), "PIN must be at least 6 digits");
}

#[test]
fn test_malformed_settings_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    write_settings(&temp_dir, "{ not json");

    let config = Config::load(temp_dir.path()).unwrap();
    assert_eq!(config.min_pin_length, 4);
}

#[test]
fn test_save_preserves_unmanaged_settings() {
    let temp_dir = TempDir::new().unwrap();
    write_settings(&temp_dir, r#"{ "theme": "dark", "teller": { "minPinLength": 5 } }"#);

    let mut config = Config::load(temp_dir.path()).unwrap();
    assert_eq!(config.min_pin_length, 5);
    config.min_pin_length = 8;
    config.save(temp_dir.path()).unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("settings.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["theme"], "dark");
    assert_eq!(json["teller"]["minPinLength"], 8);

    let reloaded = Config::load(temp_dir.path()).unwrap();
    assert_eq!(reloaded.min_pin_length, 8);
}

#[test]
fn test_full_teller_session() {
    let mut ctx = PinbankContext::from_config(Config::default());
    let teller = &mut ctx.teller;

    let savings = teller.open_account(AccountType::Savings).account_id;
    let current = teller.open_account(AccountType::Current).account_id;
    assert_eq!((savings.as_str(), current.as_str()), ("1001", "1002"));

    teller.register_pin(&savings, "1111").unwrap();
    teller.register_pin(&current, "2222").unwrap();

    let receipt = teller.deposit(&savings, "1111", parse_amount("600").unwrap()).unwrap();
    assert_eq!(receipt.balance, Decimal::from(600));

    let err = teller.withdraw(&savings, "1111", parse_amount("150").unwrap()).unwrap_err();
    assert_eq!(err.to_string(), "Cannot withdraw: Minimum balance of 500 required");

    let receipt = teller.withdraw(&current, "2222", parse_amount("1000").unwrap()).unwrap();
    assert_eq!(receipt.kind, TransactionKind::Withdrawal);
    assert_eq!(receipt.balance, Decimal::from(-1000));

    let err = teller.withdraw(&current, "2222", Decimal::ONE).unwrap_err();
    assert_eq!(
        err.downcast_ref::<Error>(),
        Some(&Error::OverdraftLimitExceeded { limit: Decimal::from(1000) })
    );

    // Each account only answers to its own PIN
    let err = teller.balance(&savings, "2222").unwrap_err();
    assert_eq!(err.downcast_ref::<Error>(), Some(&Error::InvalidPin));

    assert_eq!(teller.balance(&savings, "1111").unwrap().balance, Decimal::from(600));
    assert_eq!(ctx.teller.ledger().account(&current).unwrap().account_type(), AccountType::Current);
}

#[test]
fn test_receipts_serialize_amounts_as_strings() {
    let mut ctx = PinbankContext::from_config(Config::default());
    let id = ctx.teller.open_account(AccountType::Current).account_id;
    ctx.teller.register_pin(&id, "9090").unwrap();

    let receipt = ctx.teller.deposit(&id, "9090", Decimal::new(1250, 2)).unwrap();
    let json = serde_json::to_value(&receipt).unwrap();
    assert_eq!(json["kind"], "deposit");
    assert_eq!(json["amount"], "12.50");
    assert_eq!(json["balance"], "12.50");
    assert_eq!(json["account_id"], "1001");
}
