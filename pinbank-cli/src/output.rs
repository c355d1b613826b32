//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use pinbank_core::services::{OpenedAccount, TransactionKind, TransactionReceipt};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn opened_message(opened: &OpenedAccount) -> String {
    format!(
        "Successfully opened {} account. Your account number is: {}.",
        opened.kind, opened.account_id
    )
}

pub fn transaction_message(receipt: &TransactionReceipt) -> String {
    let verb = match receipt.kind {
        TransactionKind::Deposit => "deposited",
        TransactionKind::Withdrawal => "withdrawn",
    };
    format!(
        "Successfully {} {}. New balance: {}",
        verb, receipt.amount, receipt.balance
    )
}
