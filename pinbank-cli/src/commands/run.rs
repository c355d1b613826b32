//! Run command - execute a teller script
//!
//! One command per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! open savings
//! pin 1001 1234
//! deposit 1001 1234 600
//! withdraw 1001 1234 100
//! balance 1001 1234
//! ```
//!
//! Every script starts from an empty ledger, so ids begin at 1001.

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;

use super::get_context;
use crate::output;
use pinbank_core::services::{parse_amount, TellerService};
use pinbank_core::{AccountType, Error};

/// A parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Open(AccountType),
    Pin { account_id: String, pin: String },
    Balance { account_id: String, pin: String },
    Deposit { account_id: String, pin: String, amount: Decimal },
    Withdraw { account_id: String, pin: String, amount: Decimal },
}

impl ScriptCommand {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = match parts.as_slice() {
            ["open", kind] => {
                let account_type = kind.parse::<AccountType>().map_err(anyhow::Error::msg)?;
                ScriptCommand::Open(account_type)
            }
            ["pin", id, pin] => ScriptCommand::Pin {
                account_id: id.to_string(),
                pin: pin.to_string(),
            },
            ["balance", id, pin] => ScriptCommand::Balance {
                account_id: id.to_string(),
                pin: pin.to_string(),
            },
            ["deposit", id, pin, amount] => ScriptCommand::Deposit {
                account_id: id.to_string(),
                pin: pin.to_string(),
                amount: parse_amount(amount)?,
            },
            ["withdraw", id, pin, amount] => ScriptCommand::Withdraw {
                account_id: id.to_string(),
                pin: pin.to_string(),
                amount: parse_amount(amount)?,
            },
            [verb @ ("open" | "pin" | "balance" | "deposit" | "withdraw"), ..] => {
                bail!("wrong number of arguments for {}", verb)
            }
            [verb, ..] => bail!("unrecognized command: {}", verb),
            [] => return Ok(None),
        };
        Ok(Some(command))
    }

    /// Human-readable form with the PIN masked
    pub fn describe(&self) -> String {
        match self {
            ScriptCommand::Open(kind) => format!("open {}", kind),
            ScriptCommand::Pin { account_id, .. } => format!("pin {} ****", account_id),
            ScriptCommand::Balance { account_id, .. } => format!("balance {} ****", account_id),
            ScriptCommand::Deposit { account_id, amount, .. } => {
                format!("deposit {} **** {}", account_id, amount)
            }
            ScriptCommand::Withdraw { account_id, amount, .. } => {
                format!("withdraw {} **** {}", account_id, amount)
            }
        }
    }

    fn execute(&self, teller: &mut TellerService) -> Result<String> {
        match self {
            ScriptCommand::Open(kind) => Ok(output::opened_message(&teller.open_account(*kind))),
            ScriptCommand::Pin { account_id, pin } => {
                teller.register_pin(account_id, pin)?;
                Ok("PIN registered successfully".to_string())
            }
            ScriptCommand::Balance { account_id, pin } => {
                let receipt = teller.balance(account_id, pin)?;
                Ok(format!("Current balance: {}", receipt.balance))
            }
            ScriptCommand::Deposit { account_id, pin, amount } => {
                let receipt = teller.deposit(account_id, pin, *amount)?;
                Ok(output::transaction_message(&receipt))
            }
            ScriptCommand::Withdraw { account_id, pin, amount } => {
                let receipt = teller.withdraw(account_id, pin, *amount)?;
                Ok(output::transaction_message(&receipt))
            }
        }
    }
}

/// Result of executing one script line
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub line: usize,
    pub command: String,
    pub ok: bool,
    pub message: String,
    /// Domain error kind, when the ledger rejected the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

/// Parse a whole script, numbering lines from 1
pub fn parse_script(content: &str) -> Result<Vec<(usize, ScriptCommand)>> {
    let mut commands = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let parsed = ScriptCommand::parse(line).with_context(|| format!("line {}", line_number))?;
        if let Some(command) = parsed {
            commands.push((line_number, command));
        }
    }
    Ok(commands)
}

/// Execute parsed commands in order. A rejected operation does not stop the script.
pub fn execute_script(
    teller: &mut TellerService,
    commands: &[(usize, ScriptCommand)],
) -> Vec<Outcome> {
    commands
        .iter()
        .map(|(line, command)| match command.execute(teller) {
            Ok(message) => Outcome {
                line: *line,
                command: command.describe(),
                ok: true,
                message,
                error_kind: None,
            },
            Err(e) => Outcome {
                line: *line,
                command: command.describe(),
                ok: false,
                message: e.to_string(),
                error_kind: e.downcast_ref::<Error>().map(Error::kind),
            },
        })
        .collect()
}

pub fn run(file: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read script {:?}", file))?;
    let commands = parse_script(&content)?;
    tracing::debug!(commands = commands.len(), "script parsed");

    let mut ctx = get_context()?;
    let outcomes = execute_script(&mut ctx.teller, &commands);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Line", "Command", "Result"]);
    for outcome in &outcomes {
        let result = if outcome.ok {
            outcome.message.green().to_string()
        } else {
            outcome.message.red().to_string()
        };
        table.add_row(vec![outcome.line.to_string(), outcome.command.clone(), result]);
    }
    println!("{}", table);

    let failed = outcomes.iter().filter(|o| !o.ok).count();
    output::info(&format!(
        "{} commands, {} succeeded, {} rejected",
        outcomes.len(),
        outcomes.len() - failed,
        failed
    ));

    Ok(())
}
