//! Session command - interactive teller
//!
//! Mirrors a counter screen: open an account, register its PIN, then check the
//! balance, deposit, or withdraw. Rejected operations are shown and the
//! session carries on. The ledger is dropped when the session ends.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password, Select};

use super::get_context;
use crate::output;
use pinbank_core::services::parse_amount;
use pinbank_core::{AccountType, PinbankContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    OpenSavings,
    OpenCurrent,
    RegisterPin,
    ViewBalance,
    Deposit,
    Withdraw,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 7] = [
        MenuAction::OpenSavings,
        MenuAction::OpenCurrent,
        MenuAction::RegisterPin,
        MenuAction::ViewBalance,
        MenuAction::Deposit,
        MenuAction::Withdraw,
        MenuAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuAction::OpenSavings => "Open Savings Account",
            MenuAction::OpenCurrent => "Open Current Account",
            MenuAction::RegisterPin => "Register PIN",
            MenuAction::ViewBalance => "View Balance",
            MenuAction::Deposit => "Deposit",
            MenuAction::Withdraw => "Withdraw",
            MenuAction::Quit => "Quit",
        }
    }
}

struct Session {
    ctx: PinbankContext,
    /// Last account opened or used, offered as the default account number
    active_account: Option<String>,
}

pub fn run() -> Result<()> {
    let mut session = Session {
        ctx: get_context()?,
        active_account: None,
    };

    println!("{}", "Banking System".bold());
    println!();

    let labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();
    loop {
        if let Some(id) = &session.active_account {
            println!("Active account: {}", id.cyan());
        }

        let selection = Select::new()
            .with_prompt("Choose an action")
            .items(&labels)
            .default(0)
            .interact()?;
        let action = MenuAction::ALL[selection];
        if action == MenuAction::Quit {
            break;
        }

        if let Err(e) = session.handle(action) {
            output::error(&e.to_string());
        }
        println!();
    }

    Ok(())
}

impl Session {
    fn handle(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::OpenSavings => self.open(AccountType::Savings),
            MenuAction::OpenCurrent => self.open(AccountType::Current),
            MenuAction::RegisterPin => {
                let account_id = self.prompt_account()?;
                self.register_pin(&account_id)
            }
            MenuAction::ViewBalance => {
                let account_id = self.prompt_account()?;
                let pin = self.prompt_pin()?;
                let receipt = self.ctx.teller.balance(&account_id, &pin)?;
                output::success(&format!("Current balance: {}", receipt.balance));
                Ok(())
            }
            MenuAction::Deposit => {
                let account_id = self.prompt_account()?;
                let pin = self.prompt_pin()?;
                let amount = parse_amount(&prompt_amount()?)?;
                let receipt = self.ctx.teller.deposit(&account_id, &pin, amount)?;
                output::success(&output::transaction_message(&receipt));
                Ok(())
            }
            MenuAction::Withdraw => {
                let account_id = self.prompt_account()?;
                let pin = self.prompt_pin()?;
                let amount = parse_amount(&prompt_amount()?)?;
                let receipt = self.ctx.teller.withdraw(&account_id, &pin, amount)?;
                output::success(&output::transaction_message(&receipt));
                Ok(())
            }
            MenuAction::Quit => Ok(()),
        }
    }

    fn open(&mut self, account_type: AccountType) -> Result<()> {
        let opened = self.ctx.teller.open_account(account_type);
        output::success(&format!(
            "{} Please register your PIN.",
            output::opened_message(&opened)
        ));
        self.active_account = Some(opened.account_id.clone());
        self.register_pin(&opened.account_id)
    }

    fn register_pin(&mut self, account_id: &str) -> Result<()> {
        output::info(&format!(
            "Choose a PIN of at least {} digits",
            self.ctx.teller.min_pin_length()
        ));
        let pin = self.prompt_pin()?;
        self.ctx.teller.register_pin(account_id, &pin)?;
        output::success("PIN registered successfully! You can now perform transactions.");
        Ok(())
    }

    fn prompt_account(&mut self) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt("Account number")
            .allow_empty(true);
        if let Some(id) = &self.active_account {
            input = input.default(id.clone());
        }
        let account_id = input.interact_text()?.trim().to_string();

        if self.ctx.teller.is_pin_registered(&account_id).is_some() {
            self.active_account = Some(account_id.clone());
        }
        Ok(account_id)
    }

    fn prompt_pin(&self) -> Result<String> {
        let pin = if self.ctx.config.mask_pin_input {
            Password::new()
                .with_prompt("PIN")
                .allow_empty_password(true)
                .interact()?
        } else {
            Input::<String>::new()
                .with_prompt("PIN")
                .allow_empty(true)
                .interact_text()?
        };
        Ok(pin)
    }
}

fn prompt_amount() -> Result<String> {
    let amount = Input::<String>::new()
        .with_prompt("Amount")
        .allow_empty(true)
        .interact_text()?;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_covers_every_action_once() {
        let labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();
        let mut deduped = labels.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), labels.len());
        assert_eq!(MenuAction::ALL.last(), Some(&MenuAction::Quit));
    }
}
