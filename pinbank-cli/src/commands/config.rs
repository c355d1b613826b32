//! Config command - show the effective configuration

use anyhow::Result;
use colored::Colorize;

use super::get_pinbank_dir;
use crate::output;
use pinbank_core::config::Config;

pub fn run(json: bool) -> Result<()> {
    let pinbank_dir = get_pinbank_dir();
    let config = Config::load(&pinbank_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Teller Configuration".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Settings", &pinbank_dir.join("settings.json").display().to_string()]);
    table.add_row(vec!["Minimum PIN length", &config.min_pin_length.to_string()]);
    table.add_row(vec!["Mask PIN input", &config.mask_pin_input.to_string()]);
    println!("{}", table);

    Ok(())
}
