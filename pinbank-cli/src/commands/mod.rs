//! CLI command implementations

pub mod config;
pub mod run;
pub mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use pinbank_core::PinbankContext;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// The filter comes from `PINBANK_LOG` (e.g. `PINBANK_LOG=debug`) and defaults
/// to warnings only, so a normal session stays quiet.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("PINBANK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Get the pinbank directory from environment or default
pub fn get_pinbank_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PINBANK_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pinbank")
    }
}

/// Create a session context with a fresh ledger
pub fn get_context() -> Result<PinbankContext> {
    let pinbank_dir = get_pinbank_dir();
    PinbankContext::new(&pinbank_dir)
        .with_context(|| format!("Failed to load settings from {:?}", pinbank_dir))
}
