//! Pinbank Core - an in-memory, PIN-gated banking ledger
//!
//! - **domain**: Accounts, their withdrawal rules, and the error taxonomy
//! - **services**: The ledger registry and the teller workflow on top of it
//! - **config**: Teller preferences loaded from `settings.json`
//!
//! Nothing is persisted. A ledger lives as long as the context that owns it.

pub mod config;
pub mod domain;
pub mod services;

use std::path::Path;

use anyhow::Result;

use config::Config;
use services::TellerService;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result as DomainResult};
pub use domain::{Account, AccountKind, AccountType};
pub use services::Ledger;

/// Main context for a pinbank session
///
/// Holds the loaded configuration and the teller, which in turn owns the ledger.
pub struct PinbankContext {
    pub config: Config,
    pub teller: TellerService,
}

impl PinbankContext {
    /// Create a new session context from the pinbank directory
    pub fn new(pinbank_dir: &Path) -> Result<Self> {
        let config = Config::load(pinbank_dir)?;
        Ok(Self::from_config(config))
    }

    /// Create a session context from an already loaded configuration
    pub fn from_config(config: Config) -> Self {
        let teller = TellerService::new(&config);
        Self { config, teller }
    }
}
