//! Configuration management
//!
//! Settings live in `settings.json` inside the pinbank directory:
//! ```json
//! {
//!   "teller": { "minPinLength": 4, "maskPinInput": true }
//! }
//! ```
//! Only teller preferences are stored here. Account data is never written to disk.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Minimum PIN length accepted at registration unless configured otherwise
pub const DEFAULT_MIN_PIN_LENGTH: usize = 4;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    teller: TellerSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TellerSettings {
    #[serde(default = "default_min_pin_length")]
    min_pin_length: usize,
    #[serde(default = "default_true")]
    mask_pin_input: bool,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for TellerSettings {
    fn default() -> Self {
        Self {
            min_pin_length: DEFAULT_MIN_PIN_LENGTH,
            mask_pin_input: true,
            other: HashMap::new(),
        }
    }
}

fn default_min_pin_length() -> usize {
    DEFAULT_MIN_PIN_LENGTH
}

fn default_true() -> bool {
    true
}

/// Pinbank configuration (simplified view of settings)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub min_pin_length: usize,
    pub mask_pin_input: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_pin_length: DEFAULT_MIN_PIN_LENGTH,
            mask_pin_input: true,
        }
    }
}

impl Config {
    /// Load config from the pinbank directory
    ///
    /// A missing or unreadable settings file yields the defaults. The
    /// environment variables `PINBANK_MIN_PIN_LENGTH` and `PINBANK_MASK_PIN`
    /// override the file.
    pub fn load(pinbank_dir: &Path) -> Result<Self> {
        let raw = read_settings(pinbank_dir)?;

        let min_pin_length = match std::env::var("PINBANK_MIN_PIN_LENGTH") {
            Ok(value) => value
                .trim()
                .parse::<usize>()
                .with_context(|| format!("PINBANK_MIN_PIN_LENGTH is not a number: {value}"))?,
            Err(_) => raw.teller.min_pin_length,
        };

        let mask_pin_input = match std::env::var("PINBANK_MASK_PIN").ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.teller.mask_pin_input,
        };

        tracing::debug!(min_pin_length, mask_pin_input, "config loaded");

        Ok(Self {
            min_pin_length,
            mask_pin_input,
        })
    }

    /// Save config to the pinbank directory
    /// Preserves other settings that pinbank doesn't manage
    pub fn save(&self, pinbank_dir: &Path) -> Result<()> {
        let settings_path = pinbank_dir.join("settings.json");

        let mut settings = read_settings(pinbank_dir)?;
        settings.teller.min_pin_length = self.min_pin_length;
        settings.teller.mask_pin_input = self.mask_pin_input;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {}", settings_path.display()))?;
        Ok(())
    }
}

fn read_settings(pinbank_dir: &Path) -> Result<SettingsFile> {
    let settings_path = pinbank_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "settings.json is malformed, using defaults");
        SettingsFile::default()
    }))
}
