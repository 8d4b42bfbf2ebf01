use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{Result, SignerError};
use crate::types::Address;

/// IDEX exchange contract on Ethereum mainnet
pub const IDEX_MAINNET_CONTRACT: Address = Address([
    0x2a, 0x0c, 0x0d, 0xbe, 0xcc, 0x7e, 0x4d, 0x65, 0x8f, 0x48, 0xe0, 0x1e, 0x3f, 0xa3, 0x53, 0xf4,
    0x40, 0x50, 0xc2, 0x08,
]);

/// ETH decimals
pub const NATIVE_DECIMALS: u8 = 18;

/// Value of the `expires` order field. The contract ignores it but still
/// hashes it, so it must stay 1.
pub const ORDER_EXPIRES: u64 = 1;

/// Exchange-wide constants that go into every signed tuple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_contract_address")]
    pub contract_address: Address,
    /// Placeholder token address standing for ETH
    #[serde(default)]
    pub native_asset_address: Address,
    #[serde(default = "default_native_decimals")]
    pub native_decimals: u8,
    #[serde(skip_deserializing, default = "default_expires")]
    pub expires: u64,
}

fn default_contract_address() -> Address {
    IDEX_MAINNET_CONTRACT
}

fn default_native_decimals() -> u8 {
    NATIVE_DECIMALS
}

fn default_expires() -> u64 {
    ORDER_EXPIRES
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            contract_address: IDEX_MAINNET_CONTRACT,
            native_asset_address: Address::ZERO,
            native_decimals: NATIVE_DECIMALS,
            expires: ORDER_EXPIRES,
        }
    }
}

impl ExchangeConfig {
    /// Parse a JSON config; missing fields fall back to mainnet defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded exchange config from {} (contract {})",
            path.as_ref().display(),
            config.contract_address
        );
        Ok(config)
    }

    /// Mainnet defaults overridden by `IDEX_CONTRACT_ADDRESS`,
    /// `IDEX_NATIVE_ASSET_ADDRESS` and `IDEX_NATIVE_DECIMALS` (a `.env` file
    /// is read first if present)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Ok(value) = env::var("IDEX_CONTRACT_ADDRESS") {
            config.contract_address = value.parse()?;
        }
        if let Ok(value) = env::var("IDEX_NATIVE_ASSET_ADDRESS") {
            config.native_asset_address = value.parse()?;
        }
        if let Ok(value) = env::var("IDEX_NATIVE_DECIMALS") {
            config.native_decimals = value.trim().parse().map_err(|e| {
                SignerError::Config(format!("IDEX_NATIVE_DECIMALS '{}': {}", value, e))
            })?;
        }

        Ok(config)
    }
}
