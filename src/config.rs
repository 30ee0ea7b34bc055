//! Client configuration
//!
//! Everything here is deployment metadata consumed by the client: the pool
//! address, the token pair it trades, and the RPC endpoint. Nothing is
//! produced or persisted by the core.

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_RECEIPT_POLL_MS, DEFAULT_SETTLE_TIMEOUT_SECS};
use crate::core::error::{ClientError, ClientResult};
use crate::core::types::Address;

/// Descriptor for the pool's token pair
///
/// The core is parameterized by this descriptor; any front end derives its
/// field labels from the symbols configured here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub token_a: String,
    pub token_b: String,
    pub symbol_a: String,
    pub symbol_b: String,
}

/// Configuration for connecting to a deployed pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// Deployed pool contract address
    pub pool_address: String,
    /// Token pair the pool trades
    pub tokens: TokenPair,
    /// Outer bound on settlement waits, in seconds
    pub settle_timeout_secs: u64,
    /// Receipt polling interval, in milliseconds
    pub receipt_poll_ms: u64,
}

impl PoolConfig {
    /// Configuration for a local development node
    pub fn localnet(pool_address: &str) -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            pool_address: pool_address.to_string(),
            tokens: TokenPair {
                token_a: "0x50E00bC33d107108D935B07EF7D82594651B1968".to_string(),
                token_b: "0x3070ef83F647838DB86f276c7D9E58B83559a788".to_string(),
                symbol_a: "TK1".to_string(),
                symbol_b: "TK2".to_string(),
            },
            settle_timeout_secs: DEFAULT_SETTLE_TIMEOUT_SECS,
            receipt_poll_ms: DEFAULT_RECEIPT_POLL_MS,
        }
    }

    pub fn with_rpc_url(mut self, url: &str) -> Self {
        self.rpc_url = url.to_string();
        self
    }

    pub fn with_tokens(mut self, tokens: TokenPair) -> Self {
        self.tokens = tokens;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("read {path}: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("parse {path}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> ClientResult<()> {
        if self.rpc_url.is_empty() {
            return Err(ClientError::Config("rpc_url cannot be empty".to_string()));
        }
        if self.settle_timeout_secs == 0 {
            return Err(ClientError::Config("settle_timeout_secs must be non-zero".to_string()));
        }
        self.pool()?;
        self.token_a()?;
        self.token_b()?;
        Ok(())
    }

    /// Parsed pool contract address
    pub fn pool(&self) -> ClientResult<Address> {
        self.pool_address.parse()
    }

    /// Parsed token A address
    pub fn token_a(&self) -> ClientResult<Address> {
        self.tokens.token_a.parse()
    }

    /// Parsed token B address
    pub fn token_b(&self) -> ClientResult<Address> {
        self.tokens.token_b.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localnet_defaults_validate() {
        let config = PoolConfig::localnet("0x00112233445566778899aabbccddeeff00112233");
        assert!(config.validate().is_ok());
        assert_eq!(config.tokens.symbol_a, "TK1");
    }

    #[test]
    fn validation_rejects_bad_addresses() {
        let config = PoolConfig::localnet("not-an-address");
        assert!(config.validate().is_err());

        let mut config = PoolConfig::localnet("0x00112233445566778899aabbccddeeff00112233");
        config.tokens.token_b = "0xdead".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_zero_timeout() {
        let mut config = PoolConfig::localnet("0x00112233445566778899aabbccddeeff00112233");
        config.settle_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
