//! Type definitions for the pool client

use std::fmt;
use std::str::FromStr;

use crate::core::error::ClientError;

/// 20-byte account or contract address
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw)
            .map_err(|e| ClientError::Config(format!("invalid address {s}: {e}")))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| ClientError::Config(format!("invalid address length: {s}")))?;
        Ok(Address(bytes))
    }
}

/// Hash identifying a submitted transaction, as returned by the provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a submitted on-chain operation
///
/// A handle reaches exactly one of two terminal outcomes, settled or failed;
/// a provider timeout counts as failed. Nothing in between is retained.
#[derive(Clone, Debug)]
pub struct TxHandle {
    pub hash: TxHash,
}

/// Wallet connection status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
}

/// Wallet/contract session state
///
/// Created on startup, mutated only by the wallet session manager, and
/// never persisted beyond the process.
#[derive(Clone, Debug)]
pub struct Session {
    pub status: SessionStatus,
    pub account: Option<Address>,
    pub error: Option<String>,
}

impl Session {
    pub fn disconnected() -> Self {
        Self {
            status: SessionStatus::Disconnected,
            account: None,
            error: None,
        }
    }

    pub fn connecting() -> Self {
        Self {
            status: SessionStatus::Connecting,
            account: None,
            error: None,
        }
    }

    pub fn connected(account: Address) -> Self {
        Self {
            status: SessionStatus::Connected,
            account: Some(account),
            error: None,
        }
    }

    /// A failed connection attempt: back to Disconnected with the error
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: SessionStatus::Disconnected,
            account: None,
            error: Some(message.into()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == SessionStatus::Connected
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::disconnected()
    }
}

/// Display-ready pool metrics
///
/// Recomputed wholesale on every refresh, never partially patched; stale
/// between refreshes.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolSnapshot {
    pub reserve_a: String,
    pub reserve_b: String,
    pub total_shares: String,
    pub user_shares: String,
    /// 0.00–100.00, two decimals
    pub share_percent: String,
}

impl Default for PoolSnapshot {
    fn default() -> Self {
        Self {
            reserve_a: "0".to_string(),
            reserve_b: "0".to_string(),
            total_shares: "0".to_string(),
            user_shares: "0".to_string(),
            share_percent: "0.00".to_string(),
        }
    }
}

/// User-facing pool operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Swap,
    AddLiquidity,
    RemoveLiquidity,
}

impl ActionKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ActionKind::Swap => "swap",
            ActionKind::AddLiquidity => "add liquidity",
            ActionKind::RemoveLiquidity => "remove liquidity",
        }
    }
}

/// Command object describing a requested pool operation
///
/// Amounts are human-unit decimal strings exactly as entered by the user;
/// conversion to base units happens when the request is planned.
#[derive(Clone, Debug)]
pub enum ActionRequest {
    Swap { amount: String, a_to_b: bool },
    AddLiquidity { amount_a: String, amount_b: String },
    RemoveLiquidity { amount: String },
}

impl ActionRequest {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::Swap { .. } => ActionKind::Swap,
            ActionRequest::AddLiquidity { .. } => ActionKind::AddLiquidity,
            ActionRequest::RemoveLiquidity { .. } => ActionKind::RemoveLiquidity,
        }
    }

    /// User-entered input fields, in submission order
    pub fn inputs(&self) -> Vec<&str> {
        match self {
            ActionRequest::Swap { amount, .. } => vec![amount],
            ActionRequest::AddLiquidity { amount_a, amount_b } => vec![amount_a, amount_b],
            ActionRequest::RemoveLiquidity { amount } => vec![amount],
        }
    }
}

/// State of one user-triggered action kind
///
/// One instance exists per kind; at most one instance across the whole
/// session holds `busy` at a time (the gate is global, not per-kind).
#[derive(Clone, Debug)]
pub struct PendingAction {
    pub kind: ActionKind,
    /// The request currently or last in flight; cleared on success
    pub request: Option<ActionRequest>,
    pub busy: bool,
    pub error: Option<String>,
}

impl PendingAction {
    pub fn idle(kind: ActionKind) -> Self {
        Self {
            kind,
            request: None,
            busy: false,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_round_trips_through_display() {
        let addr: Address = "0x50E00bC33d107108D935B07EF7D82594651B1968".parse().unwrap();
        assert_eq!(addr.to_string(), "0x50e00bc33d107108d935b07ef7d82594651b1968");
        let again: Address = addr.to_string().parse().unwrap();
        assert_eq!(addr, again);
    }

    #[test]
    fn address_rejects_bad_input() {
        assert!("0x1234".parse::<Address>().is_err());
        assert!("not-an-address".parse::<Address>().is_err());
        assert!("".parse::<Address>().is_err());
    }

    #[test]
    fn session_failed_returns_to_disconnected() {
        let session = Session::failed("user rejected the request");
        assert_eq!(session.status, SessionStatus::Disconnected);
        assert!(session.account.is_none());
        assert_eq!(session.error.as_deref(), Some("user rejected the request"));
    }
}
