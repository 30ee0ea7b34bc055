//! Client error types

use thiserror::Error;

/// Client error type
///
/// The first four variants are the kinds surfaced to the user; the rest are
/// plumbing failures that each component boundary converts into one of the
/// four before handing control back to the session state machine.
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    /// No provider present, or the user rejected account access
    #[error("wallet connection failed: {0}")]
    Connection(String),

    /// An allowance transaction reverted or was rejected
    #[error("token approval failed: {0}")]
    Approval(String),

    /// The pool call reverted, ran out of funds, or was rejected
    #[error("pool action failed: {0}")]
    Action(String),

    /// A post-action read failed; the displayed snapshot stays stale
    #[error("pool state refresh failed: {0}")]
    Refresh(String),

    /// Provider or transport failure
    #[error("RPC error: {0}")]
    Rpc(String),

    /// User input that does not parse as a supported decimal amount
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The settlement wait exceeded the configured outer bound
    #[error("transaction not settled within {0}s")]
    Timeout(u64),

    /// Malformed or incomplete configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;
