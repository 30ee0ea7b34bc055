//! Client SDK for a two-token liquidity pool contract
//!
//! The pool itself lives on chain; this crate only orchestrates calls to it.
//! Provides:
//! - Wallet session management
//! - A typed gateway over the pool and token contracts
//! - Approval-then-action transaction sequencing
//! - Pool state synchronization into display-ready metrics
//! - A session state machine gating all user-triggered operations

pub mod amount;
pub mod app;
pub mod config;
pub mod core;
pub mod gateway;
pub mod rpc;
pub mod sequencer;
pub mod sync;
pub mod testing;
pub mod wallet;

pub use crate::core::error::{ClientError, ClientResult};
pub use crate::core::types::{
    ActionKind, ActionRequest, Address, PendingAction, PoolSnapshot, Session, SessionStatus,
    TxHandle, TxHash,
};
pub use app::PoolApp;
pub use config::{PoolConfig, TokenPair};
pub use gateway::PoolGateway;
pub use wallet::WalletProvider;
