//! Test doubles for the wallet and gateway boundaries
//!
//! `MockWallet` returns a scripted account list; `MockGateway` serves a
//! scripted pool state, records every call in order, and can be primed to
//! fail at any suspension point. Both are plain in-memory fakes: no
//! network, no chain.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::{PoolConfig, TokenPair};
use crate::core::error::{ClientError, ClientResult};
use crate::core::types::{Address, TxHandle, TxHash};
use crate::gateway::PoolGateway;
use crate::wallet::WalletProvider;

/// Deterministic test address built from a single tag byte
pub fn test_address(tag: u8) -> Address {
    Address([tag; 20])
}

/// Pool configuration wired to deterministic test addresses
pub fn test_config() -> PoolConfig {
    PoolConfig {
        rpc_url: "http://localhost:8545".to_string(),
        pool_address: test_address(0xF0).to_string(),
        tokens: TokenPair {
            token_a: test_address(0xA1).to_string(),
            token_b: test_address(0xB2).to_string(),
            symbol_a: "TK1".to_string(),
            symbol_b: "TK2".to_string(),
        },
        settle_timeout_secs: 5,
        receipt_poll_ms: 10,
    }
}

/// Wallet provider returning a scripted account list
pub struct MockWallet {
    accounts: Vec<Address>,
    error: Option<String>,
}

impl MockWallet {
    /// Provider exposing a single account
    pub fn with_account(account: Address) -> Self {
        Self {
            accounts: vec![account],
            error: None,
        }
    }

    /// Provider with no unlocked accounts
    pub fn empty() -> Self {
        Self {
            accounts: Vec::new(),
            error: None,
        }
    }

    /// Provider whose access request fails (user rejection, no provider)
    pub fn rejecting(message: &str) -> Self {
        Self {
            accounts: Vec::new(),
            error: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> ClientResult<Vec<Address>> {
        match &self.error {
            Some(message) => Err(ClientError::Connection(message.clone())),
            None => Ok(self.accounts.clone()),
        }
    }
}

/// One recorded gateway call, in submission order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayCall {
    GetReserves,
    TotalShares,
    SharesOf(Address),
    Approve {
        token: Address,
        spender: Address,
        amount: u128,
    },
    Swap {
        amount: u128,
        a_to_b: bool,
    },
    AddLiquidity {
        amount_a: u128,
        amount_b: u128,
    },
    RemoveLiquidity {
        amount: u128,
    },
    WaitForSettlement(TxHash),
}

/// Suspension points the mock can be primed to fail at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailPoint {
    ApproveSubmit,
    ApproveSettle,
    ActionSubmit,
    ActionSettle,
    Reserves,
    TotalShares,
    UserShares,
}

/// Scripted in-memory pool gateway
pub struct MockGateway {
    reserves: Mutex<(u128, u128)>,
    total_shares: Mutex<u128>,
    user_shares: Mutex<u128>,
    calls: Mutex<Vec<GatewayCall>>,
    failures: Mutex<HashSet<FailPoint>>,
    counter: AtomicU64,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::with_pool_state(0, 0, 0, 0)
    }

    /// Gateway serving fixed reserves and share balances, in human units
    pub fn with_pool_state(reserve_a: u64, reserve_b: u64, total: u64, user: u64) -> Self {
        let scale = crate::core::constants::BASE_UNIT_SCALE;
        Self {
            reserves: Mutex::new((reserve_a as u128 * scale, reserve_b as u128 * scale)),
            total_shares: Mutex::new(total as u128 * scale),
            user_shares: Mutex::new(user as u128 * scale),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashSet::new()),
            counter: AtomicU64::new(0),
        }
    }

    /// Prime one suspension point to fail on every subsequent call
    pub fn fail_at(&self, point: FailPoint) {
        self.failures.lock().unwrap().insert(point);
    }

    /// Remove a primed failure
    pub fn recover(&self, point: FailPoint) {
        self.failures.lock().unwrap().remove(&point);
    }

    /// Every call recorded so far, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget recorded calls (primed failures stay)
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Number of recorded calls matching a predicate
    pub fn count_calls(&self, matches: impl Fn(&GatewayCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn should_fail(&self, point: FailPoint) -> bool {
        self.failures.lock().unwrap().contains(&point)
    }

    fn next_handle(&self, prefix: &str) -> TxHandle {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        TxHandle {
            hash: TxHash(format!("{prefix}-{n}")),
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PoolGateway for MockGateway {
    async fn get_reserves(&self) -> ClientResult<(u128, u128)> {
        self.record(GatewayCall::GetReserves);
        if self.should_fail(FailPoint::Reserves) {
            return Err(ClientError::Rpc("scripted reserve read failure".to_string()));
        }
        Ok(*self.reserves.lock().unwrap())
    }

    async fn total_shares(&self) -> ClientResult<u128> {
        self.record(GatewayCall::TotalShares);
        if self.should_fail(FailPoint::TotalShares) {
            return Err(ClientError::Rpc("scripted share read failure".to_string()));
        }
        Ok(*self.total_shares.lock().unwrap())
    }

    async fn shares_of(&self, account: &Address) -> ClientResult<u128> {
        self.record(GatewayCall::SharesOf(*account));
        if self.should_fail(FailPoint::UserShares) {
            return Err(ClientError::Rpc("scripted share read failure".to_string()));
        }
        Ok(*self.user_shares.lock().unwrap())
    }

    async fn approve(
        &self,
        _from: &Address,
        token: &Address,
        spender: &Address,
        amount: u128,
    ) -> ClientResult<TxHandle> {
        self.record(GatewayCall::Approve {
            token: *token,
            spender: *spender,
            amount,
        });
        if self.should_fail(FailPoint::ApproveSubmit) {
            return Err(ClientError::Rpc("scripted approve rejection".to_string()));
        }
        Ok(self.next_handle("approve"))
    }

    async fn swap(&self, _from: &Address, amount: u128, a_to_b: bool) -> ClientResult<TxHandle> {
        self.record(GatewayCall::Swap { amount, a_to_b });
        if self.should_fail(FailPoint::ActionSubmit) {
            return Err(ClientError::Rpc("scripted swap rejection".to_string()));
        }
        Ok(self.next_handle("action"))
    }

    async fn add_liquidity(
        &self,
        _from: &Address,
        amount_a: u128,
        amount_b: u128,
    ) -> ClientResult<TxHandle> {
        self.record(GatewayCall::AddLiquidity { amount_a, amount_b });
        if self.should_fail(FailPoint::ActionSubmit) {
            return Err(ClientError::Rpc(
                "scripted add-liquidity rejection".to_string(),
            ));
        }
        Ok(self.next_handle("action"))
    }

    async fn remove_liquidity(&self, _from: &Address, amount: u128) -> ClientResult<TxHandle> {
        self.record(GatewayCall::RemoveLiquidity { amount });
        if self.should_fail(FailPoint::ActionSubmit) {
            return Err(ClientError::Rpc(
                "scripted remove-liquidity rejection".to_string(),
            ));
        }
        Ok(self.next_handle("action"))
    }

    async fn wait_for_settlement(&self, tx: &TxHandle) -> ClientResult<()> {
        self.record(GatewayCall::WaitForSettlement(tx.hash.clone()));
        let is_approval = tx.hash.0.starts_with("approve");
        if is_approval && self.should_fail(FailPoint::ApproveSettle) {
            return Err(ClientError::Rpc(format!("transaction {} reverted", tx.hash)));
        }
        if !is_approval && self.should_fail(FailPoint::ActionSettle) {
            return Err(ClientError::Rpc(format!("transaction {} reverted", tx.hash)));
        }
        Ok(())
    }
}
