//! Session state machine and command dispatch
//!
//! `PoolApp` is the single owner of session, snapshot, and action state.
//! User intent arrives as [`ActionRequest`] command objects; every state
//! mutation flows through the transition methods here, and the `&mut self`
//! receivers serialize whole action flows, so the busy check-and-set is
//! atomic with respect to the cooperative scheduler.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::PoolConfig;
use crate::core::error::ClientResult;
use crate::core::types::{
    ActionKind, ActionRequest, Address, PendingAction, PoolSnapshot, Session, SessionStatus,
};
use crate::gateway::PoolGateway;
use crate::sequencer::{self, ActionPlan};
use crate::sync;
use crate::wallet::{SessionManager, WalletProvider};

/// Single authoritative holder of the client's in-memory state
pub struct PoolApp<W: WalletProvider, G: PoolGateway> {
    wallet: SessionManager<W>,
    gateway: G,
    config: PoolConfig,
    session: Session,
    snapshot: PoolSnapshot,
    actions: HashMap<ActionKind, PendingAction>,
    refresh_error: Option<String>,
}

impl<W: WalletProvider, G: PoolGateway> PoolApp<W, G> {
    pub fn new(provider: W, gateway: G, config: PoolConfig) -> ClientResult<Self> {
        config.validate()?;
        let actions = [
            ActionKind::Swap,
            ActionKind::AddLiquidity,
            ActionKind::RemoveLiquidity,
        ]
        .into_iter()
        .map(|kind| (kind, PendingAction::idle(kind)))
        .collect();

        Ok(Self {
            wallet: SessionManager::new(provider),
            gateway,
            config,
            session: Session::default(),
            snapshot: PoolSnapshot::default(),
            actions,
            refresh_error: None,
        })
    }

    // State accessors

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> &PoolSnapshot {
        &self.snapshot
    }

    pub fn action(&self, kind: ActionKind) -> &PendingAction {
        &self.actions[&kind]
    }

    /// Error from the most recent failed refresh, if the snapshot is stale
    pub fn refresh_error(&self) -> Option<&str> {
        self.refresh_error.as_deref()
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Whether any action currently holds the session-wide busy gate
    pub fn is_busy(&self) -> bool {
        self.actions.values().any(|action| action.busy)
    }

    /// Connect the wallet and run the initial state refresh
    ///
    /// A no-op while already connecting or connected. A failed attempt
    /// leaves a Disconnected session carrying the error; retrying is up to
    /// the user. A refresh failure after a successful connect does not
    /// disconnect; it is reported separately and the snapshot stays stale.
    pub async fn connect(&mut self) -> &Session {
        match self.session.status {
            SessionStatus::Connecting | SessionStatus::Connected => return &self.session,
            SessionStatus::Disconnected => {}
        }

        info!("connecting wallet");
        self.session = Session::connecting();
        self.session = self.wallet.connect().await;

        if let Some(account) = self.session.account {
            self.refresh(&account).await;
        }
        &self.session
    }

    /// Dispatch an action request through the busy gate
    ///
    /// Returns false when the request is rejected outright: session not
    /// connected, another action holding the busy gate, or inputs that are
    /// empty or not decimal numbers. A rejected request issues no calls and
    /// leaves all existing state untouched.
    pub async fn submit(&mut self, request: ActionRequest) -> bool {
        let kind = request.kind();

        if !self.session.is_connected() {
            debug!(?kind, "action rejected: not connected");
            return false;
        }
        let Some(account) = self.session.account else {
            debug!(?kind, "action rejected: no account");
            return false;
        };
        if self.is_busy() {
            debug!(?kind, "action rejected: another action is in flight");
            return false;
        }
        if request.inputs().iter().any(|input| input.trim().is_empty()) {
            debug!(?kind, "action rejected: empty input");
            return false;
        }
        let plan = match sequencer::plan(&request, &self.config) {
            Ok(plan) => plan,
            Err(e) => {
                debug!(?kind, "action rejected: {e}");
                return false;
            }
        };

        self.begin(kind, request);
        let result = self.run(&account, &plan).await;
        self.finish(kind, result);
        true
    }

    /// Drive the plan to settlement, then refresh derived state
    ///
    /// A refresh failure after settlement does not fail the action; it is
    /// recorded as a refresh error on its own.
    async fn run(&mut self, account: &Address, plan: &ActionPlan) -> ClientResult<()> {
        let pool = self.config.pool()?;
        sequencer::execute(&self.gateway, account, &pool, plan).await?;
        self.refresh(account).await;
        Ok(())
    }

    /// Recompute the snapshot wholesale, keeping the old one on failure
    async fn refresh(&mut self, account: &Address) {
        match sync::refresh(&self.gateway, account).await {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.refresh_error = None;
            }
            Err(e) => {
                warn!("refresh failed: {e}");
                self.refresh_error = Some(e.to_string());
            }
        }
    }

    // Transition functions: the only code paths that touch the busy flag

    /// Enter the busy critical section for `kind`, clearing stale errors
    fn begin(&mut self, kind: ActionKind, request: ActionRequest) {
        let action = self.actions.get_mut(&kind).expect("every kind is present");
        action.busy = true;
        action.error = None;
        action.request = Some(request);
        info!(action = kind.describe(), "action started");
    }

    /// Leave the busy critical section, recording the outcome
    ///
    /// Runs exactly once per `begin`, on success and failure alike.
    fn finish(&mut self, kind: ActionKind, result: ClientResult<()>) {
        let action = self.actions.get_mut(&kind).expect("every kind is present");
        action.busy = false;
        match result {
            Ok(()) => {
                action.error = None;
                action.request = None;
                info!(action = kind.describe(), "action settled");
            }
            Err(e) => {
                warn!(action = kind.describe(), "action failed: {e}");
                action.error = Some(e.to_string());
            }
        }
    }
}
