//! Pool state synchronization
//!
//! Derived metrics are recomputed wholesale after a successful connect and
//! after every successfully settled action, never on a timer.

use tracing::debug;

use crate::amount::{share_percent, to_display};
use crate::core::error::{ClientError, ClientResult};
use crate::core::types::{Address, PoolSnapshot};
use crate::gateway::PoolGateway;

/// Produce a fresh snapshot of the pool's display metrics
///
/// The reserve read runs concurrently with the share reads; the snapshot is
/// built only once every read has returned. Any read failure aborts the
/// whole refresh (the caller keeps its previous snapshot) and surfaces as
/// a refresh error, distinct from action errors.
pub async fn refresh<G: PoolGateway + ?Sized>(
    gateway: &G,
    account: &Address,
) -> ClientResult<PoolSnapshot> {
    let reserves = gateway.get_reserves();
    let shares = async {
        let total = gateway.total_shares().await?;
        let user = gateway.shares_of(account).await?;
        Ok::<_, ClientError>((total, user))
    };

    let ((reserve_a, reserve_b), (total, user)) = tokio::try_join!(reserves, shares)
        .map_err(|e| ClientError::Refresh(e.to_string()))?;

    debug!(reserve_a, reserve_b, total, user, "pool state refreshed");

    Ok(PoolSnapshot {
        reserve_a: to_display(reserve_a),
        reserve_b: to_display(reserve_b),
        total_shares: to_display(total),
        user_shares: to_display(user),
        share_percent: share_percent(user, total),
    })
}
