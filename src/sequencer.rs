//! Approval-then-action sequencing
//!
//! Any action that spends a token needs the pool authorized to move it
//! first. The sequencer resolves a request into the approvals it needs and
//! drives each one to settlement, in order, before the dependent pool call
//! is issued.

use tracing::debug;

use crate::amount::to_base_units;
use crate::config::PoolConfig;
use crate::core::error::{ClientError, ClientResult};
use crate::core::types::{ActionRequest, Address};
use crate::gateway::PoolGateway;

/// The pool call an action resolves to, in base units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolCall {
    Swap { amount: u128, a_to_b: bool },
    AddLiquidity { amount_a: u128, amount_b: u128 },
    RemoveLiquidity { amount: u128 },
}

/// A validated action: the approvals it needs, in order, then the call
#[derive(Clone, Debug)]
pub struct ActionPlan {
    /// (token, amount) approvals; exact amounts, never unlimited
    pub approvals: Vec<(Address, u128)>,
    pub call: PoolCall,
}

/// Resolve a request into its approvals and dependent pool call
///
/// Swap spends the source token implied by its direction; add-liquidity
/// spends token A then token B, strictly in that order; remove-liquidity
/// spends nothing and needs no approval at all.
pub fn plan(request: &ActionRequest, config: &PoolConfig) -> ClientResult<ActionPlan> {
    match request {
        ActionRequest::Swap { amount, a_to_b } => {
            let amount = to_base_units(amount)?;
            let source = if *a_to_b {
                config.token_a()?
            } else {
                config.token_b()?
            };
            Ok(ActionPlan {
                approvals: vec![(source, amount)],
                call: PoolCall::Swap {
                    amount,
                    a_to_b: *a_to_b,
                },
            })
        }
        ActionRequest::AddLiquidity { amount_a, amount_b } => {
            let amount_a = to_base_units(amount_a)?;
            let amount_b = to_base_units(amount_b)?;
            Ok(ActionPlan {
                approvals: vec![(config.token_a()?, amount_a), (config.token_b()?, amount_b)],
                call: PoolCall::AddLiquidity { amount_a, amount_b },
            })
        }
        ActionRequest::RemoveLiquidity { amount } => {
            let amount = to_base_units(amount)?;
            Ok(ActionPlan {
                approvals: Vec::new(),
                call: PoolCall::RemoveLiquidity { amount },
            })
        }
    }
}

/// Drive a plan to settlement: every approval in order, then the pool call
///
/// An approval failure aborts the plan before the pool call is ever issued;
/// approvals that already settled are not rolled back; the allowance stays
/// until consumed or re-approved.
pub async fn execute<G: PoolGateway + ?Sized>(
    gateway: &G,
    from: &Address,
    pool: &Address,
    plan: &ActionPlan,
) -> ClientResult<()> {
    for (token, amount) in &plan.approvals {
        debug!(token = %token, amount, "submitting approval");
        let tx = gateway
            .approve(from, token, pool, *amount)
            .await
            .map_err(|e| ClientError::Approval(e.to_string()))?;
        gateway
            .wait_for_settlement(&tx)
            .await
            .map_err(|e| ClientError::Approval(e.to_string()))?;
    }

    let tx = match plan.call {
        PoolCall::Swap { amount, a_to_b } => gateway.swap(from, amount, a_to_b).await,
        PoolCall::AddLiquidity { amount_a, amount_b } => {
            gateway.add_liquidity(from, amount_a, amount_b).await
        }
        PoolCall::RemoveLiquidity { amount } => gateway.remove_liquidity(from, amount).await,
    }
    .map_err(|e| ClientError::Action(e.to_string()))?;

    gateway
        .wait_for_settlement(&tx)
        .await
        .map_err(|e| ClientError::Action(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::BASE_UNIT_SCALE;
    use crate::testing::test_config;

    #[test]
    fn swap_plan_spends_the_direction_implied_token() {
        let config = test_config();

        let plan = plan(
            &ActionRequest::Swap {
                amount: "5".to_string(),
                a_to_b: true,
            },
            &config,
        )
        .unwrap();
        assert_eq!(plan.approvals, vec![(config.token_a().unwrap(), 5 * BASE_UNIT_SCALE)]);

        let plan = super::plan(
            &ActionRequest::Swap {
                amount: "5".to_string(),
                a_to_b: false,
            },
            &config,
        )
        .unwrap();
        assert_eq!(plan.approvals, vec![(config.token_b().unwrap(), 5 * BASE_UNIT_SCALE)]);
    }

    #[test]
    fn add_liquidity_plan_approves_both_tokens_in_order() {
        let config = test_config();
        let plan = plan(
            &ActionRequest::AddLiquidity {
                amount_a: "10".to_string(),
                amount_b: "20".to_string(),
            },
            &config,
        )
        .unwrap();

        assert_eq!(
            plan.approvals,
            vec![
                (config.token_a().unwrap(), 10 * BASE_UNIT_SCALE),
                (config.token_b().unwrap(), 20 * BASE_UNIT_SCALE),
            ]
        );
    }

    #[test]
    fn remove_liquidity_plan_needs_no_approval() {
        let plan = plan(
            &ActionRequest::RemoveLiquidity {
                amount: "3".to_string(),
            },
            &test_config(),
        )
        .unwrap();
        assert!(plan.approvals.is_empty());
    }

    #[test]
    fn plan_rejects_non_numeric_amounts() {
        let config = test_config();
        assert!(plan(
            &ActionRequest::Swap {
                amount: "abc".to_string(),
                a_to_b: true,
            },
            &config,
        )
        .is_err());
        assert!(plan(
            &ActionRequest::AddLiquidity {
                amount_a: "1".to_string(),
                amount_b: "".to_string(),
            },
            &config,
        )
        .is_err());
    }
}
