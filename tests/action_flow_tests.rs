//! End-to-end action flows against the scripted gateway

use pool_client::testing::{
    test_address, test_config, FailPoint, GatewayCall, MockGateway, MockWallet,
};
use pool_client::{ActionKind, ActionRequest, PoolApp};

const SCALE: u128 = 1_000_000_000_000_000_000;

/// App connected to a pool with reserves (100, 200), 1000 total shares and
/// 250 user shares; the connect-time refresh is dropped from the call log.
async fn connected_app() -> PoolApp<MockWallet, MockGateway> {
    let mut app = PoolApp::new(
        MockWallet::with_account(test_address(0x11)),
        MockGateway::with_pool_state(100, 200, 1000, 250),
        test_config(),
    )
    .unwrap();
    app.connect().await;
    assert!(app.session().is_connected());
    app.gateway().clear_calls();
    app
}

#[tokio::test]
async fn swap_approves_exact_amount_then_swaps_then_refreshes_once() {
    let mut app = connected_app().await;
    let config = test_config();

    let accepted = app
        .submit(ActionRequest::Swap {
            amount: "5".to_string(),
            a_to_b: true,
        })
        .await;
    assert!(accepted);

    let calls = app.gateway().calls();
    assert_eq!(
        calls[0],
        GatewayCall::Approve {
            token: config.token_a().unwrap(),
            spender: config.pool().unwrap(),
            amount: 5 * SCALE,
        }
    );
    assert!(matches!(calls[1], GatewayCall::WaitForSettlement(_)));
    assert_eq!(
        calls[2],
        GatewayCall::Swap {
            amount: 5 * SCALE,
            a_to_b: true,
        }
    );
    assert!(matches!(calls[3], GatewayCall::WaitForSettlement(_)));

    // settlement triggers exactly one refresh
    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::GetReserves)),
        1
    );
    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::TotalShares)),
        1
    );

    assert!(!app.is_busy());
    assert!(app.action(ActionKind::Swap).error.is_none());
}

#[tokio::test]
async fn swap_direction_picks_the_other_source_token() {
    let mut app = connected_app().await;
    let config = test_config();

    app.submit(ActionRequest::Swap {
        amount: "2".to_string(),
        a_to_b: false,
    })
    .await;

    assert_eq!(
        app.gateway().calls()[0],
        GatewayCall::Approve {
            token: config.token_b().unwrap(),
            spender: config.pool().unwrap(),
            amount: 2 * SCALE,
        }
    );
}

#[tokio::test]
async fn add_liquidity_settles_both_approvals_before_the_pool_call() {
    let mut app = connected_app().await;
    let config = test_config();

    let accepted = app
        .submit(ActionRequest::AddLiquidity {
            amount_a: "10".to_string(),
            amount_b: "20".to_string(),
        })
        .await;
    assert!(accepted);

    let calls = app.gateway().calls();
    let add_index = calls
        .iter()
        .position(|c| matches!(c, GatewayCall::AddLiquidity { .. }))
        .expect("addLiquidity was called");

    // token A approval, its settlement, token B approval, its settlement,
    // all strictly before the pool call
    assert_eq!(
        calls[0],
        GatewayCall::Approve {
            token: config.token_a().unwrap(),
            spender: config.pool().unwrap(),
            amount: 10 * SCALE,
        }
    );
    assert!(matches!(calls[1], GatewayCall::WaitForSettlement(_)));
    assert_eq!(
        calls[2],
        GatewayCall::Approve {
            token: config.token_b().unwrap(),
            spender: config.pool().unwrap(),
            amount: 20 * SCALE,
        }
    );
    assert!(matches!(calls[3], GatewayCall::WaitForSettlement(_)));
    assert_eq!(add_index, 4);
    assert_eq!(
        calls[4],
        GatewayCall::AddLiquidity {
            amount_a: 10 * SCALE,
            amount_b: 20 * SCALE,
        }
    );
}

#[tokio::test]
async fn approve_revert_aborts_add_liquidity() {
    let mut app = connected_app().await;
    app.gateway().fail_at(FailPoint::ApproveSettle);

    let accepted = app
        .submit(ActionRequest::AddLiquidity {
            amount_a: "10".to_string(),
            amount_b: "20".to_string(),
        })
        .await;
    assert!(accepted);

    // the dependent action is never issued, and no refresh runs
    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::AddLiquidity { .. })),
        0
    );
    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::GetReserves)),
        0
    );

    let action = app.action(ActionKind::AddLiquidity);
    assert!(action.error.as_deref().unwrap().contains("approval failed"));
    assert!(!app.is_busy());
}

#[tokio::test]
async fn approve_submit_rejection_also_aborts_the_action() {
    let mut app = connected_app().await;
    app.gateway().fail_at(FailPoint::ApproveSubmit);

    app.submit(ActionRequest::Swap {
        amount: "1".to_string(),
        a_to_b: true,
    })
    .await;

    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::Swap { .. })),
        0
    );
    assert!(app.action(ActionKind::Swap).error.is_some());
    assert!(!app.is_busy());
}

#[tokio::test]
async fn action_failure_skips_the_refresh() {
    let mut app = connected_app().await;
    app.gateway().fail_at(FailPoint::ActionSettle);

    app.submit(ActionRequest::RemoveLiquidity {
        amount: "3".to_string(),
    })
    .await;

    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::GetReserves)),
        0
    );
    assert!(app.action(ActionKind::RemoveLiquidity).error.is_some());
    assert!(!app.is_busy());
}

#[tokio::test]
async fn remove_liquidity_needs_no_approval() {
    let mut app = connected_app().await;

    app.submit(ActionRequest::RemoveLiquidity {
        amount: "3".to_string(),
    })
    .await;

    let calls = app.gateway().calls();
    assert_eq!(calls[0], GatewayCall::RemoveLiquidity { amount: 3 * SCALE });
    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::Approve { .. })),
        0
    );
    assert!(app.action(ActionKind::RemoveLiquidity).error.is_none());
}

#[tokio::test]
async fn refresh_failure_after_settled_swap_keeps_the_swap_successful() {
    let mut app = connected_app().await;
    // the connect-time refresh already populated the snapshot
    assert_eq!(app.snapshot().reserve_a, "100");
    assert_eq!(app.snapshot().share_percent, "25.00");

    app.gateway().fail_at(FailPoint::Reserves);
    let accepted = app
        .submit(ActionRequest::Swap {
            amount: "5".to_string(),
            a_to_b: true,
        })
        .await;
    assert!(accepted);

    // the swap itself succeeded
    assert!(app.action(ActionKind::Swap).error.is_none());
    assert!(!app.is_busy());

    // the snapshot stays at its pre-action values, with a separate error
    assert_eq!(app.snapshot().reserve_a, "100");
    assert_eq!(app.snapshot().reserve_b, "200");
    assert_eq!(app.snapshot().share_percent, "25.00");
    assert!(app
        .refresh_error()
        .unwrap()
        .contains("refresh failed"));
}

#[tokio::test]
async fn busy_gate_is_released_after_every_failure_point() {
    let failures = [
        FailPoint::ApproveSubmit,
        FailPoint::ApproveSettle,
        FailPoint::ActionSubmit,
        FailPoint::ActionSettle,
    ];

    for point in failures {
        let mut app = connected_app().await;
        app.gateway().fail_at(point);

        let accepted = app
            .submit(ActionRequest::AddLiquidity {
                amount_a: "10".to_string(),
                amount_b: "20".to_string(),
            })
            .await;

        assert!(accepted, "{point:?}");
        assert!(!app.is_busy(), "busy leaked after {point:?}");
        assert!(
            app.action(ActionKind::AddLiquidity).error.is_some(),
            "{point:?}"
        );
    }

    // read failures leave the action successful but still release the gate
    for point in [
        FailPoint::Reserves,
        FailPoint::TotalShares,
        FailPoint::UserShares,
    ] {
        let mut app = connected_app().await;
        app.gateway().fail_at(point);

        app.submit(ActionRequest::Swap {
            amount: "1".to_string(),
            a_to_b: true,
        })
        .await;

        assert!(!app.is_busy(), "busy leaked after {point:?}");
        assert!(app.action(ActionKind::Swap).error.is_none(), "{point:?}");
        assert!(app.refresh_error().is_some(), "{point:?}");
    }
}

#[tokio::test]
async fn actions_run_back_to_back_once_each_settles() {
    let mut app = connected_app().await;

    assert!(
        app.submit(ActionRequest::Swap {
            amount: "1".to_string(),
            a_to_b: true,
        })
        .await
    );
    assert!(
        app.submit(ActionRequest::Swap {
            amount: "2".to_string(),
            a_to_b: false,
        })
        .await
    );

    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::Swap { .. })),
        2
    );
    assert!(!app.is_busy());
}

#[tokio::test]
async fn successful_action_clears_its_request() {
    let mut app = connected_app().await;

    app.submit(ActionRequest::Swap {
        amount: "5".to_string(),
        a_to_b: true,
    })
    .await;
    assert!(app.action(ActionKind::Swap).request.is_none());

    app.gateway().fail_at(FailPoint::ActionSettle);
    app.submit(ActionRequest::Swap {
        amount: "7".to_string(),
        a_to_b: true,
    })
    .await;
    // a failed action keeps its request around for the front end
    assert!(app.action(ActionKind::Swap).request.is_some());
}
