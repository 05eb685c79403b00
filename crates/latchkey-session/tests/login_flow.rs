// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestrator behavior driven through mock collaborators.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use latchkey_core::{AuthFailure, SessionToken};
use latchkey_session::{LoginOutcome, LoginPolicy, messages};
use latchkey_test_utils::LoginHarness;
use secrecy::ExposeSecret;

fn failures(n: usize) -> Vec<Result<SessionToken, AuthFailure>> {
    (0..n).map(|_| Err(AuthFailure::InvalidCredentials)).collect()
}

#[tokio::test]
async fn successful_login_clears_status() {
    let harness = LoginHarness::builder().build();
    harness.fill("anne", "gowthami");

    assert!(harness.orchestrator.is_button_enabled());
    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Succeeded);

    let state = harness.orchestrator.state();
    assert!(state.login_success);
    assert_eq!(state.failure_count, 0);
    assert!(state.error_message.is_empty());
    assert!(state.lockout_expires_at.is_none());
    assert_eq!(harness.authenticator.usernames().await, vec!["anne".to_string()]);
}

#[tokio::test]
async fn invalid_input_is_not_admitted() {
    let harness = LoginHarness::builder().build();
    harness.fill("", "");
    assert_eq!(harness.orchestrator.login().await, LoginOutcome::NotAdmitted);

    harness.fill("admin", "1234567");
    assert!(!harness.orchestrator.is_button_enabled());
    assert_eq!(harness.orchestrator.login().await, LoginOutcome::NotAdmitted);

    assert_eq!(harness.authenticator.call_count(), 0);
    let state = harness.orchestrator.state();
    assert!(state.error_message.is_empty());
    assert_eq!(state.failure_count, 0);
}

#[tokio::test]
async fn remember_me_persists_token() {
    let harness = LoginHarness::builder().build();
    harness.fill("anne", "gowthami");
    harness.orchestrator.set_remember_me(true);

    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Succeeded);
    assert_eq!(harness.store.save_count(), 1);
    assert_eq!(harness.store.token(), Some(SessionToken::new("mockToken123")));
}

#[tokio::test]
async fn without_remember_me_store_is_untouched() {
    let harness = LoginHarness::builder().build();
    harness.fill("anne", "gowthami");

    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Succeeded);
    assert_eq!(harness.store.save_count(), 0);
    assert!(harness.store.token().is_none());
}

#[tokio::test]
async fn toggle_remember_me_flips_only_that_field() {
    let harness = LoginHarness::builder().build();
    harness.fill("anne", "gowthami");
    let before = harness.orchestrator.state();

    assert!(harness.orchestrator.toggle_remember_me());
    let after = harness.orchestrator.state();
    assert!(after.remember_me);
    assert_eq!(after.username, before.username);
    assert_eq!(after.failure_count, before.failure_count);
    assert_eq!(after.error_message, before.error_message);

    assert!(!harness.orchestrator.toggle_remember_me());
}

#[tokio::test]
async fn failed_save_still_reports_success() {
    let harness = LoginHarness::builder().build();
    harness.fill("anne", "gowthami");
    harness.orchestrator.set_remember_me(true);
    harness.store.fail_writes();

    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Succeeded);
    assert!(harness.orchestrator.state().login_success);
    assert!(harness.store.token().is_none());
}

#[tokio::test]
async fn classified_failures_map_to_messages() {
    let harness = LoginHarness::builder()
        .with_results(vec![
            Err(AuthFailure::InvalidCredentials),
            Err(AuthFailure::ServerError),
        ])
        .build();
    harness.fill("user", "wrongpassword");

    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Failed);
    let state = harness.orchestrator.state();
    assert_eq!(state.failure_count, 1);
    assert_eq!(state.error_message, messages::INVALID_CREDENTIALS);

    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Failed);
    let state = harness.orchestrator.state();
    assert_eq!(state.failure_count, 2);
    assert_eq!(state.error_message, messages::SERVER_ERROR);
}

#[tokio::test]
async fn unexpected_failure_uses_generic_message() {
    let harness = LoginHarness::builder()
        .with_results(vec![Err(AuthFailure::Unexpected("connection reset".into()))])
        .build();
    harness.fill("anne", "gowthami");

    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Failed);
    let state = harness.orchestrator.state();
    assert_eq!(state.failure_count, 1);
    assert_eq!(state.error_message, messages::GENERIC_FAILURE);
}

#[tokio::test]
async fn three_failures_engage_lockout() {
    let harness = LoginHarness::builder().with_results(failures(3)).build();
    harness.fill("user", "wrongpassword");

    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Failed);
    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Failed);
    let engaged_at = Utc::now();
    assert_eq!(harness.orchestrator.login().await, LoginOutcome::LockedOut);

    let state = harness.orchestrator.state();
    assert!(harness.orchestrator.is_locked());
    assert_eq!(state.failure_count, 3);
    assert!(state.error_message.contains("Try again in 15 minutes"));
    let expires = state.lockout_expires_at.unwrap();
    let drift = (expires - (engaged_at + TimeDelta::minutes(15))).num_seconds().abs();
    assert!(drift <= 2, "lockout expiry off by {drift}s");

    let remaining = harness.orchestrator.remaining_lockout_seconds().unwrap();
    assert!((15 * 60 - 2..=15 * 60).contains(&remaining));

    // The gate is closed while locked.
    assert!(!harness.orchestrator.is_button_enabled());
    assert_eq!(harness.orchestrator.login().await, LoginOutcome::NotAdmitted);
    assert_eq!(harness.authenticator.call_count(), 3);
}

#[tokio::test]
async fn unexpected_failure_can_engage_lockout() {
    let harness = LoginHarness::builder()
        .with_results(vec![
            Err(AuthFailure::InvalidCredentials),
            Err(AuthFailure::InvalidCredentials),
            Err(AuthFailure::Unexpected("boom".into())),
        ])
        .build();
    harness.fill("user", "wrongpassword");

    harness.orchestrator.login().await;
    harness.orchestrator.login().await;
    assert_eq!(harness.orchestrator.login().await, LoginOutcome::LockedOut);
    assert!(harness.orchestrator.is_locked());
    assert!(harness.orchestrator.state().error_message.contains("Try again in"));
}

#[tokio::test]
async fn success_resets_failure_count() {
    let harness = LoginHarness::builder().with_results(failures(2)).build();
    harness.fill("anne", "gowthami");

    harness.orchestrator.login().await;
    harness.orchestrator.login().await;
    assert_eq!(harness.orchestrator.state().failure_count, 2);

    assert_eq!(harness.orchestrator.login().await, LoginOutcome::Succeeded);
    assert_eq!(harness.orchestrator.state().failure_count, 0);
}

#[tokio::test]
async fn offline_before_third_attempt_does_not_count() {
    let harness = LoginHarness::builder().with_results(failures(3)).build();
    harness.fill("user", "wrongpassword");

    harness.orchestrator.login().await;
    assert_eq!(harness.orchestrator.state().failure_count, 1);
    harness.orchestrator.login().await;
    assert_eq!(harness.orchestrator.state().failure_count, 2);

    harness.set_online(false).await;
    assert!(!harness.orchestrator.is_button_enabled());
    assert_eq!(harness.orchestrator.login().await, LoginOutcome::NotAdmitted);

    let state = harness.orchestrator.state();
    assert_eq!(state.failure_count, 2);
    assert!(state.lockout_expires_at.is_none());
    assert_eq!(harness.authenticator.call_count(), 2);
}

#[tokio::test]
async fn built_offline_starts_with_gate_closed() {
    let harness = LoginHarness::builder().offline().build();
    harness.fill("anne", "gowthami");

    assert!(harness.orchestrator.state().is_offline);
    assert!(!harness.orchestrator.is_button_enabled());

    harness.set_online(true).await;
    assert!(harness.orchestrator.is_button_enabled());
}

#[tokio::test]
async fn network_drop_cancels_in_flight_login() {
    let harness = LoginHarness::builder()
        .with_results(vec![Err(AuthFailure::InvalidCredentials)])
        .with_delay(Duration::from_secs(30))
        .build();
    harness.fill("anne", "gowthami");

    let orchestrator = harness.orchestrator.clone();
    let login = tokio::spawn(async move { orchestrator.login().await });
    harness.wait_until_in_flight().await;
    harness.set_online(false).await;

    let outcome = tokio::time::timeout(Duration::from_secs(5), login)
        .await
        .expect("login should observe cancellation")
        .unwrap();
    assert_eq!(outcome, LoginOutcome::Cancelled);

    let state = harness.orchestrator.state();
    assert!(!state.login_success);
    assert!(state.error_message.is_empty());
    assert_eq!(state.failure_count, 0);
    assert!(state.is_offline);
    assert!(!harness.orchestrator.is_login_in_flight());
}

#[tokio::test]
async fn explicit_cancel_discards_result() {
    let harness = LoginHarness::builder()
        .with_delay(Duration::from_secs(30))
        .build();
    harness.fill("anne", "gowthami");
    harness.orchestrator.set_remember_me(true);

    let orchestrator = harness.orchestrator.clone();
    let login = tokio::spawn(async move { orchestrator.login().await });
    harness.wait_until_in_flight().await;
    assert!(harness.orchestrator.cancel_login());

    let outcome = login.await.unwrap();
    assert_eq!(outcome, LoginOutcome::Cancelled);
    assert!(!harness.orchestrator.state().login_success);
    assert_eq!(harness.store.save_count(), 0);
}

#[tokio::test]
async fn late_success_after_cancel_is_discarded() {
    let harness = LoginHarness::builder()
        .with_delay(Duration::from_millis(200))
        .ignoring_cancel()
        .build();
    harness.fill("anne", "gowthami");
    harness.orchestrator.set_remember_me(true);

    let orchestrator = harness.orchestrator.clone();
    let login = tokio::spawn(async move { orchestrator.login().await });
    harness.wait_until_in_flight().await;
    assert!(harness.orchestrator.cancel_login());

    assert_eq!(login.await.unwrap(), LoginOutcome::Cancelled);
    assert_eq!(harness.authenticator.call_count(), 1);
    let state = harness.orchestrator.state();
    assert!(!state.login_success);
    assert!(state.error_message.is_empty());
    assert_eq!(harness.store.save_count(), 0);
    assert!(harness.store.token().is_none());
}

#[tokio::test]
async fn late_failures_after_cancel_are_not_counted() {
    let harness = LoginHarness::builder()
        .with_results(vec![
            Err(AuthFailure::InvalidCredentials),
            Err(AuthFailure::Unexpected("boom".into())),
        ])
        .with_delay(Duration::from_millis(100))
        .ignoring_cancel()
        .build();
    harness.fill("anne", "gowthami");

    for _ in 0..2 {
        let orchestrator = harness.orchestrator.clone();
        let login = tokio::spawn(async move { orchestrator.login().await });
        harness.wait_until_in_flight().await;
        assert!(harness.orchestrator.cancel_login());
        assert_eq!(login.await.unwrap(), LoginOutcome::Cancelled);
    }

    assert_eq!(harness.authenticator.call_count(), 2);
    let state = harness.orchestrator.state();
    assert_eq!(state.failure_count, 0);
    assert!(state.lockout_expires_at.is_none());
    assert!(state.error_message.is_empty());
}

#[tokio::test]
async fn second_login_while_in_flight_is_rejected() {
    let harness = LoginHarness::builder()
        .with_delay(Duration::from_millis(300))
        .build();
    harness.fill("anne", "gowthami");

    let orchestrator = harness.orchestrator.clone();
    let first = tokio::spawn(async move { orchestrator.login().await });
    harness.wait_until_in_flight().await;

    assert_eq!(harness.orchestrator.login().await, LoginOutcome::AlreadyInFlight);
    assert_eq!(first.await.unwrap(), LoginOutcome::Succeeded);
    assert_eq!(harness.authenticator.call_count(), 1);
}

#[tokio::test]
async fn lockout_expiry_resets_after_it_passes() {
    let policy = LoginPolicy::default().with_lockout_duration(TimeDelta::seconds(2));
    let harness = LoginHarness::builder()
        .with_results(failures(3))
        .with_policy(policy)
        .build();
    harness.fill("user", "wrongpassword");

    for _ in 0..3 {
        harness.orchestrator.login().await;
    }
    assert!(harness.orchestrator.is_locked());
    assert!(harness.orchestrator.state().error_message.contains("Try again in 1 minute"));

    assert!(!harness.orchestrator.reset_lockout_if_expired());
    assert!(harness.orchestrator.is_locked());
    assert_eq!(harness.orchestrator.state().failure_count, 3);

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert!(harness.orchestrator.reset_lockout_if_expired());

    let state = harness.orchestrator.state();
    assert!(!harness.orchestrator.is_locked());
    assert_eq!(state.failure_count, 0);
    assert!(state.lockout_expires_at.is_none());
    assert!(state.error_message.is_empty());
    assert!(harness.orchestrator.is_button_enabled());
}

#[tokio::test]
async fn reset_clears_store_and_state() {
    let harness = LoginHarness::builder()
        .with_results(vec![Err(AuthFailure::InvalidCredentials)])
        .build();
    harness.fill("anne", "gowthami");
    harness.orchestrator.set_remember_me(true);
    harness.orchestrator.login().await;
    harness.orchestrator.login().await;
    assert!(harness.store.token().is_some());

    harness.orchestrator.reset();

    assert_eq!(harness.store.clear_count(), 1);
    assert!(harness.store.token().is_none());
    let state = harness.orchestrator.state();
    assert!(state.username.is_empty());
    assert!(state.password.expose_secret().is_empty());
    assert!(!state.remember_me);
    assert!(!state.login_success);
    assert_eq!(state.failure_count, 0);
    assert!(state.error_message.is_empty());
    assert!(state.lockout_expires_at.is_none());
}

#[tokio::test]
async fn reset_keeps_network_reading() {
    let harness = LoginHarness::builder().offline().build();
    harness.orchestrator.reset();
    assert!(harness.orchestrator.state().is_offline);
}

#[tokio::test]
async fn reset_with_failing_store_still_resets_state() {
    let harness = LoginHarness::builder().with_stored_token("abc").build();
    harness.fill("anne", "gowthami");
    harness.store.fail_writes();

    harness.orchestrator.reset();
    let state = harness.orchestrator.state();
    assert!(!state.login_success);
    assert!(state.username.is_empty());
}

#[tokio::test]
async fn reset_during_login_discards_result() {
    let harness = LoginHarness::builder()
        .with_delay(Duration::from_secs(30))
        .build();
    harness.fill("anne", "gowthami");
    harness.orchestrator.set_remember_me(true);

    let orchestrator = harness.orchestrator.clone();
    let login = tokio::spawn(async move { orchestrator.login().await });
    harness.wait_until_in_flight().await;
    harness.orchestrator.reset();

    assert_eq!(login.await.unwrap(), LoginOutcome::Cancelled);
    let state = harness.orchestrator.state();
    assert!(!state.login_success);
    assert!(state.username.is_empty());
    assert!(!state.remember_me);
    assert_eq!(harness.store.save_count(), 0);
    assert!(harness.store.token().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reset_during_slow_save_leaves_nothing_behind() {
    let harness = LoginHarness::builder()
        .with_save_delay(Duration::from_millis(200))
        .build();
    harness.fill("anne", "gowthami");
    harness.orchestrator.set_remember_me(true);

    let orchestrator = harness.orchestrator.clone();
    let login = tokio::spawn(async move { orchestrator.login().await });
    harness.wait_for_saves(1).await;
    harness.orchestrator.reset();

    assert_eq!(login.await.unwrap(), LoginOutcome::Succeeded);
    let state = harness.orchestrator.state();
    assert!(!state.login_success);
    assert!(state.username.is_empty());
    assert!(!state.remember_me);
    assert!(harness.store.token().is_none());
    assert_eq!(harness.store.clear_count(), 1);
    assert!(!harness.orchestrator.is_login_in_flight());
}

#[tokio::test]
async fn persisted_token_restores_session() {
    let harness = LoginHarness::builder().with_stored_token("abc").build();

    let state = harness.orchestrator.state();
    assert!(state.login_success);
    assert!(state.error_message.is_empty());
    assert_eq!(harness.authenticator.call_count(), 0);

    assert!(harness.orchestrator.restore_session_if_possible());
    assert!(harness.orchestrator.state().login_success);
}

#[tokio::test]
async fn restore_without_token_is_noop() {
    let harness = LoginHarness::builder().build();
    assert!(!harness.orchestrator.state().login_success);
    assert!(!harness.orchestrator.restore_session_if_possible());
    assert!(!harness.orchestrator.state().login_success);
}
