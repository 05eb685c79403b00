// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for orchestrator-level tests.
//!
//! `LoginHarness` wires a [`LoginOrchestrator`] to mock collaborators and
//! keeps handles to each of them for assertions.

use std::sync::Arc;
use std::time::Duration;

use latchkey_core::{AuthFailure, SessionToken};
use latchkey_session::{LoginOrchestrator, LoginPolicy};
use secrecy::SecretString;

use crate::mock_authenticator::MockAuthenticator;
use crate::mock_network::MockNetwork;
use crate::mock_store::MockCredentialStore;

/// How long the harness waits for the network binding to catch up.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Builder for configuring a [`LoginHarness`].
pub struct LoginHarnessBuilder {
    results: Vec<Result<SessionToken, AuthFailure>>,
    delay: Duration,
    ignore_cancel: bool,
    save_delay: Duration,
    stored_token: Option<SessionToken>,
    online: bool,
    policy: LoginPolicy,
}

impl LoginHarnessBuilder {
    fn new() -> Self {
        Self {
            results: Vec::new(),
            delay: Duration::ZERO,
            ignore_cancel: false,
            save_delay: Duration::ZERO,
            stored_token: None,
            online: true,
            policy: LoginPolicy::default(),
        }
    }

    /// Scripts the authenticator's results in call order.
    pub fn with_results(mut self, results: Vec<Result<SessionToken, AuthFailure>>) -> Self {
        self.results = results;
        self
    }

    /// Makes each authenticator call take `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Lets the authenticator answer after its cancel token fired.
    pub fn ignoring_cancel(mut self) -> Self {
        self.ignore_cancel = true;
        self
    }

    /// Makes each store write block for `delay`. Needs a multi-thread runtime.
    pub fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = delay;
        self
    }

    /// Seeds the store with a persisted token.
    pub fn with_stored_token(mut self, token: &str) -> Self {
        self.stored_token = Some(SessionToken::new(token));
        self
    }

    /// Starts the network signal offline.
    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }

    pub fn with_policy(mut self, policy: LoginPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the orchestrator. Must be called from within a Tokio runtime.
    pub fn build(self) -> LoginHarness {
        let mut authenticator =
            MockAuthenticator::with_results(self.results).with_delay(self.delay);
        if self.ignore_cancel {
            authenticator = authenticator.ignoring_cancel();
        }
        let authenticator = Arc::new(authenticator);
        let store = match self.stored_token {
            Some(token) => MockCredentialStore::with_token(token),
            None => MockCredentialStore::new(),
        };
        let store = Arc::new(store.with_save_delay(self.save_delay));
        let network = Arc::new(MockNetwork::new(self.online));

        let orchestrator = Arc::new(LoginOrchestrator::new(
            authenticator.clone(),
            store.clone(),
            network.as_ref(),
            self.policy,
        ));

        LoginHarness {
            orchestrator,
            authenticator,
            store,
            network,
        }
    }
}

/// An orchestrator plus the mocks behind it.
pub struct LoginHarness {
    pub orchestrator: Arc<LoginOrchestrator>,
    pub authenticator: Arc<MockAuthenticator>,
    pub store: Arc<MockCredentialStore>,
    pub network: Arc<MockNetwork>,
}

impl LoginHarness {
    pub fn builder() -> LoginHarnessBuilder {
        LoginHarnessBuilder::new()
    }

    /// Types a username and password into the state.
    pub fn fill(&self, username: &str, password: &str) {
        self.orchestrator.set_username(username);
        self.orchestrator
            .set_password(SecretString::from(password.to_string()));
    }

    /// Flips the network signal and waits until the orchestrator has seen it.
    pub async fn set_online(&self, online: bool) {
        self.network.set_online(online);
        self.wait_until(|h| h.orchestrator.state().is_offline == !online)
            .await;
    }

    /// Waits until a login unit of work has claimed the in-flight slot.
    pub async fn wait_until_in_flight(&self) {
        self.wait_until(|h| h.orchestrator.is_login_in_flight()).await;
    }

    /// Waits until the authenticator has been called `count` times.
    pub async fn wait_for_calls(&self, count: usize) {
        self.wait_until(|h| h.authenticator.call_count() >= count)
            .await;
    }

    /// Waits until the store has been asked to save `count` times.
    pub async fn wait_for_saves(&self, count: usize) {
        self.wait_until(|h| h.store.save_count() >= count).await;
    }

    async fn wait_until(&self, condition: impl Fn(&Self) -> bool) {
        let settled = tokio::time::timeout(SETTLE_TIMEOUT, async {
            while !condition(self) {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await;
        if settled.is_err() {
            tracing::warn!("harness condition did not settle in time");
        }
    }
}
