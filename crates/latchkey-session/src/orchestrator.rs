// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The login orchestrator: the only writer of `SessionState` status fields.
//!
//! A login runs as one cancellable unit of work. Admission is decided once by
//! [`LoginPolicy::is_button_enabled`]; inside the unit of work the lockout and
//! offline checks are repeated, the [`Authenticator`] is awaited with a
//! [`CancellationToken`], and the result is folded back into the state.
//! Cancellation comes from [`LoginOrchestrator::cancel_login`], from
//! [`LoginOrchestrator::reset`], or from the network binding when the signal
//! goes offline.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use latchkey_core::{
    AuthFailure, Authenticator, CredentialStore, Credentials, NetworkSignal, SessionToken,
};
use secrecy::SecretString;
use strum::Display;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::binding;
use crate::messages;
use crate::policy::LoginPolicy;
use crate::state::SessionState;

/// The terminal branch a call to [`LoginOrchestrator::login`] ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LoginOutcome {
    /// The login gate was closed. Nothing changed.
    NotAdmitted,
    /// Another login was still in flight. Nothing changed.
    AlreadyInFlight,
    /// A lockout was active when the attempt started.
    Locked,
    /// The network was unreachable before or after the authenticator call.
    Offline,
    /// Cancellation was requested while the authenticator ran.
    Cancelled,
    Succeeded,
    /// The authenticator rejected the attempt below the lockout threshold.
    Failed,
    /// The attempt failed and engaged a lockout.
    LockedOut,
}

/// State shared between the orchestrator and its network binding task.
pub(crate) struct Shared {
    state: Mutex<SessionState>,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            in_flight: Mutex::new(None),
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn in_flight(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests cancellation of the current login, if any.
    pub(crate) fn cancel_in_flight(&self) -> bool {
        match self.in_flight().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}

/// Holds the single in-flight slot for the lifetime of one login.
///
/// Dropping it, including when the `login` future is dropped mid-await,
/// cancels the token and frees the slot.
struct InFlight<'a> {
    shared: &'a Shared,
    token: CancellationToken,
}

impl<'a> InFlight<'a> {
    fn claim(shared: &'a Shared) -> Option<Self> {
        let mut slot = shared.in_flight();
        if slot.is_some() {
            return None;
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        Some(Self { shared, token })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.token.cancel();
        *self.shared.in_flight() = None;
    }
}

/// Drives logins against an [`Authenticator`] and keeps a [`SessionState`].
pub struct LoginOrchestrator {
    shared: Arc<Shared>,
    authenticator: Arc<dyn Authenticator>,
    store: Arc<dyn CredentialStore>,
    policy: LoginPolicy,
    binding: CancellationToken,
}

impl LoginOrchestrator {
    /// Builds an orchestrator, binds it to `network` and restores a persisted
    /// session if the store holds a token.
    ///
    /// The current network reading is applied before this returns. Must be
    /// called from within a Tokio runtime.
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        store: Arc<dyn CredentialStore>,
        network: &dyn NetworkSignal,
        policy: LoginPolicy,
    ) -> Self {
        let orchestrator = Self {
            shared: Arc::new(Shared::new()),
            authenticator,
            store,
            policy,
            binding: CancellationToken::new(),
        };
        binding::bind(
            Arc::clone(&orchestrator.shared),
            network.subscribe(),
            orchestrator.binding.clone(),
        );
        orchestrator.restore_session_if_possible();
        orchestrator
    }

    pub fn policy(&self) -> &LoginPolicy {
        &self.policy
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.shared.state().clone()
    }

    /// Whether `login` would be admitted right now.
    pub fn is_button_enabled(&self) -> bool {
        self.policy.is_button_enabled(&self.shared.state(), Utc::now())
    }

    pub fn is_locked(&self) -> bool {
        self.shared.state().is_locked()
    }

    pub fn remaining_lockout_seconds(&self) -> Option<i64> {
        self.shared.state().remaining_lockout_seconds()
    }

    pub fn set_username(&self, username: impl Into<String>) {
        self.shared.state().username = username.into();
    }

    pub fn set_password(&self, password: SecretString) {
        self.shared.state().password = password;
    }

    pub fn set_remember_me(&self, remember_me: bool) {
        self.shared.state().remember_me = remember_me;
    }

    /// Flips `remember_me` and returns the new value.
    pub fn toggle_remember_me(&self) -> bool {
        let mut state = self.shared.state();
        state.remember_me = !state.remember_me;
        state.remember_me
    }

    /// True while a login unit of work is running.
    pub fn is_login_in_flight(&self) -> bool {
        self.shared.in_flight().is_some()
    }

    /// Requests cancellation of the in-flight login without waiting for it.
    ///
    /// Returns false when no login is running.
    pub fn cancel_login(&self) -> bool {
        let cancelled = self.shared.cancel_in_flight();
        if cancelled {
            debug!("login cancellation requested");
        }
        cancelled
    }

    /// Sets `login_success` when the store holds a token. Never authenticates.
    pub fn restore_session_if_possible(&self) -> bool {
        match self.store.get() {
            Ok(Some(_)) => {
                self.shared.state().login_success = true;
                info!("restored persisted session");
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "failed to read persisted session, treating as absent");
                false
            }
        }
    }

    /// Clears an elapsed lockout. Returns true when something was cleared.
    pub fn reset_lockout_if_expired(&self) -> bool {
        let cleared = self.shared.state().reset_lockout_if_expired_at(Utc::now());
        if cleared {
            info!("lockout expired, failure count reset");
        }
        cleared
    }

    /// Logs out: clears the store, cancels any in-flight login and returns the
    /// state to its defaults. The latest network reading is kept.
    ///
    /// Serialized with the commit of a finishing login: either that login
    /// commits first and is then wiped, or it observes the cancellation.
    pub fn reset(&self) {
        let mut state = self.shared.state();
        self.shared.cancel_in_flight();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }

        let is_offline = state.is_offline;
        *state = SessionState {
            is_offline,
            ..SessionState::default()
        };
        info!("session reset");
    }

    /// Runs one login attempt to completion and reports which branch it took.
    ///
    /// Every branch leaves the state well-defined; nothing is returned as an
    /// error.
    pub async fn login(&self) -> LoginOutcome {
        let credentials = {
            let state = self.shared.state();
            if !self.policy.is_button_enabled(&state, Utc::now()) {
                debug!("login not admitted");
                return LoginOutcome::NotAdmitted;
            }
            Credentials::new(state.username.clone(), state.password.clone())
        };

        let Some(attempt) = InFlight::claim(&self.shared) else {
            debug!("login already in flight");
            return LoginOutcome::AlreadyInFlight;
        };

        let outcome = self.run_attempt(&credentials, &attempt.token).await;
        debug!(username = %credentials.username, %outcome, "login finished");
        outcome
    }

    async fn run_attempt(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> LoginOutcome {
        {
            let mut state = self.shared.state();
            let now = Utc::now();
            if state.is_locked_at(now) {
                let remaining = state.remaining_lockout_seconds_at(now).unwrap_or(0);
                state.error_message = messages::locked(messages::minutes_ceil(remaining));
                state.login_success = false;
                return LoginOutcome::Locked;
            }
            if state.is_offline {
                mark_offline(&mut state);
                return LoginOutcome::Offline;
            }
        }

        let result = self.authenticator.login(credentials, cancel).await;

        // Cancellation, commit and reset all happen under one state guard.
        let mut state = self.shared.state();
        if cancel.is_cancelled() || matches!(result, Err(AuthFailure::Cancelled)) {
            state.login_success = false;
            state.error_message.clear();
            info!(username = %credentials.username, "login cancelled");
            return LoginOutcome::Cancelled;
        }

        match result {
            Ok(token) => self.complete_success(&mut state, credentials, &token),
            Err(failure) => self.record_failure(&mut state, credentials, &failure),
        }
    }

    fn complete_success(
        &self,
        state: &mut SessionState,
        credentials: &Credentials,
        token: &SessionToken,
    ) -> LoginOutcome {
        if state.is_offline {
            mark_offline(state);
            return LoginOutcome::Offline;
        }

        let remember_me = state.remember_me;
        if remember_me {
            if let Err(e) = self.store.save(token) {
                warn!(error = %e, "failed to persist session token");
            }
        }

        state.login_success = true;
        state.failure_count = 0;
        state.lockout_expires_at = None;
        state.error_message.clear();
        info!(
            username = %credentials.username,
            authenticator = self.authenticator.name(),
            remember_me,
            "login succeeded"
        );
        LoginOutcome::Succeeded
    }

    fn record_failure(
        &self,
        state: &mut SessionState,
        credentials: &Credentials,
        failure: &AuthFailure,
    ) -> LoginOutcome {
        if self.policy.record_failure(state, Utc::now()) {
            info!(
                username = %credentials.username,
                failures = state.failure_count,
                "lockout engaged"
            );
            return LoginOutcome::LockedOut;
        }

        state.error_message = messages::for_failure(failure).to_string();
        debug!(
            username = %credentials.username,
            failure = failure.kind(),
            classified = failure.is_classified(),
            failures = state.failure_count,
            "login failed"
        );
        LoginOutcome::Failed
    }
}

impl Drop for LoginOrchestrator {
    fn drop(&mut self) {
        self.binding.cancel();
    }
}

fn mark_offline(state: &mut SessionState) {
    state.login_success = false;
    state.error_message = messages::NO_INTERNET.to_string();
}
