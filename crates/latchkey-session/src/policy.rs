// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input gating and progressive lockout policy.

use chrono::{DateTime, TimeDelta, Utc};
use latchkey_config::model::PolicyConfig;

use crate::messages;
use crate::state::SessionState;

/// Thresholds applied by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginPolicy {
    /// Failures that engage a lockout.
    pub max_failures: u32,
    /// Length of a lockout.
    pub lockout_duration: TimeDelta,
    /// Characters required before the login gate opens.
    pub min_password_length: usize,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self {
            max_failures: 3,
            lockout_duration: TimeDelta::minutes(15),
            min_password_length: 8,
        }
    }
}

impl From<&PolicyConfig> for LoginPolicy {
    fn from(config: &PolicyConfig) -> Self {
        let minutes = i64::try_from(config.lockout_minutes).unwrap_or(i64::MAX);
        Self {
            max_failures: config.max_failures,
            lockout_duration: TimeDelta::try_minutes(minutes).unwrap_or(TimeDelta::MAX),
            min_password_length: config.min_password_length,
        }
    }
}

impl LoginPolicy {
    /// Replaces the lockout duration.
    pub fn with_lockout_duration(mut self, duration: TimeDelta) -> Self {
        self.lockout_duration = duration;
        self
    }

    /// The login gate: valid input, not locked, not offline.
    pub fn is_button_enabled(&self, state: &SessionState, now: DateTime<Utc>) -> bool {
        state.has_valid_input(self.min_password_length)
            && !state.is_locked_at(now)
            && !state.is_offline
    }

    /// Lockout length in whole minutes, as shown to the user.
    pub fn lockout_minutes(&self) -> i64 {
        messages::minutes_ceil(self.lockout_duration.num_seconds())
    }

    /// Counts one failure. Engages a lockout and returns true once the
    /// threshold is reached.
    pub fn record_failure(&self, state: &mut SessionState, now: DateTime<Utc>) -> bool {
        state.failure_count = state.failure_count.saturating_add(1);
        if state.failure_count < self.max_failures {
            return false;
        }
        state.lockout_expires_at = Some(
            now.checked_add_signed(self.lockout_duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        );
        state.error_message = messages::locked(self.lockout_minutes());
        true
    }
}
