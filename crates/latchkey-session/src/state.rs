// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The observable login state record.
//!
//! Derived values (`is_locked`, `remaining_lockout_seconds`) are computed on
//! every call from the stored fields and a caller-supplied `now`; nothing
//! derived is ever stored.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

/// Inputs and status of one login screen.
///
/// `username`, `password` and `remember_me` are raw presentation inputs.
/// Every other field is written only by the
/// [`LoginOrchestrator`](crate::LoginOrchestrator).
#[derive(Debug, Clone)]
pub struct SessionState {
    pub username: String,
    pub password: SecretString,
    pub remember_me: bool,

    /// Consecutive failures since the last success or lockout reset.
    pub failure_count: u32,
    /// When the current lockout ends. `None` means not locked.
    pub lockout_expires_at: Option<DateTime<Utc>>,
    /// Mirrors the latest network reading.
    pub is_offline: bool,
    pub login_success: bool,
    /// Last user-facing failure or lockout message. Empty means no error.
    pub error_message: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: SecretString::from(String::new()),
            remember_me: false,
            failure_count: 0,
            lockout_expires_at: None,
            is_offline: false,
            login_success: false,
            error_message: String::new(),
        }
    }
}

impl SessionState {
    /// True while a lockout is set and has not yet passed.
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.lockout_expires_at.is_some_and(|expires| now < expires)
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked_at(Utc::now())
    }

    /// Whole seconds until the lockout ends, clamped at zero.
    pub fn remaining_lockout_seconds_at(&self, now: DateTime<Utc>) -> Option<i64> {
        self.lockout_expires_at
            .map(|expires| (expires - now).num_seconds().max(0))
    }

    pub fn remaining_lockout_seconds(&self) -> Option<i64> {
        self.remaining_lockout_seconds_at(Utc::now())
    }

    /// Username present and password at least `min_password_length` characters.
    pub fn has_valid_input(&self, min_password_length: usize) -> bool {
        !self.username.is_empty()
            && self.password.expose_secret().chars().count() >= min_password_length
    }

    /// Clears an elapsed lockout together with its failure count and message.
    ///
    /// Returns true when something was cleared.
    pub fn reset_lockout_if_expired_at(&mut self, now: DateTime<Utc>) -> bool {
        match self.lockout_expires_at {
            Some(expires) if now >= expires => {
                self.lockout_expires_at = None;
                self.failure_count = 0;
                self.error_message.clear();
                true
            }
            _ => false,
        }
    }
}
