// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory credential store.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use latchkey_core::{CredentialStore, LatchkeyError, SessionToken};

/// Single-slot token store that records how often it was written.
#[derive(Default)]
pub struct MockCredentialStore {
    slot: Mutex<Option<SessionToken>>,
    saves: AtomicUsize,
    clears: AtomicUsize,
    fail_writes: AtomicBool,
    save_delay: Duration,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a persisted token, as if a previous run remembered it.
    pub fn with_token(token: SessionToken) -> Self {
        let store = Self::default();
        *store.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
        store
    }

    /// Makes every `save` block the calling thread for `delay` before writing.
    pub fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = delay;
        self
    }

    /// Makes `save` and `clear` fail from now on.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// The currently held token.
    pub fn token(&self) -> Option<SessionToken> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> Result<(), LatchkeyError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LatchkeyError::Store {
                source: "mock store is read-only".into(),
            });
        }
        Ok(())
    }
}

impl CredentialStore for MockCredentialStore {
    fn save(&self, token: &SessionToken) -> Result<(), LatchkeyError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if !self.save_delay.is_zero() {
            std::thread::sleep(self.save_delay);
        }
        self.check_writable()?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn get(&self) -> Result<Option<SessionToken>, LatchkeyError> {
        Ok(self.token())
    }

    fn clear(&self) -> Result<(), LatchkeyError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
