// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock authenticator for deterministic testing.
//!
//! `MockAuthenticator` pops scripted results from a FIFO queue. When the
//! queue is empty it succeeds with a default token. An optional delay is
//! slept in short steps, checking the cancel token between them, unless the
//! mock is told to ignore cancellation.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use latchkey_core::{AuthFailure, Authenticator, Credentials, SessionToken};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Token returned when no result is scripted.
pub const DEFAULT_TOKEN: &str = "mockToken123";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct MockAuthenticator {
    results: Mutex<VecDeque<Result<SessionToken, AuthFailure>>>,
    delay: Duration,
    ignore_cancel: bool,
    calls: AtomicUsize,
    usernames: Mutex<Vec<String>>,
}

impl MockAuthenticator {
    /// Always succeeds with [`DEFAULT_TOKEN`] and no delay.
    pub fn new() -> Self {
        Self::with_results(Vec::new())
    }

    /// Pre-loads the result queue.
    pub fn with_results(results: Vec<Result<SessionToken, AuthFailure>>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
            delay: Duration::ZERO,
            ignore_cancel: false,
            calls: AtomicUsize::new(0),
            usernames: Mutex::new(Vec::new()),
        }
    }

    /// Makes every call wait `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answers with the scripted result even after the token is cancelled.
    pub fn ignoring_cancel(mut self) -> Self {
        self.ignore_cancel = true;
        self
    }

    /// Adds a result to the end of the queue.
    pub async fn push_result(&self, result: Result<SessionToken, AuthFailure>) {
        self.results.lock().await.push_back(result);
    }

    /// Number of `login` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Usernames seen, in call order.
    pub async fn usernames(&self) -> Vec<String> {
        self.usernames.lock().await.clone()
    }

    async fn next_result(&self) -> Result<SessionToken, AuthFailure> {
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(SessionToken::new(DEFAULT_TOKEN)))
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn login(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<SessionToken, AuthFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.usernames.lock().await.push(credentials.username.clone());

        let observe = |cancel: &CancellationToken| !self.ignore_cancel && cancel.is_cancelled();

        let mut waited = Duration::ZERO;
        while waited < self.delay {
            if observe(cancel) {
                return Err(AuthFailure::Cancelled);
            }
            let step = POLL_INTERVAL.min(self.delay - waited);
            tokio::time::sleep(step).await;
            waited += step;
        }

        if observe(cancel) {
            return Err(AuthFailure::Cancelled);
        }
        self.next_result().await
    }
}
