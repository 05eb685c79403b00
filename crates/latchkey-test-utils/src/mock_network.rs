// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reachability signal driven by the test.

use latchkey_core::NetworkSignal;
use tokio::sync::watch;

pub struct MockNetwork {
    tx: watch::Sender<bool>,
}

impl MockNetwork {
    pub fn new(online: bool) -> Self {
        let (tx, _rx) = watch::channel(online);
        Self { tx }
    }

    /// Publishes a new reading. Subscribers are woken even if it is unchanged.
    pub fn set_online(&self, online: bool) {
        self.tx.send_replace(online);
    }

    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for MockNetwork {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NetworkSignal for MockNetwork {
    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
