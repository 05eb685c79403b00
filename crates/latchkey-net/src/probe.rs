// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reachability by TCP connect.
//!
//! A background task opens a connection to a fixed address at a fixed
//! interval. A successful connect within the timeout means online. Readings
//! are published through a `watch` channel only when they change.

use std::time::Duration;

use latchkey_config::model::NetworkConfig;
use latchkey_core::NetworkSignal;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// A [`NetworkSignal`] backed by a periodic TCP probe.
///
/// The probe task stops when the signal is dropped.
pub struct TcpProbeSignal {
    tx: watch::Sender<bool>,
    shutdown: CancellationToken,
}

impl TcpProbeSignal {
    /// Probes once, publishes the result, then keeps probing in the
    /// background. Must be called from within a Tokio runtime.
    pub async fn start(addr: String, interval: Duration, timeout: Duration) -> Self {
        let online = probe(&addr, timeout).await;
        debug!(addr = %addr, online, "initial reachability probe");

        let (tx, _rx) = watch::channel(online);
        let shutdown = CancellationToken::new();

        let task_tx = tx.clone();
        let task_shutdown = shutdown.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; the initial probe already ran.
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = task_shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        let online = probe(&addr, timeout).await;
                        let changed = task_tx.send_if_modified(|current| {
                            if *current == online {
                                return false;
                            }
                            *current = online;
                            true
                        });
                        if changed {
                            info!(addr = %addr, online, "reachability changed");
                        }
                    }
                }
            }
        });

        Self { tx, shutdown }
    }

    pub async fn from_config(config: &NetworkConfig) -> Self {
        Self::start(
            config.probe_addr.clone(),
            Duration::from_secs(config.probe_interval_secs),
            Duration::from_millis(config.probe_timeout_ms),
        )
        .await
    }

    /// The latest published reading.
    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }
}

impl NetworkSignal for TcpProbeSignal {
    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Drop for TcpProbeSignal {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// One connect attempt bounded by `timeout`.
pub async fn probe(addr: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
}
