// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keeps `SessionState::is_offline` in step with a [`NetworkSignal`].
//!
//! [`NetworkSignal`]: latchkey_core::NetworkSignal

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::orchestrator::Shared;

/// Applies the current reading now, then follows changes on a background task
/// until `shutdown` fires or the signal is dropped.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn bind(
    shared: Arc<Shared>,
    mut rx: watch::Receiver<bool>,
    shutdown: CancellationToken,
) {
    let online = *rx.borrow_and_update();
    apply(&shared, online);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        debug!("network signal closed, binding stopped");
                        break;
                    }
                    let online = *rx.borrow_and_update();
                    apply(&shared, online);
                }
            }
        }
    });
}

fn apply(shared: &Shared, online: bool) {
    let was_offline = {
        let mut state = shared.state();
        let was_offline = state.is_offline;
        state.is_offline = !online;
        was_offline
    };

    if was_offline != !online {
        info!(online, "network reachability changed");
    }

    if !online && shared.cancel_in_flight() {
        info!("network lost, cancelling in-flight login");
    }
}
