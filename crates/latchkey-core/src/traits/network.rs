// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Network reachability signal trait.

use tokio::sync::watch;

/// A live online/offline reading.
///
/// Subscribers receive a `watch` receiver: the current value is available
/// immediately and every later transition wakes `changed()`.
pub trait NetworkSignal: Send + Sync + 'static {
    /// Subscribes to online (`true`) / offline (`false`) transitions.
    fn subscribe(&self) -> watch::Receiver<bool>;
}
