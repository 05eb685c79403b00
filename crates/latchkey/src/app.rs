// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires the configured collaborators into an orchestrator.

use std::sync::Arc;

use latchkey_config::LatchkeyConfig;
use latchkey_core::{LatchkeyError, NetworkSignal};
use latchkey_net::{HttpAuthenticator, TcpProbeSignal};
use latchkey_session::{LoginOrchestrator, LoginPolicy};
use latchkey_store::FileCredentialStore;
use tokio::sync::watch;
use tracing::debug;

/// An orchestrator together with the signal that feeds it.
///
/// The signal is kept alive for as long as the orchestrator is in use.
pub struct App {
    pub orchestrator: LoginOrchestrator,
    _network: Box<dyn NetworkSignal>,
}

impl App {
    /// Builds an orchestrator that probes the network.
    pub async fn connect(config: &LatchkeyConfig) -> Result<Self, LatchkeyError> {
        let network = TcpProbeSignal::from_config(&config.network).await;
        debug!(online = network.is_online(), "network probe started");
        Self::with_network(config, Box::new(network))
    }

    /// Builds an orchestrator for commands that never authenticate.
    pub fn local(config: &LatchkeyConfig) -> Result<Self, LatchkeyError> {
        Self::with_network(config, Box::new(AssumeOnline::default()))
    }

    fn with_network(
        config: &LatchkeyConfig,
        network: Box<dyn NetworkSignal>,
    ) -> Result<Self, LatchkeyError> {
        let authenticator = Arc::new(HttpAuthenticator::new(&config.auth)?);
        let store = Arc::new(FileCredentialStore::from_config(&config.store));
        let orchestrator = LoginOrchestrator::new(
            authenticator,
            store,
            network.as_ref(),
            LoginPolicy::from(&config.policy),
        );
        Ok(Self {
            orchestrator,
            _network: network,
        })
    }
}

/// A signal that always reads online.
struct AssumeOnline(watch::Sender<bool>);

impl Default for AssumeOnline {
    fn default() -> Self {
        Self(watch::channel(true).0)
    }
}

impl NetworkSignal for AssumeOnline {
    fn subscribe(&self) -> watch::Receiver<bool> {
        self.0.subscribe()
    }
}
