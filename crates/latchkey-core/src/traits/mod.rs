// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the login orchestrator.
//!
//! The async [`Authenticator`] uses `#[async_trait]` for dynamic dispatch
//! compatibility; the store and the network signal are synchronous from the
//! orchestrator's point of view.

pub mod authenticator;
pub mod network;
pub mod store;

pub use authenticator::Authenticator;
pub use network::NetworkSignal;
pub use store::CredentialStore;
