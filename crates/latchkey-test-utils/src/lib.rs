// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Latchkey integration tests.
//!
//! Provides mock collaborators and a harness for fast, deterministic tests
//! without a real server, keychain or network.
//!
//! # Components
//!
//! - [`MockAuthenticator`] - Scripted login results with a cancellable delay
//! - [`MockCredentialStore`] - In-memory single-slot token store
//! - [`MockNetwork`] - Reachability signal flipped by the test
//! - [`LoginHarness`] - An orchestrator wired to all three

pub mod harness;
pub mod mock_authenticator;
pub mod mock_network;
pub mod mock_store;

pub use harness::LoginHarness;
pub use mock_authenticator::MockAuthenticator;
pub use mock_network::MockNetwork;
pub use mock_store::MockCredentialStore;
