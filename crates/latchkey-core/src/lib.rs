// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Latchkey login state machine.
//!
//! This crate provides the error types, token and credential types, and the
//! three collaborator traits the login orchestrator is written against:
//! [`Authenticator`], [`CredentialStore`] and [`NetworkSignal`]. Concrete
//! implementations live in `latchkey-store`, `latchkey-net` and
//! `latchkey-test-utils`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{AuthFailure, LatchkeyError};
pub use types::{Credentials, SessionToken};

pub use traits::{Authenticator, CredentialStore, NetworkSignal};
