// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Latchkey login state machine.
//!
//! [`SessionState`] is the single record the presentation layer observes.
//! [`LoginOrchestrator`] is its only writer for status fields: it gates login
//! attempts on input validity, network reachability and the lockout
//! [`LoginPolicy`], drives a cancellable [`Authenticator`] call, and folds the
//! result back into the state. It also restores a persisted session at
//! startup and wipes everything on logout.
//!
//! [`Authenticator`]: latchkey_core::Authenticator

mod binding;
pub mod messages;
pub mod orchestrator;
pub mod policy;
pub mod state;

pub use orchestrator::{LoginOrchestrator, LoginOutcome};
pub use policy::LoginPolicy;
pub use state::SessionState;
