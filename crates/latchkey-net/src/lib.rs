// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Network-facing collaborators for the Latchkey orchestrator.
//!
//! - [`HttpAuthenticator`] posts credentials to a login endpoint.
//! - [`TcpProbeSignal`] reports reachability by periodically opening a TCP
//!   connection to a well-known address.

pub mod http;
pub mod probe;
mod types;

pub use http::HttpAuthenticator;
pub use probe::TcpProbeSignal;
