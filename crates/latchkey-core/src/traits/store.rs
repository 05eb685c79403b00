// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-slot credential storage trait.

use crate::error::LatchkeyError;
use crate::types::SessionToken;

/// Durable storage for exactly one session token.
///
/// Operations are synchronous and must be safe to call from any thread.
pub trait CredentialStore: Send + Sync + 'static {
    /// Replaces the stored token.
    fn save(&self, token: &SessionToken) -> Result<(), LatchkeyError>;

    /// Returns the stored token, or `None` when the slot is empty.
    fn get(&self) -> Result<Option<SessionToken>, LatchkeyError>;

    /// Empties the slot. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<(), LatchkeyError>;
}
