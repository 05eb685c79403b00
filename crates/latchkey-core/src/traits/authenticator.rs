// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote authentication trait.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::AuthFailure;
use crate::types::{Credentials, SessionToken};

/// Exchanges a username/password pair for a session token.
///
/// Implementations must observe `cancel` cooperatively: poll it at bounded
/// intervals during any internal delay and at least once before returning,
/// and fail with [`AuthFailure::Cancelled`] once it is set.
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Performs one login attempt.
    async fn login(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<SessionToken, AuthFailure>;
}
