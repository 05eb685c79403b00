// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Latchkey workspace.

use strum::IntoStaticStr;
use thiserror::Error;

/// The primary error type used by collaborator implementations and the binary.
#[derive(Debug, Error)]
pub enum LatchkeyError {
    /// Configuration errors (invalid values, unusable paths, bad endpoints).
    #[error("configuration error: {0}")]
    Config(String),

    /// Credential store errors (unreadable token file, failed atomic replace).
    #[error("credential store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Transport errors raised while building or driving a remote collaborator.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Interactive prompt failures (no TTY, unreadable input).
    #[error("prompt error: {0}")]
    Prompt(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Why an [`Authenticator`](crate::Authenticator) call did not yield a token.
///
/// `InvalidCredentials` and `ServerError` are the classified failures that
/// count toward lockout with a dedicated message. `Cancelled` is never shown
/// to the user. Anything else is carried as `Unexpected`.
#[derive(Debug, Clone, PartialEq, Eq, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AuthFailure {
    /// The remote side rejected the username/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The remote side failed to process the request.
    #[error("server error")]
    ServerError,

    /// The call observed a cancellation request and stopped early.
    #[error("login cancelled")]
    Cancelled,

    /// Any failure the authenticator could not classify.
    #[error("unexpected authentication failure: {0}")]
    Unexpected(String),
}

impl AuthFailure {
    /// Returns true for the failures that map to a dedicated user message.
    pub fn is_classified(&self) -> bool {
        matches!(self, AuthFailure::InvalidCredentials | AuthFailure::ServerError)
    }

    /// Short label for structured log fields.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
