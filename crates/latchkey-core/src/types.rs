// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the orchestrator and its collaborators.

use secrecy::{ExposeSecret, SecretString};

/// An opaque session token issued by an [`Authenticator`](crate::Authenticator).
///
/// Debug output never reveals the token.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wraps a raw token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// Exposes the raw token for persistence or transport.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SessionToken {}

/// A username/password pair captured at the moment a login is admitted.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_debug_is_redacted() {
        let token = SessionToken::new("mockToken123");
        let debug = format!("{token:?}");
        assert!(!debug.contains("mockToken123"));
        assert!(debug.contains("REDACTED"));
        assert_eq!(token.expose(), "mockToken123");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("anne", SecretString::from("gowthami".to_string()));
        let debug = format!("{creds:?}");
        assert!(debug.contains("anne"));
        assert!(!debug.contains("gowthami"));
    }

    #[test]
    fn tokens_compare_by_value() {
        assert_eq!(SessionToken::new("a"), SessionToken::new("a"));
        assert_ne!(SessionToken::new("a"), SessionToken::new("b"));
    }
}
