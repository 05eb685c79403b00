// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a JSON login endpoint.
//!
//! `POST {endpoint}` with `{"username", "password"}` and expects
//! `{"token"}` back. Every await races the cancel token so a cancelled login
//! returns promptly even while the request is on the wire.

use std::time::Duration;

use async_trait::async_trait;
use latchkey_config::model::AuthConfig;
use latchkey_core::{AuthFailure, Authenticator, Credentials, LatchkeyError, SessionToken};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::types::{LoginRequest, LoginResponse};

/// Authenticates against a remote login endpoint.
///
/// Retries transient errors (429, 500, 502, 503) up to `max_retries` times.
#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    client: reqwest::Client,
    endpoint: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpAuthenticator {
    pub fn new(config: &AuthConfig) -> Result<Self, LatchkeyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LatchkeyError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn attempt(
        &self,
        body: &LoginRequest<'_>,
        cancel: &CancellationToken,
    ) -> Result<Result<SessionToken, (StatusCode, AuthFailure)>, AuthFailure> {
        let response = tokio::select! {
            () = cancel.cancelled() => return Err(AuthFailure::Cancelled),
            sent = self.client.post(&self.endpoint).json(body).send() => {
                sent.map_err(|e| AuthFailure::Unexpected(format!("HTTP request failed: {e}")))?
            }
        };

        let status = response.status();
        debug!(status = %status, "login response received");

        if !status.is_success() {
            return Ok(Err((status, classify(status))));
        }

        let parsed = tokio::select! {
            () = cancel.cancelled() => return Err(AuthFailure::Cancelled),
            parsed = response.json::<LoginResponse>() => {
                parsed.map_err(|e| {
                    AuthFailure::Unexpected(format!("failed to parse login response: {e}"))
                })?
            }
        };
        Ok(Ok(SessionToken::new(parsed.token)))
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    fn name(&self) -> &str {
        "http"
    }

    async fn login(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<SessionToken, AuthFailure> {
        let body = LoginRequest {
            username: &credentials.username,
            password: credentials.password.expose_secret(),
        };

        let mut last_failure = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying login after transient error");
                tokio::select! {
                    () = cancel.cancelled() => return Err(AuthFailure::Cancelled),
                    () = tokio::time::sleep(self.retry_delay) => {}
                }
            }

            match self.attempt(&body, cancel).await? {
                Ok(token) => {
                    if cancel.is_cancelled() {
                        return Err(AuthFailure::Cancelled);
                    }
                    return Ok(token);
                }
                Err((status, failure))
                    if is_transient_error(status) && attempt < self.max_retries =>
                {
                    warn!(status = %status, "transient error, will retry");
                    last_failure = Some(failure);
                }
                Err((_, failure)) => return Err(failure),
            }
        }

        Err(last_failure.unwrap_or_else(|| {
            AuthFailure::Unexpected("login request failed after retries".into())
        }))
    }
}

/// Maps a non-success status onto the failure taxonomy.
fn classify(status: StatusCode) -> AuthFailure {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthFailure::InvalidCredentials,
        s if s.is_server_error() => AuthFailure::ServerError,
        s => AuthFailure::Unexpected(format!("login endpoint returned {s}")),
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503)
}
