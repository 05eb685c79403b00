// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level Latchkey configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LatchkeyConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Validation and lockout policy.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Credential store location.
    #[serde(default)]
    pub store: StoreConfig,

    /// Remote authentication endpoint.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Reachability probe.
    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Login gating and lockout policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Consecutive failures that engage a lockout.
    #[serde(default = "default_max_failures")]
    pub max_failures: u32,

    /// How long a lockout lasts, in minutes.
    #[serde(default = "default_lockout_minutes")]
    pub lockout_minutes: u64,

    /// Minimum password length (in characters) for the login gate to open.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_failures: default_max_failures(),
            lockout_minutes: default_lockout_minutes(),
            min_password_length: default_min_password_length(),
        }
    }
}

fn default_max_failures() -> u32 {
    3
}

fn default_lockout_minutes() -> u64 {
    15
}

fn default_min_password_length() -> usize {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// File holding the persisted session token.
    #[serde(default = "default_token_path")]
    pub token_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

fn default_token_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("latchkey").join("session.token"))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "latchkey-session.token".to_string())
}

/// Remote authentication endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// URL receiving `POST {"username", "password"}`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on transient statuses (429, 500, 502, 503).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080/login".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    1000
}

/// TCP reachability probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// `host:port` the probe connects to.
    #[serde(default = "default_probe_addr")]
    pub probe_addr: String,

    /// Seconds between probes.
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,

    /// Connect timeout for one probe, in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            probe_addr: default_probe_addr(),
            probe_interval_secs: default_probe_interval_secs(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

fn default_probe_addr() -> String {
    "1.1.1.1:443".to_string()
}

fn default_probe_interval_secs() -> u64 {
    5
}

fn default_probe_timeout_ms() -> u64 {
    1500
}
