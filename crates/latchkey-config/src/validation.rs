// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::LatchkeyConfig;

/// Validates a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &LatchkeyConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.policy.max_failures < 1 {
        fail("policy.max_failures must be at least 1".to_string());
    }
    if config.policy.lockout_minutes < 1 {
        fail("policy.lockout_minutes must be at least 1".to_string());
    }
    if config.policy.min_password_length < 1 {
        fail("policy.min_password_length must be at least 1".to_string());
    }

    if config.store.token_path.trim().is_empty() {
        fail("store.token_path must not be empty".to_string());
    }

    let endpoint = config.auth.endpoint.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        fail(format!(
            "auth.endpoint `{endpoint}` must start with http:// or https://"
        ));
    }
    if config.auth.timeout_secs < 1 {
        fail("auth.timeout_secs must be at least 1".to_string());
    }

    if !is_host_port(&config.network.probe_addr) {
        fail(format!(
            "network.probe_addr `{}` must be in host:port form",
            config.network.probe_addr
        ));
    }
    if config.network.probe_interval_secs < 1 {
        fail("network.probe_interval_secs must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_host_port(addr: &str) -> bool {
    if addr.parse::<std::net::SocketAddr>().is_ok() {
        return true;
    }
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && host
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
                && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&LatchkeyConfig::default()).is_ok());
    }

    #[test]
    fn zero_max_failures_fails_validation() {
        let mut config = LatchkeyConfig::default();
        config.policy.max_failures = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "max_failures"));
    }

    #[test]
    fn non_http_endpoint_fails_validation() {
        let mut config = LatchkeyConfig::default();
        config.auth.endpoint = "ftp://example.com/login".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "auth.endpoint"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = LatchkeyConfig::default();
        config.policy.lockout_minutes = 0;
        config.store.token_path = "  ".to_string();
        config.network.probe_addr = "no-port".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn probe_addr_accepts_hostnames_and_ips() {
        assert!(is_host_port("example.com:443"));
        assert!(is_host_port("10.0.0.1:80"));
        assert!(is_host_port("[::1]:443"));
        assert!(!is_host_port("example.com"));
        assert!(!is_host_port("example.com:http"));
    }
}
