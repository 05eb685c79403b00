// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./latchkey.toml` > `~/.config/latchkey/latchkey.toml` >
//! `/etc/latchkey/latchkey.toml`, with `LATCHKEY_*` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LatchkeyConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/latchkey/latchkey.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "latchkey.toml";

/// The per-user config file under the XDG config directory, if one exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("latchkey").join("latchkey.toml"))
}

/// Builds the full layered Figment without extracting it.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. System file
/// 3. User file
/// 4. Local file
/// 5. `LATCHKEY_*` environment variables
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(LatchkeyConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Loads configuration from the standard hierarchy.
pub fn load_config() -> Result<LatchkeyConfig, figment::Error> {
    build_figment().extract()
}

/// Loads configuration from a TOML string over compiled defaults (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LatchkeyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LatchkeyConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Loads configuration from one explicit file, still honouring env overrides.
pub fn load_config_from_path(path: &Path) -> Result<LatchkeyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LatchkeyConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

const SECTIONS: [&str; 5] = ["app", "policy", "store", "auth", "network"];

/// Maps `LATCHKEY_SECTION_KEY` onto `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `LATCHKEY_POLICY_MAX_FAILURES` lands on `policy.max_failures`. Variables
/// outside the known sections (such as `LATCHKEY_PASSWORD`) are ignored.
fn env_provider() -> Env {
    Env::prefixed("LATCHKEY_")
        .filter(|key| is_section_key(key.as_str()))
        .map(|key| map_env_key(key.as_str()).into())
}

pub(crate) fn is_section_key(key: &str) -> bool {
    SECTIONS.iter().any(|section| {
        key.strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('_'))
    })
}

pub(crate) fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
