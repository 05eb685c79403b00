// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `latchkey status` command implementation.
//!
//! Reports whether a persisted session would be restored. Never contacts the
//! login endpoint.

use colored::Colorize;
use latchkey_config::LatchkeyConfig;
use latchkey_core::LatchkeyError;
use serde::Serialize;

use crate::app::App;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub logged_in: bool,
    pub token_path: String,
    pub endpoint: String,
}

pub async fn run_status(config: &LatchkeyConfig, json: bool) -> Result<bool, LatchkeyError> {
    let app = App::local(config)?;
    let status = StatusResponse {
        logged_in: app.orchestrator.state().login_success,
        token_path: config.store.token_path.clone(),
        endpoint: config.auth.endpoint.clone(),
    };

    if json {
        let out = serde_json::to_string_pretty(&status)
            .map_err(|e| LatchkeyError::Internal(format!("failed to serialize status: {e}")))?;
        println!("{out}");
    } else if status.logged_in {
        println!("session: {}", "restored".green());
        println!("  token:    {}", status.token_path.dimmed());
        println!("  endpoint: {}", status.endpoint.dimmed());
    } else {
        println!("session: {}", "none".yellow());
    }
    Ok(true)
}
