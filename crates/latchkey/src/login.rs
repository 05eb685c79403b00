// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `latchkey login` and `latchkey logout` command implementations.

use colored::Colorize;
use latchkey_config::LatchkeyConfig;
use latchkey_core::LatchkeyError;
use latchkey_session::{LoginOrchestrator, LoginOutcome, messages};
use tracing::debug;

use crate::app::App;
use crate::prompt;

/// Runs one login attempt. Ctrl+C cancels it.
///
/// Returns true on success.
pub async fn run_login(
    config: &LatchkeyConfig,
    username: String,
    remember_me: bool,
) -> Result<bool, LatchkeyError> {
    let app = App::connect(config).await?;
    let orchestrator = &app.orchestrator;

    orchestrator.set_username(username);
    orchestrator.set_password(prompt::get_password()?);
    orchestrator.set_remember_me(remember_me);

    let outcome = login_until_interrupted(orchestrator).await;
    report(orchestrator, outcome);
    Ok(outcome == LoginOutcome::Succeeded)
}

/// Clears the persisted session.
pub async fn run_logout(config: &LatchkeyConfig) -> Result<bool, LatchkeyError> {
    let app = App::local(config)?;
    let had_session = app.orchestrator.state().login_success;
    app.orchestrator.reset();

    if had_session {
        println!("{}", "logged out".green());
    } else {
        println!("{}", "no persisted session".dimmed());
    }
    Ok(true)
}

/// Awaits `login`, requesting cancellation on Ctrl+C and still waiting for
/// the attempt to wind down.
pub async fn login_until_interrupted(orchestrator: &LoginOrchestrator) -> LoginOutcome {
    let login = orchestrator.login();
    tokio::pin!(login);

    tokio::select! {
        outcome = &mut login => return outcome,
        _ = tokio::signal::ctrl_c() => {}
    }

    debug!("interrupt received");
    orchestrator.cancel_login();
    login.await
}

/// Prints a one-line summary of an attempt.
pub fn report(orchestrator: &LoginOrchestrator, outcome: LoginOutcome) {
    let state = orchestrator.state();
    match outcome {
        LoginOutcome::Succeeded => {
            let remembered = if state.remember_me { " (remembered)" } else { "" };
            println!(
                "{}{}",
                format!("logged in as {}", state.username).green(),
                remembered.dimmed()
            );
        }
        LoginOutcome::Cancelled => println!("{}", "login cancelled".yellow()),
        LoginOutcome::AlreadyInFlight => println!("{}", "a login is already running".yellow()),
        LoginOutcome::NotAdmitted => eprintln!("{}", not_admitted_reason(orchestrator).red()),
        LoginOutcome::Locked
        | LoginOutcome::Offline
        | LoginOutcome::Failed
        | LoginOutcome::LockedOut => {
            eprintln!("{}", state.error_message.red());
        }
    }
}

/// Explains why the login gate is closed.
pub fn not_admitted_reason(orchestrator: &LoginOrchestrator) -> String {
    let state = orchestrator.state();
    let policy = orchestrator.policy();
    if state.is_locked() {
        let remaining = state.remaining_lockout_seconds().unwrap_or(0);
        return messages::locked(messages::minutes_ceil(remaining));
    }
    if state.is_offline {
        return messages::NO_INTERNET.to_string();
    }
    if state.username.is_empty() {
        return "username is required".to_string();
    }
    format!(
        "password must be at least {} characters",
        policy.min_password_length
    )
}
