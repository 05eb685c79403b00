// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `latchkey shell` command implementation.
//!
//! A readline REPL over one orchestrator, so failure counts and lockouts
//! carry across attempts for the lifetime of the process.

use colored::Colorize;
use latchkey_config::LatchkeyConfig;
use latchkey_core::LatchkeyError;
use latchkey_session::LoginOrchestrator;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::app::App;
use crate::{login, prompt};

const HELP: &str = "\
commands:
  user <name>     set the username
  password        enter the password (hidden)
  remember        toggle remember-me
  login           attempt to log in
  logout          clear the session and all input
  unlock          clear an expired lockout
  state           show the current state
  /quit           exit";

/// Runs the `latchkey shell` interactive REPL.
pub async fn run_shell(config: &LatchkeyConfig) -> Result<bool, LatchkeyError> {
    let app = App::connect(config).await?;
    let orchestrator = &app.orchestrator;

    let mut rl = DefaultEditor::new()
        .map_err(|e| LatchkeyError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "latchkey shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "/quit".yellow());
    if orchestrator.state().login_success {
        println!("{}", "restored persisted session".dimmed());
    }

    let prompt = format!("{}> ", "latchkey".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if let Err(e) = handle_command(orchestrator, trimmed).await {
                    eprintln!("{}: {e}", "error".red());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(true)
}

async fn handle_command(
    orchestrator: &LoginOrchestrator,
    input: &str,
) -> Result<(), LatchkeyError> {
    let (command, arg) = match input.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (input, ""),
    };

    match command {
        "help" => println!("{HELP}"),
        "user" => {
            orchestrator.set_username(arg);
            print_gate(orchestrator);
        }
        "password" => {
            orchestrator.set_password(prompt::prompt_password()?);
            print_gate(orchestrator);
        }
        "remember" => {
            let on = orchestrator.toggle_remember_me();
            println!("remember-me {}", if on { "on".green() } else { "off".yellow() });
        }
        "login" => {
            let outcome = login::login_until_interrupted(orchestrator).await;
            login::report(orchestrator, outcome);
        }
        "logout" => {
            orchestrator.reset();
            println!("{}", "logged out".green());
        }
        "unlock" => {
            if orchestrator.reset_lockout_if_expired() {
                println!("{}", "lockout cleared".green());
            } else if orchestrator.is_locked() {
                println!("{}", login::not_admitted_reason(orchestrator).yellow());
            } else {
                println!("{}", "not locked".dimmed());
            }
        }
        "state" => print_state(orchestrator),
        other => println!("unknown command {}; type {}", other.red(), "help".yellow()),
    }
    Ok(())
}

fn print_gate(orchestrator: &LoginOrchestrator) {
    if orchestrator.is_button_enabled() {
        println!("{}", "ready to log in".green());
    } else {
        println!("{}", login::not_admitted_reason(orchestrator).dimmed());
    }
}

fn print_state(orchestrator: &LoginOrchestrator) {
    let state = orchestrator.state();
    println!("  username:    {}", state.username);
    println!("  remember-me: {}", state.remember_me);
    println!("  logged in:   {}", state.login_success);
    println!("  failures:    {}", state.failure_count);
    println!("  offline:     {}", state.is_offline);
    match state.remaining_lockout_seconds().filter(|_| state.is_locked()) {
        Some(secs) => println!("  locked:      {}s remaining", secs),
        None => println!("  locked:      false"),
    }
    if !state.error_message.is_empty() {
        println!("  error:       {}", state.error_message.red());
    }
    println!("  can log in:  {}", orchestrator.is_button_enabled());
}
