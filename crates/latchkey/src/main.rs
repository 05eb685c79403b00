// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Latchkey - a command-line login client.
//!
//! This is the binary entry point.

mod app;
mod login;
mod prompt;
mod shell;
mod status;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use latchkey_config::LatchkeyConfig;

/// Latchkey - log in to a remote service with lockout and session restore.
#[derive(Parser, Debug)]
#[command(name = "latchkey", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in once. The password comes from LATCHKEY_PASSWORD or a prompt.
    Login {
        #[arg(long, short)]
        username: String,
        /// Persist the session token so later runs are restored.
        #[arg(long)]
        remember_me: bool,
    },
    /// Forget the persisted session.
    Logout,
    /// Show whether a persisted session would be restored.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Interactive session over one orchestrator.
    Shell,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => latchkey_config::load_and_validate_path(path),
        None => latchkey_config::load_and_validate(),
    };
    let config: LatchkeyConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            latchkey_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Commands::Login {
            username,
            remember_me,
        } => login::run_login(&config, username, remember_me).await,
        Commands::Logout => login::run_logout(&config).await,
        Commands::Status { json } => status::run_status(&config, json).await,
        Commands::Shell => shell::run_shell(&config).await,
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber with an env-filter.
///
/// `RUST_LOG` wins when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("latchkey={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn login_parses_flags() {
        let cli = Cli::parse_from(["latchkey", "login", "--username", "anne", "--remember-me"]);
        match cli.command {
            Commands::Login {
                username,
                remember_me,
            } => {
                assert_eq!(username, "anne");
                assert!(remember_me);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["latchkey", "status", "--config", "/tmp/latchkey.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/latchkey.toml")));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config =
            latchkey_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.policy.max_failures, 3);
    }
}
