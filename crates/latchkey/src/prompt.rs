// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password acquisition via TTY prompt or the LATCHKEY_PASSWORD environment variable.

use latchkey_core::LatchkeyError;
use secrecy::SecretString;

/// The environment variable name for providing the login password.
pub const PASSWORD_ENV_VAR: &str = "LATCHKEY_PASSWORD";

/// Get the password from the environment variable or an interactive TTY prompt.
///
/// Priority:
/// 1. `LATCHKEY_PASSWORD` environment variable (for scripts)
/// 2. Interactive TTY prompt via `rpassword`
pub fn get_password() -> Result<SecretString, LatchkeyError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }
    prompt_password()
}

/// Prompt on the TTY, never consulting the environment.
pub fn prompt_password() -> Result<SecretString, LatchkeyError> {
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        let password = rpassword::prompt_password("Password: ")
            .map_err(|e| LatchkeyError::Prompt(format!("failed to read password: {e}")))?;
        return Ok(SecretString::from(password));
    }

    Err(LatchkeyError::Prompt(
        "No password provided. Set LATCHKEY_PASSWORD environment variable or run interactively."
            .to_string(),
    ))
}
