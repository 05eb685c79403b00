// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing message catalog.

use latchkey_core::AuthFailure;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
pub const NO_INTERNET: &str = "No internet connection. Check your network and try again.";

/// Lockout message for the given number of minutes.
pub fn locked(minutes: i64) -> String {
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    format!("Too many failed attempts. Try again in {minutes} {unit}.")
}

/// Message for a failed attempt that did not engage lockout.
pub fn for_failure(failure: &AuthFailure) -> &'static str {
    match failure {
        AuthFailure::InvalidCredentials => INVALID_CREDENTIALS,
        AuthFailure::ServerError => SERVER_ERROR,
        AuthFailure::Cancelled | AuthFailure::Unexpected(_) => GENERIC_FAILURE,
    }
}

/// Whole minutes covering `seconds`, never less than one.
pub fn minutes_ceil(seconds: i64) -> i64 {
    seconds.max(0).saturating_add(59).div_euclid(60).max(1)
}
