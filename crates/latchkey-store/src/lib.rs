// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed credential store.
//!
//! The token lives alone in one file. Writes go to a temporary file in the
//! same directory which then atomically replaces the target, so a crash never
//! leaves a half-written token behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use latchkey_config::model::StoreConfig;
use latchkey_core::{CredentialStore, LatchkeyError, SessionToken};
use tempfile::NamedTempFile;
use tracing::debug;

/// A [`CredentialStore`] that keeps the session token in a single file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.token_path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomic(&self, contents: &str) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        create_private_dir(&dir)?;

        // NamedTempFile is created 0600 on unix.
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

fn store_error(e: io::Error) -> LatchkeyError {
    LatchkeyError::Store { source: Box::new(e) }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, token: &SessionToken) -> Result<(), LatchkeyError> {
        self.write_atomic(token.expose()).map_err(store_error)?;
        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    fn get(&self) -> Result<Option<SessionToken>, LatchkeyError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim_end_matches(['\r', '\n']);
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SessionToken::new(token)))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(store_error(e)),
        }
    }

    fn clear(&self) -> Result<(), LatchkeyError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session token cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error(e)),
        }
    }
}
