//! Durable bearer-token storage.
//!
//! DESIGN
//! ======
//! One process-wide slot holding the current session token. No expiry is
//! tracked locally; expiry surfaces reactively as a 401 from the backend,
//! at which point the client clears this slot. Reads never fail: an
//! unreadable or missing slot is simply an absent token.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Single durable slot for the current session token.
pub trait TokenStore: Send + Sync {
    /// Current token, or `None` if never set or cleared. Never fails.
    fn get(&self) -> Option<String>;
    /// Overwrite the slot unconditionally.
    fn set(&self, token: &str);
    /// Empty the slot. Idempotent: clearing an empty slot is a no-op.
    fn clear(&self);
}

// =============================================================================
// FILE-BACKED STORE
// =============================================================================

/// Token slot persisted to a single file, surviving process restarts.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() { None } else { Some(token.to_string()) }
    }

    fn set(&self, token: &str) {
        if let Err(error) = std::fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), %error, "failed to persist token");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "failed to clear token");
            }
        }
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Ephemeral token slot. Used by tests and sessions that should not
/// outlive the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot.lock().map(|slot| slot.clone()).unwrap_or(None)
    }

    fn set(&self, token: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
