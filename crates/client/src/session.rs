//! Durable session state.
//!
//! The store keeps the current [`Session`] in memory and mirrors it to two
//! independent entries under the data directory:
//!
//! ```text
//! data_dir/
//! ├── session_token      (raw token string)
//! └── current_user.json  (JSON user record)
//! ```
//!
//! The two writes carry no transactional guarantee. A crash between them
//! leaves a partial pair on disk; [`SessionStore::restore`] treats any
//! partial or unreadable pair as logged out and never uses half a session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

use crate::models::{CurrentUser, Session};

/// File name of the persisted bearer token.
const TOKEN_FILE: &str = "session_token";

/// File name of the persisted user record.
const USER_FILE: &str = "current_user.json";

/// Errors that can occur when persisting or restoring a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing a session entry failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serializing the user record failed.
    #[error("session record error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Tracks the current authentication state and makes it durable.
///
/// There is a single logical session per store. Reads during request
/// construction take a shared lock; the only writers are the
/// login/logout/delete flows, which are user-serialized.
#[derive(Debug)]
pub struct SessionStore {
    dir: PathBuf,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// The in-memory session starts empty; call [`Self::restore`] to pick
    /// up a persisted one.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(Self {
            dir,
            current: RwLock::new(None),
        })
    }

    /// Load the persisted session, if a complete one exists.
    ///
    /// Both entries present and parseable sets the in-memory session and
    /// returns it. Exactly one entry present, or an unreadable user record,
    /// yields a logged-out state; the partial data is left on disk unused.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures other than the entries being
    /// absent.
    pub fn restore(&self) -> Result<Option<Session>, SessionError> {
        let token = match read_if_exists(&self.dir.join(TOKEN_FILE))? {
            Some(token) => token,
            None => return Ok(None),
        };

        let Some(user_json) = read_if_exists(&self.dir.join(USER_FILE))? else {
            tracing::debug!("token present without user record; treating as logged out");
            return Ok(None);
        };

        let user: CurrentUser = match serde_json::from_str(&user_json) {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "persisted user record unreadable; treating as logged out");
                return Ok(None);
            }
        };

        let session = Session { token, user };
        *self.write_lock() = Some(session.clone());
        Ok(Some(session))
    }

    /// Set the in-memory session and write both persisted entries.
    ///
    /// The token entry is written first; there is no transactional
    /// guarantee across the two writes.
    ///
    /// # Errors
    ///
    /// Returns an error if either entry cannot be written. The in-memory
    /// session is set regardless.
    pub fn establish(&self, token: String, user: CurrentUser) -> Result<(), SessionError> {
        *self.write_lock() = Some(Session {
            token: token.clone(),
            user: user.clone(),
        });

        fs::write(self.dir.join(TOKEN_FILE), &token)?;
        fs::write(self.dir.join(USER_FILE), serde_json::to_string(&user)?)?;
        Ok(())
    }

    /// Drop the session, in memory and on disk.
    ///
    /// The in-memory session is cleared unconditionally before the files
    /// are touched, so the store always ends up unauthenticated. A missing
    /// entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if removing an existing entry fails.
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.write_lock() = None;

        remove_if_exists(&self.dir.join(TOKEN_FILE))?;
        remove_if_exists(&self.dir.join(USER_FILE))?;
        Ok(())
    }

    /// The current bearer token, if authenticated.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read_lock().as_ref().map(|s| s.token.clone())
    }

    /// The current user, if authenticated.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.read_lock().as_ref().map(|s| s.user.clone())
    }

    /// Whether a session is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_lock().is_some()
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read a file to a string, mapping absence to `None`.
fn read_if_exists(path: &Path) -> Result<Option<String>, SessionError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Remove a file, treating absence as success.
fn remove_if_exists(path: &Path) -> Result<(), SessionError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn test_user() -> CurrentUser {
        CurrentUser {
            username: "alice".to_string(),
        }
    }

    #[test]
    fn test_restore_with_both_entries() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();
        store.establish("tok-1".to_string(), test_user()).unwrap();

        // Simulate a reload with a fresh store over the same directory.
        let reloaded = SessionStore::new(dir.path()).unwrap();
        let session = reloaded.restore().unwrap().unwrap();

        assert_eq!(session.token, "tok-1");
        assert_eq!(session.user, test_user());
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token().as_deref(), Some("tok-1"));
    }

    #[test]
    fn test_restore_with_token_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOKEN_FILE), "tok-orphan").unwrap();

        let store = SessionStore::new(dir.path()).unwrap();
        assert!(store.restore().unwrap().is_none());
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_restore_with_user_only() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(USER_FILE),
            serde_json::to_string(&test_user()).unwrap(),
        )
        .unwrap();

        let store = SessionStore::new(dir.path()).unwrap();
        assert!(store.restore().unwrap().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_restore_with_corrupt_user_record() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOKEN_FILE), "tok-1").unwrap();
        fs::write(dir.path().join(USER_FILE), "{not json").unwrap();

        let store = SessionStore::new(dir.path()).unwrap();
        assert!(store.restore().unwrap().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_restore_with_nothing_persisted() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();
        assert!(store.restore().unwrap().is_none());
    }

    #[test]
    fn test_clear_always_unauthenticates() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();
        store.establish("tok-1".to_string(), test_user()).unwrap();

        store.clear().unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);

        // Clearing an already-clear store is fine too.
        store.clear().unwrap();
        assert!(!store.is_authenticated());

        // Nothing survives a reload either.
        let reloaded = SessionStore::new(dir.path()).unwrap();
        assert!(reloaded.restore().unwrap().is_none());
    }

    #[test]
    fn test_establish_then_restore_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();
        store.establish("tok-2".to_string(), test_user()).unwrap();

        let restored = store.restore().unwrap().unwrap();
        assert_eq!(restored.token, "tok-2");
        assert_eq!(restored.user.username, "alice");
    }

    #[test]
    fn test_establish_overwrites_previous_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path()).unwrap();
        store.establish("tok-1".to_string(), test_user()).unwrap();
        store
            .establish(
                "tok-2".to_string(),
                CurrentUser {
                    username: "bob".to_string(),
                },
            )
            .unwrap();

        assert_eq!(store.token().as_deref(), Some("tok-2"));
        assert_eq!(store.current_user().unwrap().username, "bob");
    }
}
