//! Process-wide session store.
//!
//! Holds the authenticated identity (opaque bearer token plus profile) for
//! the duration of a login. The store is read on construction, persisted on
//! every change, and cleared on logout. Interested parties subscribe to a
//! watch channel instead of polling, replacing the browser storefront's
//! implicit cross-tab storage event with an explicit publish/subscribe
//! interface.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use ecopuls_core::{Session, UserProfile};

/// Errors that can occur persisting or loading a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted session could not be (de)serialized.
    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistence backend for the session store.
///
/// The file backend is the production path; the in-memory backend backs
/// tests and one-shot invocations that must not touch disk.
pub trait SessionBackend: Send + Sync {
    /// Load the persisted session, if any.
    fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Persist the session; `None` removes any persisted state.
    fn store(&self, session: Option<&Session>) -> Result<(), SessionError>;
}

/// JSON-file persistence, holding the `token` and `user` keys.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, session: Option<&Session>) -> Result<(), SessionError> {
        match session {
            Some(session) => {
                let json = serde_json::to_string_pretty(session)?;
                std::fs::write(&self.path, json)?;
            }
            None => {
                if let Err(e) = std::fs::remove_file(&self.path)
                    && e.kind() != std::io::ErrorKind::NotFound
                {
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }
}

/// In-memory persistence for tests; state lives only as long as the backend.
#[derive(Default)]
pub struct MemoryBackend {
    session: RwLock<Option<Session>>,
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self
            .session
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn store(&self, session: Option<&Session>) -> Result<(), SessionError> {
        *self
            .session
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = session.cloned();
        Ok(())
    }
}

/// Process-wide session singleton.
///
/// Cheap to clone; all clones share the same state and watch channel.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    current: RwLock<Option<Session>>,
    tx: watch::Sender<Option<Session>>,
    backend: Box<dyn SessionBackend>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("logged_in", &self.current().is_some())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store over an arbitrary backend, loading any persisted
    /// session immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend fails to load.
    pub fn with_backend(backend: Box<dyn SessionBackend>) -> Result<Self, SessionError> {
        let initial = match backend.load() {
            Ok(session) => session,
            Err(SessionError::Serialize(e)) => {
                // A corrupt session file should not brick the client.
                warn!(error = %e, "Persisted session is corrupt; starting anonymous");
                None
            }
            Err(e) => return Err(e),
        };

        let (tx, _rx) = watch::channel(initial.clone());
        Ok(Self {
            inner: Arc::new(Inner {
                current: RwLock::new(initial),
                tx,
                backend,
            }),
        })
    }

    /// Create a store persisted to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if an existing session file cannot be read.
    pub fn file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        Self::with_backend(Box::new(FileBackend::new(path.as_ref())))
    }

    /// Create an in-memory store (nothing persists across processes).
    #[must_use]
    pub fn in_memory() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(None),
                tx,
                backend: Box::new(MemoryBackend::default()),
            }),
        }
    }

    /// The current bearer token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    /// The current session, if logged in.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    /// The current profile, if logged in.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    /// Store a freshly issued session and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if persistence fails; the in-memory state is
    /// updated regardless so the running process stays logged in.
    pub fn set_session(&self, token: String, user: UserProfile) -> Result<(), SessionError> {
        let session = Session { token, user };
        self.replace(Some(session))
    }

    /// Clear the session (logout) and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if removing the persisted state fails.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.replace(None)
    }

    /// Subscribe to session changes. The receiver yields the new session
    /// (or `None` after logout) whenever the store changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.inner.tx.subscribe()
    }

    fn replace(&self, session: Option<Session>) -> Result<(), SessionError> {
        {
            let mut guard = self
                .inner
                .current
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *guard = session.clone();
        }
        self.inner.tx.send_replace(session.clone());
        debug!(logged_in = session.is_some(), "Session changed");
        self.inner.backend.store(session.as_ref())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.inner
            .current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
