//! In-memory session store mirrored to durable storage.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use tracing::{debug, warn};

use super::models::{Role, Session};
use super::storage::{PersistedSession, SessionError, SessionFile};

type Subscriber = Box<dyn Fn(&Session) + Send + Sync>;

/// Owner of the session for the lifetime of the client process.
///
/// Durable storage is a mirror, not a second source of truth: it seeds the
/// store once at startup and is thereafter written only from [`Self::set`].
pub struct SessionStore {
    session: RwLock<Session>,
    storage: SessionFile,
    epoch: AtomicU64,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl SessionStore {
    /// Open the store, seeding it from durable storage.
    ///
    /// A persisted pair with exactly one key present is surfaced as
    /// [`SessionError::Inconsistent`] rather than repaired. A role string
    /// this build does not recognize keeps the token but resolves no role,
    /// so no navigation will be offered.
    pub fn open(storage: SessionFile) -> Result<Self, SessionError> {
        let persisted = storage.load()?;
        let role = persisted.role.as_deref().and_then(|raw| match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                warn!(role = raw, "persisted role not recognized; no navigation will be offered");
                None
            }
        });
        let session = Session {
            token: persisted.token,
            role,
        };
        Ok(Self {
            session: RwLock::new(session),
            storage,
            epoch: AtomicU64::new(0),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    /// Current session snapshot. Never fails.
    pub fn get(&self) -> Session {
        self.session.read().expect("session lock poisoned").clone()
    }

    /// Replace the session and mirror it to durable storage.
    ///
    /// Token and role live and die together: if either argument is absent,
    /// both are cleared, in memory and on disk. Subscribers run only after
    /// the mutation and the durable write have completed.
    pub fn set(&self, token: Option<String>, role: Option<Role>) {
        let next = match (token, role) {
            (Some(token), Some(role)) => Session {
                token: Some(token),
                role: Some(role),
            },
            _ => Session::default(),
        };
        let persisted = PersistedSession {
            token: next.token.clone(),
            role: next.role.map(|role| role.to_string()),
        };

        {
            let mut current = self.session.write().expect("session lock poisoned");
            *current = next.clone();
        }
        if let Err(err) = self.storage.store(&persisted) {
            warn!(error = %err, "failed to mirror session to durable storage");
        }
        self.epoch.fetch_add(1, Ordering::SeqCst);
        debug!(authenticated = next.is_authenticated(), "session replaced");
        self.notify(&next);
    }

    /// Clear the session (logout).
    pub fn clear(&self) {
        self.set(None, None);
    }

    /// Monotonic change counter. Consumers capture it before awaiting a fetch
    /// and discard responses that outlived the session they were issued under.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Register a change observer, invoked synchronously after every
    /// [`Self::set`] with the new session snapshot.
    pub fn subscribe(&self, subscriber: impl Fn(&Session) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .push(Box::new(subscriber));
    }

    fn notify(&self, session: &Session) {
        let subscribers = self.subscribers.lock().expect("subscriber lock poisoned");
        for subscriber in subscribers.iter() {
            subscriber(session);
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.get())
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}
