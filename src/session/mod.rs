//! Session state: the (token, role) pair, its durable mirror, and the store
//! that owns both for the lifetime of the client process.

mod models;
mod storage;
mod store;

pub use models::{Role, Session};
pub use storage::{PersistedSession, SessionError, SessionFile};
pub use store::SessionStore;
