//! Storage capabilities consumed by the authentication layer.
//!
//! Services depend on the narrow reader/writer traits, never on a concrete
//! backend. [`Stores`] wires one backend into every capability at once.

pub mod memory;
pub mod postgres;
pub mod traits;

use std::sync::Arc;

use gatehouse_database::{DatabasePool, SessionRepository, UserRepository};

pub use memory::MemoryStore;
pub use traits::{SessionReader, SessionStore, SessionWriter, UserReader, UserStore, UserWriter};

/// One backend exposed through each capability trait.
#[derive(Clone)]
pub struct Stores {
    /// Read-only view of users.
    pub user_reader: Arc<dyn UserReader>,
    /// Full user access.
    pub users: Arc<dyn UserStore>,
    /// Full session access.
    pub sessions: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

impl Stores {
    /// Back every capability with a single process-local store.
    pub fn memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            user_reader: store.clone(),
            users: store.clone(),
            sessions: store,
        }
    }

    /// Back every capability with PostgreSQL repositories sharing `pool`.
    pub fn postgres(pool: &DatabasePool) -> Self {
        let users = Arc::new(UserRepository::new(pool.pool().clone()));
        let sessions = Arc::new(SessionRepository::new(pool.pool().clone()));
        Self {
            user_reader: users.clone(),
            users,
            sessions,
        }
    }
}
