//! In-memory session store, for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::SessionStore;
use crate::error::StoreError;
use crate::session::Session;

/// Session store backed by a process-local map.
#[derive(Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, id: Uuid) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn create(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(StoreError::Query(format!(
                "session {} already exists",
                session.id
            )));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn save(&self, id: Uuid, session: &Session) -> Result<(), StoreError> {
        self.sessions.write().await.insert(id, session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStatus;

    #[tokio::test]
    async fn create_get_save_roundtrip() {
        let store = MemoryStore::new();
        let session = Session::new("subject-1");
        let id = session.id;

        assert!(store.get(id).await.unwrap().is_none());
        store.create(&session).await.unwrap();
        assert!(store.get(id).await.unwrap().is_some());

        let mut updated = session.clone();
        updated.status = SessionStatus::Completed;
        store.save(id, &updated).await.unwrap();
        assert_eq!(
            store.get(id).await.unwrap().unwrap().status,
            SessionStatus::Completed
        );
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let store = MemoryStore::new();
        let session = Session::new("subject-1");
        store.create(&session).await.unwrap();
        assert!(store.create(&session).await.is_err());
    }
}
