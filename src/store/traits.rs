//! The `SessionStore` trait — the persistence boundary this core assumes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::session::Session;

/// Backend-agnostic session persistence.
///
/// `save` carries no optimistic-concurrency check: two concurrent turns
/// against the same session race, and the later write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch a session by id, or `None` if it doesn't exist.
    async fn get(&self, id: Uuid) -> Result<Option<Session>, StoreError>;

    /// Insert a newly created session. Fails if the id already exists.
    async fn create(&self, session: &Session) -> Result<(), StoreError>;

    /// Write a session back. Last write wins.
    async fn save(&self, id: Uuid, session: &Session) -> Result<(), StoreError>;
}
