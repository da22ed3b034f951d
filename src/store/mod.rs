//! Persistence boundary for sessions.
//!
//! No transactional guarantees: `save` is last-write-wins, per the session
//! concurrency model. `MemoryStore` backs tests and dev; `LibSqlStore` is
//! the durable backend.

pub mod libsql_backend;
pub mod memory;
pub mod traits;

pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::SessionStore;
