//! Storage side of kalends: the persisted document model, the `EventStore`
//! capability consumed by the service layer, the date-part search predicate
//! and an in-memory store backed by JSON fixtures.

pub mod error;
pub mod memory;
pub mod model;
pub mod query;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::EventStore;
