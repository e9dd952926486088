//! In-memory adapters - used when no database or bucket is configured.

mod objects;
mod posts;

pub use objects::InMemoryObjectStore;
pub use posts::InMemoryPostRepository;
