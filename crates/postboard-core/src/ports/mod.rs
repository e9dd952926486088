//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod clock;
mod object_store;
mod repository;

pub use clock::{Clock, SystemClock};
pub use object_store::{MediaUrls, ObjectStore, StoredObject, validate_key};
pub use repository::{BaseRepository, PostRepository};
