//! # Postboard Infrastructure
//!
//! Concrete implementations of the ports defined in `postboard-core`:
//! where posts are stored and where cover images are uploaded.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL document store via SeaORM
//! - `s3` - S3-compatible object store via rust-s3

pub mod database;
pub mod memory;
pub mod s3_store;

// Re-exports - In-Memory
pub use memory::{InMemoryObjectStore, InMemoryPostRepository};

pub use database::DatabaseConfig;
pub use s3_store::S3Config;

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;

#[cfg(feature = "s3")]
pub use s3_store::S3ObjectStore;
