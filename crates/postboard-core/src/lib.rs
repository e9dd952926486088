//! # Postboard Core
//!
//! The domain layer of the blog: posts, the ports the outside world must
//! implement (document store, object store, clock) and the [`PostBoard`]
//! service that keeps the in-memory post cache in sync with the store.
//! This crate performs no I/O of its own.

pub mod board;
pub mod domain;
pub mod error;
pub mod ports;

pub use board::{BoardSettings, PostBoard, SelectedFile, SubmitOutcome, SubmitPost};
pub use error::BoardError;
