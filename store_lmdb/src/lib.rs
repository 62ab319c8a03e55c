//! LMDB storage backend for the podium lifecycle engine.
//!
//! Implements all storage traits from `podium-store` using the `heed` LMDB
//! bindings. One [`LmdbStore`] owns the environment and every named database;
//! each entity module holds its key layout and trait implementation.

pub mod attendance;
pub mod environment;
pub mod error;
pub mod event;
pub mod presentation;
pub mod user;
pub mod vote;

pub use environment::LmdbStore;
pub use error::LmdbError;
