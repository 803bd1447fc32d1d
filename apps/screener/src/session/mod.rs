//! Session cache: where the last analysis lives between screens.

pub mod cache;
pub mod store;

pub use cache::ResultsCache;
pub use store::{FileStore, MemoryStore, SessionStore};
