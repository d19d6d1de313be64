//! In-memory document storage backend for dinestore.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It is meant for development and tests: it follows the same matching, identifier and
//! acknowledgment rules as the MongoDB backend without needing a server.
//!
//! # Quick Start
//!
//! ```ignore
//! use dinestore::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!     let repo = RestaurantRepo::new(&store);
//!
//!     let saved = repo.insert(Restaurant::default()).await?;
//!     assert!(saved.is_persisted());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as dinestore_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
