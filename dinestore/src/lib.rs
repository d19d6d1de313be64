//! Restaurant data-access service built on a typed document store.
//!
//! This crate is the entry point of the dinestore project. It re-exports the
//! store primitives from `dinestore-core` and adds the restaurant domain on top:
//!
//! - [`model`] - The `Restaurant` entity and search criteria
//! - [`repository`] - Restaurant queries and writes over a [`DocumentStore`](store::DocumentStore)
//! - [`orchestration`] - Request-facing operations returning plain data and success flags
//!
//! # Quick Start
//!
//! ```ignore
//! use dinestore::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> DocumentStoreResult<()> {
//!     // One store for the whole process
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!
//!     // Repository and orchestration are cheap and built per request
//!     let restaurants = RestaurantOrchestration::new(RestaurantRepo::new(&store));
//!
//!     restaurants.insert_restaurant(Restaurant::new("Luigi's", "Italian")).await?;
//!     let italian = restaurants.find_restaurants("Luigi", "Italian").await?;
//!
//!     println!("Found {} restaurants", italian.len());
//!
//!     let report = store.connection_check().await;
//!     println!("Store is {:?}", HealthStatus::classify(&report));
//!
//!     store.shutdown().await
//! }
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`mongodb`] - MongoDB storage (requires the `mongodb` feature)

pub mod model;
pub mod orchestration;
pub mod prelude;
pub mod repository;

pub use dinestore_core::{backend, document, error, health, query, store, write};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use dinestore_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use dinestore_mongodb::{MongoDbConfig, MongoDbStore, MongoDbStoreBuilder};
}
