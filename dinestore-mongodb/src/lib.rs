//! MongoDB backend implementation for dinestore.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait.
//! To use it, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dinestore = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Behaviour
//!
//! - Filters are translated to native MongoDB queries; substring matches use an
//!   escaped, case-sensitive `$regex`
//! - String identifiers that parse as ObjectIds are stored as ObjectIds and read back as hex
//! - Blank identifiers get a fresh ObjectId on insert
//! - Replace results are unacknowledged only when the client uses `w: 0`
//!
//! # Connection
//!
//! The connection string is read from the `mongoConn` environment variable by
//! [`MongoDbConfig::from_env`], or passed directly to the builder.
//!
//! ```ignore
//! use dinestore::{backend::StoreBackendBuilder, mongodb::MongoDbConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MongoDbConfig::from_env()?.builder().build().await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as dinestore_mongodb;

pub mod config;
pub mod id;
pub mod query;
pub mod store;

pub use config::MongoDbConfig;
pub use store::{MongoDbStore, MongoDbStoreBuilder};
