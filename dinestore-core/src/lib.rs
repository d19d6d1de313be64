//! Typed document-store access layer.
//!
//! This crate is the core of the dinestore project and provides:
//!
//! - **Document traits** ([`document`]) - Identifier handling and BSON conversion
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Filter expressions** ([`query`]) - Backend-agnostic filters and a visitor to execute them
//! - **Document store** ([`store`]) - Generic find/insert/replace client over any document type
//! - **Write results** ([`write`]) - Acknowledgment and modified-count reporting
//! - **Health** ([`health`]) - Connection reports and health classification
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use dinestore::{document::Document, store::DocumentStore, query::Filter};
//!
//! let store = DocumentStore::new(backend);
//! let menu = store.insert_one("menus", Menu::default()).await?;
//! assert!(menu.is_persisted());
//! ```

#[allow(unused_extern_crates)]
extern crate self as dinestore_core;

pub mod backend;
pub mod document;
pub mod error;
pub mod health;
pub mod query;
pub mod store;
pub mod write;
