//! Storage backend abstraction for the document store.
//!
//! A [`StoreBackend`] works on raw BSON documents and knows nothing about document
//! types. Typed access lives one level up, in [`DocumentStore`](crate::store::DocumentStore).
//!
//! # Examples
//!
//! ```ignore
//! use dinestore::{backend::StoreBackend, query::Filter};
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//! let ids = backend.insert_documents(vec![doc! { "Name": "Luigi's" }], "restuarants").await?;
//! let found = backend.find_documents(&Filter::all(), "restuarants").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::Document as BsonDocument;
use std::fmt::Debug;

use crate::{error::DocumentStoreResult, query::Expr, write::WriteResult};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// A single backend instance is shared by every concurrent request, so
/// implementations must support simultaneous reads and writes. The exact
/// concurrency model is implementation-specific.
///
/// # Identifiers
///
/// Documents carry their identifier under [`ID_FIELD`](crate::document::ID_FIELD)
/// as a string. A blank identifier on insert asks the backend to assign one.
///
/// # Error Handling
///
/// Any `Err` is an infrastructure failure. Missing documents are reported as
/// `None` or empty results, never as errors.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Returns every document in `collection` matching `filter`, in store order.
    ///
    /// `None` means the backend had no result set to report (for example the
    /// collection does not exist). Callers treat it as empty.
    async fn find_documents(
        &self,
        filter: &Expr,
        collection: &str,
    ) -> DocumentStoreResult<Option<Vec<BsonDocument>>>;

    /// Returns the first document in `collection` matching `filter`, if any.
    async fn find_first_document(
        &self,
        filter: &Expr,
        collection: &str,
    ) -> DocumentStoreResult<Option<BsonDocument>>;

    /// Inserts documents into `collection`, creating it if needed.
    ///
    /// Returns the identifier of each inserted document, in input order. Blank
    /// identifiers are replaced by backend-assigned ones. Partial failure
    /// semantics are backend-specific; documents inserted before a failure may
    /// remain stored.
    async fn insert_documents(
        &self,
        documents: Vec<BsonDocument>,
        collection: &str,
    ) -> DocumentStoreResult<Vec<String>>;

    /// Replaces the first document in `collection` matching `filter`.
    ///
    /// The stored identifier is kept. Returns how the store acknowledged the
    /// write; a missing match is reported as zero modified documents.
    async fn replace_document(
        &self,
        filter: &Expr,
        document: BsonDocument,
        collection: &str,
    ) -> DocumentStoreResult<WriteResult>;

    /// Lists the names of all collections in the store.
    ///
    /// Cheap enough to serve as a connectivity probe.
    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op; backends holding external
    /// connections should override this.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
