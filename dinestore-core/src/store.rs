//! Generic document store client.
//!
//! [`DocumentStore`] owns a backend (and through it the live connection) and
//! exposes find/insert/replace primitives for any [`Document`] type. The caller
//! picks the collection and the document type at each call site:
//!
//! ```ignore
//! use dinestore::{store::DocumentStore, query::Filter};
//!
//! let store = DocumentStore::new(backend);
//! let italian = store
//!     .find_many::<Restaurant>("restaurants", &Filter::eq("CuisineType", "Italian"))
//!     .await?;
//! ```
//!
//! This is the one place where absent result sets become empty vectors; layers
//! above never see an absent collection.

use std::time::Instant;

use crate::{
    backend::StoreBackend,
    document::{Document, DocumentExt},
    error::{DocumentStoreError, DocumentStoreResult},
    health::{CONNECTION_ERROR_CODE, ConnectionReport},
    query::Expr,
    write::WriteResult,
};

/// A document store bound to a specific backend implementation.
///
/// One instance is meant to live for the whole process and be shared (for
/// example behind an `Arc`) by every request.
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Finds every document in `collection` matching `filter`.
    ///
    /// Always returns a vector; an absent result set is reported as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or a stored document cannot be
    /// deserialized as `D`.
    pub async fn find_many<D: Document>(
        &self,
        collection: &str,
        filter: &Expr,
    ) -> DocumentStoreResult<Vec<D>> {
        tracing::info!(collection, "Finding documents by filter");

        self.backend
            .find_documents(filter, collection)
            .await?
            .unwrap_or_default()
            .into_iter()
            .map(D::from_bson_document)
            .collect()
    }

    /// Finds the first document in `collection` matching `filter`.
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub async fn find_one<D: Document>(
        &self,
        collection: &str,
        filter: &Expr,
    ) -> DocumentStoreResult<Option<D>> {
        tracing::info!(collection, "Finding one document by filter");

        self.backend
            .find_first_document(filter, collection)
            .await?
            .map(D::from_bson_document)
            .transpose()
    }

    /// Inserts a document and returns it carrying its store-assigned identifier.
    pub async fn insert_one<D: Document>(
        &self,
        collection: &str,
        document: D,
    ) -> DocumentStoreResult<D> {
        let mut inserted = self.insert_many(collection, vec![document]).await?;

        inserted
            .pop()
            .ok_or_else(|| DocumentStoreError::Backend("insert returned no document".into()))
    }

    /// Inserts documents and returns them, in input order, carrying their
    /// store-assigned identifiers.
    ///
    /// Backend failures propagate as-is; nothing is retried.
    pub async fn insert_many<D: Document>(
        &self,
        collection: &str,
        documents: Vec<D>,
    ) -> DocumentStoreResult<Vec<D>> {
        tracing::info!(collection, count = documents.len(), "Inserting new documents");

        if documents.is_empty() {
            return Ok(documents);
        }

        let ids = self
            .backend
            .insert_documents(
                documents
                    .iter()
                    .map(|document| document.to_bson_document())
                    .collect::<DocumentStoreResult<Vec<_>>>()?,
                collection,
            )
            .await?;

        if ids.len() != documents.len() {
            return Err(DocumentStoreError::Backend(format!(
                "inserted {} documents but received {} identifiers",
                documents.len(),
                ids.len()
            )));
        }

        Ok(documents
            .into_iter()
            .zip(ids)
            .map(|(mut document, id)| {
                document.set_id(id);
                document
            })
            .collect())
    }

    /// Replaces the first document in `collection` matching `filter`.
    ///
    /// Returns the acknowledgment whether zero or one documents changed.
    pub async fn replace_one<D: Document>(
        &self,
        collection: &str,
        filter: &Expr,
        document: D,
    ) -> DocumentStoreResult<WriteResult> {
        tracing::info!(collection, "Starting replace operation");

        let result = self
            .backend
            .replace_document(filter, document.to_bson_document()?, collection)
            .await?;

        tracing::info!(
            collection,
            acknowledged = result.acknowledged,
            modified_count = result.modified_count,
            "Replace operation completed"
        );

        Ok(result)
    }

    /// Performs a lightweight round trip and reports whether it succeeded.
    ///
    /// This never fails: a backend error is logged and reported as a
    /// disconnected [`ConnectionReport`] with error code 99.
    pub async fn connection_check(&self) -> ConnectionReport {
        let started = Instant::now();

        match self.backend.list_collections().await {
            Ok(_) => ConnectionReport::connected(started.elapsed()),
            Err(err) => {
                tracing::error!(
                    code = CONNECTION_ERROR_CODE,
                    error = %err,
                    "Unable to establish database connection"
                );
                ConnectionReport::failed()
            }
        }
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await
    }
}
