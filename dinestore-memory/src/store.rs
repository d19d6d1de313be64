//! In-memory storage implementation for document stores.
//!
//! Collections are vectors of BSON documents kept in insertion order, guarded by
//! an async-aware read-write lock.

use async_trait::async_trait;
use bson::{Bson, Document as BsonDocument, oid::ObjectId};
use mea::rwlock::RwLock;
use std::{collections::HashMap, sync::Arc};

use dinestore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::{ID_FIELD, is_persisted_id},
    error::{DocumentStoreError, DocumentStoreResult},
    query::Expr,
    write::WriteResult,
};

use crate::evaluator::DocumentEvaluator;

type StoreMap = HashMap<String, Vec<BsonDocument>>;

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, so
/// clones share the same data. Identifiers are assigned as ObjectId hex strings,
/// the same shape the MongoDB backend hands out.
///
/// Queries scan every document of a collection; there is no indexing.
///
/// # Example
///
/// ```ignore
/// use dinestore_memory::InMemoryStore;
/// use dinestore::{backend::StoreBackend, query::Filter};
/// use bson::doc;
///
/// let store = InMemoryStore::new();
/// let ids = store.insert_documents(vec![doc! { "Name": "Luigi's" }], "restuarants").await?;
/// let found = store.find_documents(&Filter::eq("_id", ids[0].clone()), "restuarants").await?;
/// assert_eq!(found.map(|docs| docs.len()), Some(1));
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }
}

/// Reads a document identifier as a string, whatever BSON type it was stored as.
fn document_id(document: &BsonDocument) -> Option<String> {
    match document.get(ID_FIELD)? {
        Bson::String(id) => Some(id.clone()),
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn find_documents(
        &self,
        filter: &Expr,
        collection: &str,
    ) -> DocumentStoreResult<Option<Vec<BsonDocument>>> {
        let store = self.store.read().await;
        let Some(documents) = store.get(collection) else {
            return Ok(None);
        };

        let mut matched = Vec::new();
        for document in documents {
            if DocumentEvaluator::matches(document, filter)? {
                matched.push(document.clone());
            }
        }

        Ok(Some(matched))
    }

    async fn find_first_document(
        &self,
        filter: &Expr,
        collection: &str,
    ) -> DocumentStoreResult<Option<BsonDocument>> {
        let store = self.store.read().await;
        let Some(documents) = store.get(collection) else {
            return Ok(None);
        };

        for document in documents {
            if DocumentEvaluator::matches(document, filter)? {
                return Ok(Some(document.clone()));
            }
        }

        Ok(None)
    }

    async fn insert_documents(
        &self,
        documents: Vec<BsonDocument>,
        collection: &str,
    ) -> DocumentStoreResult<Vec<String>> {
        let mut store = self.store.write().await;
        let stored = store.entry(collection.to_string()).or_default();
        let mut ids = Vec::with_capacity(documents.len());

        // Ordered insert: documents before a failure stay stored.
        for mut document in documents {
            let id = match document_id(&document) {
                Some(id) if is_persisted_id(&id) => id,
                _ => ObjectId::new().to_hex(),
            };

            if stored.iter().any(|existing| document_id(existing).as_deref() == Some(id.as_str())) {
                return Err(DocumentStoreError::DocumentAlreadyExists(id, collection.to_string()));
            }

            document.insert(ID_FIELD, id.clone());
            stored.push(document);
            ids.push(id);
        }

        tracing::debug!(collection, count = ids.len(), "Stored documents in memory");

        Ok(ids)
    }

    async fn replace_document(
        &self,
        filter: &Expr,
        mut document: BsonDocument,
        collection: &str,
    ) -> DocumentStoreResult<WriteResult> {
        let mut store = self.store.write().await;
        let Some(stored) = store.get_mut(collection) else {
            return Ok(WriteResult::new(true, 0));
        };

        let mut position = None;
        for (index, existing) in stored.iter().enumerate() {
            if DocumentEvaluator::matches(existing, filter)? {
                position = Some(index);
                break;
            }
        }
        let Some(index) = position else {
            return Ok(WriteResult::new(true, 0));
        };

        let existing_id = document_id(&stored[index]).unwrap_or_default();
        match document_id(&document) {
            Some(id) if is_persisted_id(&id) && id != existing_id => {
                return Err(DocumentStoreError::InvalidDocument(format!(
                    "cannot change {ID_FIELD} from {existing_id} to {id}"
                )));
            }
            _ => {
                document.insert(ID_FIELD, existing_id);
            }
        }

        if stored[index] == document {
            return Ok(WriteResult::new(true, 0));
        }

        stored[index] = document;

        Ok(WriteResult::new(true, 1))
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        Ok(self.store.read().await.keys().cloned().collect())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance. Always succeeds.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use dinestore_core::query::Filter;

    const COLLECTION: &str = "restaurants";

    async fn seeded() -> (InMemoryStore, Vec<String>) {
        let store = InMemoryStore::new();
        let ids = store
            .insert_documents(
                vec![
                    doc! { "Name": "Luigi's", "CuisineType": "Italian" },
                    doc! { "Name": "Bangkok Garden", "CuisineType": "Thai" },
                    doc! { "Name": "Luigi's Express", "CuisineType": "Italian" },
                ],
                COLLECTION,
            )
            .await
            .unwrap();

        (store, ids)
    }

    #[tokio::test]
    async fn unknown_collection_reports_no_result_set() {
        let store = InMemoryStore::new();

        assert_eq!(store.find_documents(&Filter::all(), COLLECTION).await.unwrap(), None);
        assert_eq!(store.find_first_document(&Filter::all(), COLLECTION).await.unwrap(), None);
    }

    #[tokio::test]
    async fn insert_assigns_object_id_strings() {
        let (_, ids) = seeded().await;

        assert_eq!(ids.len(), 3);
        for id in &ids {
            assert!(ObjectId::parse_str(id).is_ok(), "{id} is not an ObjectId");
        }
    }

    #[tokio::test]
    async fn insert_keeps_caller_supplied_id() {
        let store = InMemoryStore::new();

        let ids = store
            .insert_documents(vec![doc! { "_id": "123456", "Name": "Test" }], COLLECTION)
            .await
            .unwrap();

        assert_eq!(ids, vec!["123456".to_string()]);
    }

    #[tokio::test]
    async fn blank_id_is_replaced() {
        let store = InMemoryStore::new();

        let ids = store
            .insert_documents(vec![doc! { "_id": "  ", "Name": "Test" }], COLLECTION)
            .await
            .unwrap();

        assert!(is_persisted_id(&ids[0]));
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected_after_earlier_inserts() {
        let store = InMemoryStore::new();

        let result = store
            .insert_documents(
                vec![
                    doc! { "_id": "a", "Name": "First" },
                    doc! { "_id": "a", "Name": "Second" },
                ],
                COLLECTION,
            )
            .await;

        assert!(matches!(result, Err(DocumentStoreError::DocumentAlreadyExists(id, _)) if id == "a"));
        let remaining = store.find_documents(&Filter::all(), COLLECTION).await.unwrap().unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn find_preserves_insertion_order() {
        let (store, _) = seeded().await;

        let found = store
            .find_documents(&Filter::eq("CuisineType", "Italian"), COLLECTION)
            .await
            .unwrap()
            .unwrap();

        let names: Vec<_> = found.iter().map(|d| d.get_str("Name").unwrap()).collect();
        assert_eq!(names, vec!["Luigi's", "Luigi's Express"]);
    }

    #[tokio::test]
    async fn find_first_returns_earliest_match() {
        let (store, ids) = seeded().await;

        let found = store
            .find_first_document(&Filter::contains("Name", "Luigi"), COLLECTION)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.get_str(ID_FIELD).unwrap(), ids[0]);
    }

    #[tokio::test]
    async fn replace_reports_modification() {
        let (store, ids) = seeded().await;
        let filter = Filter::eq(ID_FIELD, ids[1].clone());

        let result = store
            .replace_document(&filter, doc! { "Name": "Bangkok Garden", "CuisineType": "Thai Fusion" }, COLLECTION)
            .await
            .unwrap();

        assert_eq!(result, WriteResult::new(true, 1));
        let stored = store.find_first_document(&filter, COLLECTION).await.unwrap().unwrap();
        assert_eq!(stored.get_str("CuisineType").unwrap(), "Thai Fusion");
        assert_eq!(stored.get_str(ID_FIELD).unwrap(), ids[1]);
    }

    #[tokio::test]
    async fn identical_replacement_modifies_nothing() {
        let (store, ids) = seeded().await;

        let result = store
            .replace_document(
                &Filter::eq(ID_FIELD, ids[1].clone()),
                doc! { "_id": ids[1].clone(), "Name": "Bangkok Garden", "CuisineType": "Thai" },
                COLLECTION,
            )
            .await
            .unwrap();

        assert_eq!(result, WriteResult::new(true, 0));
    }

    #[tokio::test]
    async fn replace_without_match_modifies_nothing() {
        let (store, _) = seeded().await;

        let result = store
            .replace_document(&Filter::eq(ID_FIELD, "missing"), doc! { "Name": "Ghost" }, COLLECTION)
            .await
            .unwrap();

        assert_eq!(result, WriteResult::new(true, 0));
    }

    #[tokio::test]
    async fn replace_cannot_change_identifier() {
        let (store, ids) = seeded().await;

        let result = store
            .replace_document(
                &Filter::eq(ID_FIELD, ids[0].clone()),
                doc! { "_id": "other", "Name": "Renamed" },
                COLLECTION,
            )
            .await;

        assert!(matches!(result, Err(DocumentStoreError::InvalidDocument(_))));
    }

    #[tokio::test]
    async fn clones_share_data() {
        let (store, _) = seeded().await;
        let other = store.clone();

        assert_eq!(other.list_collections().await.unwrap(), vec![COLLECTION.to_string()]);
    }
}
