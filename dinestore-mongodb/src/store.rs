use async_trait::async_trait;
use bson::Document;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    options::{Acknowledgment, ClientOptions},
};
use dinestore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, QueryVisitor},
    write::WriteResult,
};

use crate::{id::IdMapper, query::MongoQueryTranslator};

#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
    /// False when the client was configured with `w: 0`.
    acknowledged: bool,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        let acknowledged = !matches!(
            client.write_concern().and_then(|wc| wc.w.as_ref()),
            Some(Acknowledgment::Nodes(0))
        );

        Self { client, database, acknowledged }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    fn translate(filter: &Expr) -> DocumentStoreResult<Document> {
        MongoQueryTranslator.visit_expr(filter)
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn find_documents(&self, filter: &Expr, collection: &str) -> DocumentStoreResult<Option<Vec<Document>>> {
        Ok(Some(
            self.get_collection(collection)
                .find(Self::translate(filter)?)
                .await
                .map_err(|e| DocumentStoreError::Backend(e.to_string()))?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(|e| DocumentStoreError::Backend(e.to_string()))?
                .into_iter()
                .map(IdMapper::restore)
                .collect()
        ))
    }

    async fn find_first_document(&self, filter: &Expr, collection: &str) -> DocumentStoreResult<Option<Document>> {
        Ok(
            self.get_collection(collection)
                .find_one(Self::translate(filter)?)
                .await
                .map_err(|e| DocumentStoreError::Backend(e.to_string()))?
                .map(IdMapper::restore)
        )
    }

    async fn insert_documents(&self, documents: Vec<Document>, collection: &str) -> DocumentStoreResult<Vec<String>> {
        let (ids, prepared): (Vec<String>, Vec<Document>) = documents
            .into_iter()
            .map(IdMapper::prepare_insert)
            .unzip();

        self.get_collection(collection)
            .insert_many(prepared)
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?;

        Ok(ids)
    }

    async fn replace_document(&self, filter: &Expr, document: Document, collection: &str) -> DocumentStoreResult<WriteResult> {
        let result = self.get_collection(collection)
            .replace_one(
                Self::translate(filter)?,
                IdMapper::prepare_replacement(document),
            )
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?;

        Ok(WriteResult::new(self.acknowledged, result.modified_count))
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<String>> {
        self.client
            .database(&self.database)
            .list_collection_names()
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))
    }

    async fn shutdown(self) -> DocumentStoreResult<()> {
        self.shutdown().await
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        tracing::info!(database = %self.database, "Configuring MongoDB client");

        let client = Client::with_options(
            ClientOptions::parse(&self.dsn)
                .await
                .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?,
        )
        .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;

        tracing::info!(database = %self.database, "MongoDB client ready");

        Ok(MongoDbStore::new(client, self.database))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::options::WriteConcern;

    const DSN: &str = "mongodb://localhost:27017";

    // Building a client does not contact the server.
    async fn store_with(options: ClientOptions) -> MongoDbStore {
        MongoDbStore::new(Client::with_options(options).unwrap(), "recreation".into())
    }

    #[tokio::test]
    async fn unacknowledged_write_concern_is_reported() {
        let mut options = ClientOptions::parse(DSN).await.unwrap();
        options.write_concern = Some(WriteConcern::builder().w(Acknowledgment::Nodes(0)).build());

        assert!(!store_with(options).await.acknowledged);
    }

    #[tokio::test]
    async fn unacknowledged_write_concern_from_uri_is_reported() {
        let options = ClientOptions::parse(format!("{DSN}/?w=0")).await.unwrap();

        assert!(!store_with(options).await.acknowledged);
    }

    #[tokio::test]
    async fn default_write_concern_is_acknowledged() {
        let options = ClientOptions::parse(DSN).await.unwrap();

        assert!(store_with(options).await.acknowledged);
    }

    #[tokio::test]
    async fn majority_write_concern_is_acknowledged() {
        let mut options = ClientOptions::parse(DSN).await.unwrap();
        options.write_concern = Some(WriteConcern::builder().w(Acknowledgment::Majority).build());

        assert!(store_with(options).await.acknowledged);
    }
}
