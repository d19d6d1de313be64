//! Restaurant repository.
//!
//! [`RestaurantRepo`] binds the generic [`DocumentStore`] to the restaurant
//! schema: it owns the collection name and builds every filter. It only
//! borrows the store, so one is created per request.

use async_trait::async_trait;

use dinestore_core::{
    backend::StoreBackend,
    document::Document,
    error::DocumentStoreResult,
    query::Filter,
    store::DocumentStore,
    write::WriteResult,
};

use crate::model::{Restaurant, SearchCriteria, id_filter};

/// Data access operations for restaurants.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Every stored restaurant.
    async fn get_all(&self) -> DocumentStoreResult<Vec<Restaurant>>;

    /// Restaurants whose name contains `name` and whose cuisine equals `cuisine`.
    ///
    /// An empty `cuisine` is matched literally, so it only finds restaurants
    /// with a blank cuisine.
    async fn find(&self, name: &str, cuisine: &str) -> DocumentStoreResult<Vec<Restaurant>>;

    /// The restaurant with identifier `id`, or a blank restaurant if none exists.
    async fn get_by_id(&self, id: &str) -> DocumentStoreResult<Restaurant>;

    /// Stores a new restaurant and returns it with its assigned identifier.
    async fn insert(&self, restaurant: Restaurant) -> DocumentStoreResult<Restaurant>;

    /// Stores new restaurants and returns them with their assigned identifiers.
    async fn insert_many(&self, restaurants: Vec<Restaurant>) -> DocumentStoreResult<Vec<Restaurant>>;

    /// Replaces the stored restaurant sharing `restaurant`'s identifier.
    async fn replace(&self, restaurant: Restaurant) -> DocumentStoreResult<WriteResult>;
}

/// [`RestaurantRepository`] backed by a [`DocumentStore`].
#[derive(Debug)]
pub struct RestaurantRepo<'a, B: StoreBackend> {
    store: &'a DocumentStore<B>,
    collection: &'a str,
}

impl<'a, B: StoreBackend> RestaurantRepo<'a, B> {
    /// Repository over the default [`Restaurant::collection_name`] collection.
    pub fn new(store: &'a DocumentStore<B>) -> Self {
        Self {
            store,
            collection: Restaurant::collection_name(),
        }
    }

    /// Reads and writes `collection` instead of the default one.
    pub fn with_collection(mut self, collection: &'a str) -> Self {
        self.collection = collection;
        self
    }

    pub fn collection(&self) -> &str {
        self.collection
    }

    /// Restaurants matching `criteria`.
    pub async fn find_by_criteria(&self, criteria: &SearchCriteria) -> DocumentStoreResult<Vec<Restaurant>> {
        self.store
            .find_many(self.collection, &criteria.filter())
            .await
    }
}

#[async_trait]
impl<'a, B: StoreBackend> RestaurantRepository for RestaurantRepo<'a, B> {
    async fn get_all(&self) -> DocumentStoreResult<Vec<Restaurant>> {
        tracing::info!("Finding all restaurants");

        self.store
            .find_many(self.collection, &Filter::all())
            .await
    }

    async fn find(&self, name: &str, cuisine: &str) -> DocumentStoreResult<Vec<Restaurant>> {
        tracing::info!(name, cuisine, "Finding restaurants by name and cuisine type");

        self.find_by_criteria(&SearchCriteria::new(name, cuisine)).await
    }

    async fn get_by_id(&self, id: &str) -> DocumentStoreResult<Restaurant> {
        tracing::info!(id, "Finding restaurant by id");

        Ok(self
            .store
            .find_one(self.collection, &id_filter(id))
            .await?
            .unwrap_or_default())
    }

    async fn insert(&self, restaurant: Restaurant) -> DocumentStoreResult<Restaurant> {
        tracing::info!("Inserting restaurant");

        self.store
            .insert_one(self.collection, restaurant)
            .await
    }

    async fn insert_many(&self, restaurants: Vec<Restaurant>) -> DocumentStoreResult<Vec<Restaurant>> {
        tracing::info!(count = restaurants.len(), "Inserting restaurants");

        self.store
            .insert_many(self.collection, restaurants)
            .await
    }

    async fn replace(&self, restaurant: Restaurant) -> DocumentStoreResult<WriteResult> {
        tracing::info!(id = %restaurant.id, "Replacing restaurant");

        let filter = id_filter(&restaurant.id);
        self.store
            .replace_one(self.collection, &filter, restaurant)
            .await
    }
}
