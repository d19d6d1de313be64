//! Request-facing restaurant operations.
//!
//! [`RestaurantOrchestration`] turns repository results into plain answers for
//! request handlers: lists, a single entity, or a success flag. "Not found" and
//! "nothing changed" are data here; only infrastructure failures are errors.

use dinestore_core::{document::Document, error::DocumentStoreResult};

use crate::{model::Restaurant, repository::RestaurantRepository};

#[derive(Debug)]
pub struct RestaurantOrchestration<R: RestaurantRepository> {
    repo: R,
}

impl<R: RestaurantRepository> RestaurantOrchestration<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub async fn get_all_restaurants(&self) -> DocumentStoreResult<Vec<Restaurant>> {
        tracing::info!("Getting all restaurants");

        let restaurants = self.repo.get_all().await?;
        tracing::info!(count = restaurants.len(), "Retrieved restaurants");

        Ok(restaurants)
    }

    pub async fn find_restaurants(&self, name: &str, cuisine: &str) -> DocumentStoreResult<Vec<Restaurant>> {
        tracing::info!(name, cuisine, "Searching restaurants");

        let restaurants = self.repo.find(name, cuisine).await?;
        tracing::info!(count = restaurants.len(), "Found restaurants");

        Ok(restaurants)
    }

    /// Returns the restaurant with `id`, or a blank one if it does not exist.
    pub async fn get_restaurant(&self, id: &str) -> DocumentStoreResult<Restaurant> {
        tracing::info!(id, "Getting restaurant");

        let restaurant = self.repo.get_by_id(id).await?;

        if !restaurant.is_persisted() {
            tracing::info!(id, "Restaurant not found");
            return Ok(Restaurant::default());
        }

        Ok(restaurant)
    }

    /// True when the store assigned the new restaurant an identifier.
    pub async fn insert_restaurant(&self, restaurant: Restaurant) -> DocumentStoreResult<bool> {
        tracing::info!("Inserting restaurant");

        let inserted = self.repo.insert(restaurant).await?;

        Ok(inserted.is_persisted())
    }

    /// True when the batch was non-empty and every member received an identifier.
    pub async fn insert_restaurants(&self, restaurants: Vec<Restaurant>) -> DocumentStoreResult<bool> {
        tracing::info!(count = restaurants.len(), "Inserting restaurants");

        let inserted = self.repo.insert_many(restaurants).await?;

        Ok(!inserted.is_empty() && inserted.iter().all(Restaurant::is_persisted))
    }

    /// True when the store acknowledged the write and changed a document.
    pub async fn update_restaurant(&self, restaurant: Restaurant) -> DocumentStoreResult<bool> {
        tracing::info!(id = %restaurant.id, "Updating restaurant");

        let result = self.repo.replace(restaurant).await?;
        tracing::info!(
            acknowledged = result.acknowledged,
            modified_count = result.modified_count,
            "Replace completed"
        );

        Ok(result.is_modified())
    }
}
