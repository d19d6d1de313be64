//! Restaurant entity and search criteria.

use serde::{Deserialize, Serialize};

use dinestore_core::{
    document::{Document, ID_FIELD},
    query::{Expr, Filter},
};

/// Collection holding restaurant documents.
///
/// The misspelling matches the collection existing deployments already write to.
/// Use [`RestaurantRepo::with_collection`](crate::repository::RestaurantRepo::with_collection)
/// to point at a differently named collection.
pub const RESTAURANT_COLLECTION: &str = "restuarants";

/// Country used when an address does not specify one.
pub const DEFAULT_COUNTRY: &str = "United States";

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

/// Postal address of a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Location {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            street: String::new(),
            city: String::new(),
            state: String::new(),
            country: default_country(),
            zip_code: String::new(),
        }
    }
}

/// A restaurant record.
///
/// `Restaurant::default()` is the blank entity: its identifier is empty, which
/// is how "not found" and "not yet stored" are represented everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub cuisine_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub phone: String,
    pub address: Location,
}

impl Restaurant {
    pub fn new(name: impl Into<String>, cuisine_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cuisine_type: cuisine_type.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl Document for Restaurant {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        RESTAURANT_COLLECTION
    }
}

/// Stored field names used in filters.
pub mod fields {
    pub const NAME: &str = "Name";
    pub const CUISINE_TYPE: &str = "CuisineType";
}

/// Search input for [`RestaurantRepository::find`](crate::repository::RestaurantRepository::find).
///
/// `name` is a case-sensitive substring match; `cuisine` is an exact match.
/// Absent values are treated as empty strings, so an absent name matches every
/// restaurant while an absent cuisine only matches restaurants with a blank cuisine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub cuisine: Option<String>,
}

impl SearchCriteria {
    pub fn new(name: impl Into<String>, cuisine: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            cuisine: Some(cuisine.into()),
        }
    }

    /// Builds the store filter for these criteria.
    pub fn filter(&self) -> Expr {
        Filter::contains(fields::NAME, self.name.clone().unwrap_or_default())
            .and(Filter::eq(fields::CUISINE_TYPE, self.cuisine.clone().unwrap_or_default()))
    }
}

/// Filter selecting a single restaurant by identifier.
pub fn id_filter(id: &str) -> Expr {
    Filter::eq(ID_FIELD, id)
}
