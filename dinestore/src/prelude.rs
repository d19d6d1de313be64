//! Convenient re-exports of commonly used types from dinestore.
//!
//! ```ignore
//! use dinestore::prelude::*;
//! ```

pub use dinestore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::{Document, DocumentExt},
    error::{DocumentStoreError, DocumentStoreResult},
    health::{ConnectionReport, HealthStatus},
    query::{Expr, FieldOp, Filter, QueryVisitor},
    store::DocumentStore,
    write::WriteResult,
};

pub use crate::{
    model::{Location, Restaurant, SearchCriteria},
    orchestration::RestaurantOrchestration,
    repository::{RestaurantRepo, RestaurantRepository},
};
