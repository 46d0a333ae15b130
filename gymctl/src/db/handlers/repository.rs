//! Base repository traits for database operations.
//!
//! A repository is a data access layer for a Postgres table. Each repository
//! wraps a `&mut PgConnection` and provides strongly-typed CRUD methods.

use crate::db::errors::Result;
use crate::types::GymId;

/// Pagination filter shared by list operations.
#[derive(Debug, Clone, Copy)]
pub struct ListFilter {
    pub skip: i64,
    pub limit: i64,
}

impl ListFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

/// Repository trait for platform-level tables (no tenant column).
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// Create a new entity
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List entities with pagination
    async fn list(&mut self, filter: &ListFilter) -> Result<Vec<Self::Response>>;

    /// Total number of entities
    async fn count(&mut self) -> Result<i64>;

    /// Update an entity by ID
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;

    /// Delete an entity by ID, returning whether a row was removed
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;
}

/// Repository trait for gym-scoped tables.
///
/// Every method takes the resolved gym id; implementations filter each query
/// on it so cross-tenant rows behave exactly like absent rows.
#[async_trait::async_trait]
pub trait TenantRepository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// Create a new entity owned by the given gym
    async fn create(&mut self, gym_id: GymId, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Get an entity by ID within the given gym
    async fn get_by_id(&mut self, gym_id: GymId, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List the gym's entities with pagination
    async fn list(&mut self, gym_id: GymId, filter: &ListFilter) -> Result<Vec<Self::Response>>;

    /// Total number of the gym's entities
    async fn count(&mut self, gym_id: GymId) -> Result<i64>;

    /// Update an entity by ID within the given gym
    async fn update(&mut self, gym_id: GymId, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;

    /// Delete an entity by ID within the given gym, returning whether a row was removed
    async fn delete(&mut self, gym_id: GymId, id: Self::Id) -> Result<bool>;
}
