//! API request/response models for shop products.

use crate::db::models::products::ProductDBResponse;
use crate::types::{GymId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductCreate {
    pub name: String,
    pub category: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub stock: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ProductId,
    #[schema(value_type = String, format = "uuid")]
    pub gym_id: GymId,
    pub name: String,
    pub category: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductDBResponse> for ProductResponse {
    fn from(db: ProductDBResponse) -> Self {
        Self {
            id: db.id,
            gym_id: db.gym_id,
            name: db.name,
            category: db.category,
            price: db.price,
            stock: db.stock,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
