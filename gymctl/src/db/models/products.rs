//! Database models for shop products.

use crate::api::models::products::{ProductCreate, ProductUpdate};
use crate::types::{GymId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone)]
pub struct ProductCreateDBRequest {
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub stock: Option<i32>,
}

impl From<&ProductCreate> for ProductCreateDBRequest {
    fn from(api: &ProductCreate) -> Self {
        Self {
            name: api.name.clone(),
            category: api.category.clone(),
            price: api.price,
            stock: api.stock,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductUpdateDBRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
}

impl From<ProductUpdate> for ProductUpdateDBRequest {
    fn from(api: ProductUpdate) -> Self {
        Self {
            name: api.name,
            category: api.category,
            price: api.price,
            stock: api.stock,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ProductDBResponse {
    pub id: ProductId,
    pub gym_id: GymId,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
