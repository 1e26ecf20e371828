use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

pub mod tax_summary_queries;

pub use tax_summary_queries::{TaxOrderSummaryQuery, TaxOrderSummaryRow};

/// Trait representing a generic asynchronous query.
#[async_trait]
pub trait Query: Send + Sync {
    type Result: Send + Sync;

    /// Executes the query using the provided database pool.
    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError>;
}
