use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QuerySelect,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::Query;
use crate::errors::ServiceError;
use crate::models::supply_order_detail::{Column, Entity as SupplyOrderDetailEntity};

/// Totals of one tax rate across a supply order's lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult)]
pub struct TaxOrderSummaryRow {
    /// Sum of the lines' pre-tax price after the order discount
    pub base_te: Decimal,
    pub tax_rate: Decimal,
    /// Sum of the lines' tax after the order discount
    pub total_tax_value: Decimal,
}

/// Aggregates a supply order's lines by tax rate.
///
/// Rows come back in the store's grouping order and are not rounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxOrderSummaryQuery {
    pub id_supply_order: i64,
}

#[async_trait]
impl Query for TaxOrderSummaryQuery {
    type Result = Vec<TaxOrderSummaryRow>;

    #[instrument(skip(db_pool))]
    async fn execute(&self, db_pool: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let rows = SupplyOrderDetailEntity::find()
            .select_only()
            .column_as(Expr::col(Column::PriceWithOrderDiscountTe).sum(), "base_te")
            .column(Column::TaxRate)
            .column_as(
                Expr::col(Column::TaxValueWithOrderDiscount).sum(),
                "total_tax_value",
            )
            .filter(Column::IdSupplyOrder.eq(self.id_supply_order))
            .group_by(Column::TaxRate)
            .into_model::<TaxOrderSummaryRow>()
            .all(db_pool)
            .await
            .map_err(ServiceError::db_error)?;

        debug!(rates = rows.len(), "tax order summary computed");
        Ok(rows)
    }
}
