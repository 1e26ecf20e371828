use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{EntityRepository, TaxSummarySource};
use crate::errors::ServiceError;
use crate::models::{
    address, currency, supply_order, supply_order_detail, warehouse, Address, Currency,
    SupplyOrder, SupplyOrderDetail, Warehouse,
};
use crate::queries::{Query, TaxOrderSummaryQuery, TaxOrderSummaryRow};

/// sea-orm backed lookups for supply order documents.
#[derive(Debug, Clone)]
pub struct SupplyOrderRepository {
    db: Arc<DatabaseConnection>,
}

impl SupplyOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl EntityRepository for SupplyOrderRepository {
    #[instrument(skip(self))]
    async fn find_supply_order(&self, id_supply_order: i64) -> Result<SupplyOrder, ServiceError> {
        supply_order::Entity::find_by_id(id_supply_order)
            .one(self.get_db())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Supply order", id_supply_order))
    }

    #[instrument(skip(self))]
    async fn find_warehouse(&self, id_warehouse: i64) -> Result<Warehouse, ServiceError> {
        warehouse::Entity::find_by_id(id_warehouse)
            .one(self.get_db())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Warehouse", id_warehouse))
    }

    #[instrument(skip(self))]
    async fn find_address(&self, id_address: i64) -> Result<Address, ServiceError> {
        address::Entity::find_by_id(id_address)
            .one(self.get_db())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Address", id_address))
    }

    #[instrument(skip(self))]
    async fn find_currency(&self, id_currency: i64) -> Result<Currency, ServiceError> {
        currency::Entity::find_by_id(id_currency)
            .one(self.get_db())
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| ServiceError::not_found("Currency", id_currency))
    }

    #[instrument(skip(self))]
    async fn find_address_id_by_supplier(&self, id_supplier: i64) -> Result<i64, ServiceError> {
        let found = address::Entity::find()
            .filter(address::Column::IdSupplier.eq(id_supplier))
            .filter(address::Column::Deleted.eq(false))
            .order_by_asc(address::Column::IdAddress)
            .one(self.get_db())
            .await
            .map_err(ServiceError::db_error)?;

        found
            .map(|address| address.id_address)
            .ok_or_else(|| ServiceError::not_found("Supplier address", id_supplier))
    }

    #[instrument(skip(self))]
    async fn find_supply_order_details(
        &self,
        id_supply_order: i64,
        _id_lang: i64,
    ) -> Result<Vec<SupplyOrderDetail>, ServiceError> {
        let details = supply_order_detail::Entity::find()
            .filter(supply_order_detail::Column::IdSupplyOrder.eq(id_supply_order))
            .order_by_asc(supply_order_detail::Column::IdSupplyOrderDetail)
            .all(self.get_db())
            .await
            .map_err(ServiceError::db_error)?;

        debug!(count = details.len(), "loaded supply order details");
        Ok(details)
    }
}

#[async_trait]
impl TaxSummarySource for SupplyOrderRepository {
    async fn tax_order_summary(
        &self,
        id_supply_order: i64,
    ) -> Result<Vec<TaxOrderSummaryRow>, ServiceError> {
        TaxOrderSummaryQuery { id_supply_order }
            .execute(self.get_db())
            .await
    }
}
