use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::models::{Address, Currency, SupplyOrder, SupplyOrderDetail, Warehouse};
use crate::queries::TaxOrderSummaryRow;

pub mod supply_order_repository;

pub use supply_order_repository::SupplyOrderRepository;

/// Lookups of the records a supply order form refers to.
///
/// Every `find_*` method fails with [`ServiceError::NotFound`] when the key
/// resolves to no record.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    async fn find_supply_order(&self, id_supply_order: i64) -> Result<SupplyOrder, ServiceError>;

    async fn find_warehouse(&self, id_warehouse: i64) -> Result<Warehouse, ServiceError>;

    async fn find_address(&self, id_address: i64) -> Result<Address, ServiceError>;

    async fn find_currency(&self, id_currency: i64) -> Result<Currency, ServiceError>;

    /// Address id registered for a supplier.
    async fn find_address_id_by_supplier(&self, id_supplier: i64) -> Result<i64, ServiceError>;

    /// Line items of an order in insertion order, possibly empty.
    ///
    /// Product names are stored on each line, so `id_lang` selects nothing
    /// and implementations may ignore it.
    async fn find_supply_order_details(
        &self,
        id_supply_order: i64,
        id_lang: i64,
    ) -> Result<Vec<SupplyOrderDetail>, ServiceError>;
}

/// Source of the per-tax-rate aggregate of an order's lines.
#[async_trait]
pub trait TaxSummarySource: Send + Sync {
    /// Unrounded rows, one per distinct tax rate.
    async fn tax_order_summary(
        &self,
        id_supply_order: i64,
    ) -> Result<Vec<TaxOrderSummaryRow>, ServiceError>;
}
