use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order issued to a supplier to replenish a warehouse.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supply_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_supply_order: i64,
    pub id_supplier: i64,
    pub supplier_name: String,
    pub id_lang: i64,
    pub id_warehouse: i64,
    pub id_supply_order_state: i64,
    pub id_currency: i64,
    pub id_ref_currency: i64,
    pub reference: String,
    pub date_add: NaiveDateTime,
    pub date_upd: NaiveDateTime,
    pub date_delivery_expected: Option<NaiveDateTime>,
    pub total_te: Decimal,
    pub total_with_discount_te: Decimal,
    pub total_tax: Decimal,
    pub total_ti: Decimal,
    pub discount_rate: Decimal,
    pub discount_value_te: Decimal,
    pub is_template: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::IdWarehouse",
        to = "super::warehouse::Column::IdWarehouse"
    )]
    Warehouse,
    #[sea_orm(has_many = "super::supply_order_detail::Entity")]
    SupplyOrderDetail,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::supply_order_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplyOrderDetail.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
