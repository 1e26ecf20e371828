use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One product line of a supply order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supply_order_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_supply_order_detail: i64,
    pub id_supply_order: i64,
    pub id_currency: i64,
    pub id_product: i64,
    pub id_product_attribute: i64,
    pub reference: String,
    pub supplier_reference: String,
    pub name: String,
    pub ean13: Option<String>,
    pub upc: Option<String>,
    pub exchange_rate: Decimal,
    pub unit_price_te: Decimal,
    pub quantity_expected: i32,
    pub quantity_received: i32,
    pub price_te: Decimal,
    pub discount_rate: Decimal,
    pub discount_value_te: Decimal,
    pub price_with_discount_te: Decimal,
    pub tax_rate: Decimal,
    pub tax_value: Decimal,
    pub price_ti: Decimal,
    pub tax_value_with_order_discount: Decimal,
    pub price_with_order_discount_te: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::supply_order::Entity",
        from = "Column::IdSupplyOrder",
        to = "super::supply_order::Column::IdSupplyOrder",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    SupplyOrder,
}

impl Related<super::supply_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplyOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
