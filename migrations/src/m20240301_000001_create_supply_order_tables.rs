use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Currency::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Currency::IdCurrency)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Currency::Name).string_len(32).not_null())
                    .col(ColumnDef::new(Currency::IsoCode).string_len(3).not_null())
                    .col(ColumnDef::new(Currency::Sign).string_len(8).not_null())
                    .col(ColumnDef::new(Currency::Blank).boolean().not_null().default(false))
                    .col(ColumnDef::new(Currency::Format).small_integer().not_null().default(1))
                    .col(ColumnDef::new(Currency::Decimals).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Currency::ConversionRate)
                            .decimal_len(13, 6)
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Currency::Deleted).boolean().not_null().default(false))
                    .col(ColumnDef::new(Currency::Active).boolean().not_null().default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Address::IdAddress)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Address::IdSupplier).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Address::IdWarehouse).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Address::Alias).string_len(32).not_null())
                    .col(ColumnDef::new(Address::Company).string_len(255).null())
                    .col(ColumnDef::new(Address::Lastname).string_len(255).not_null())
                    .col(ColumnDef::new(Address::Firstname).string_len(255).not_null())
                    .col(ColumnDef::new(Address::Address1).string_len(128).not_null())
                    .col(ColumnDef::new(Address::Address2).string_len(128).null())
                    .col(ColumnDef::new(Address::Postcode).string_len(12).null())
                    .col(ColumnDef::new(Address::City).string_len(64).not_null())
                    .col(ColumnDef::new(Address::State).string_len(64).null())
                    .col(ColumnDef::new(Address::Country).string_len(64).not_null())
                    .col(ColumnDef::new(Address::Phone).string_len(32).null())
                    .col(ColumnDef::new(Address::PhoneMobile).string_len(32).null())
                    .col(ColumnDef::new(Address::VatNumber).string_len(32).null())
                    .col(ColumnDef::new(Address::Deleted).boolean().not_null().default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_address_id_supplier")
                    .table(Address::Table)
                    .col(Address::IdSupplier)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Warehouse::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Warehouse::IdWarehouse)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Warehouse::IdCurrency).big_integer().not_null())
                    .col(ColumnDef::new(Warehouse::IdAddress).big_integer().not_null())
                    .col(ColumnDef::new(Warehouse::IdEmployee).big_integer().not_null())
                    .col(ColumnDef::new(Warehouse::Reference).string_len(32).null())
                    .col(ColumnDef::new(Warehouse::Name).string_len(45).not_null())
                    .col(
                        ColumnDef::new(Warehouse::ManagementType)
                            .string_len(32)
                            .not_null()
                            .default("WA"),
                    )
                    .col(ColumnDef::new(Warehouse::Deleted).boolean().not_null().default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SupplyOrder::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupplyOrder::IdSupplyOrder)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SupplyOrder::IdSupplier).big_integer().not_null())
                    .col(ColumnDef::new(SupplyOrder::SupplierName).string_len(64).not_null())
                    .col(ColumnDef::new(SupplyOrder::IdLang).big_integer().not_null())
                    .col(ColumnDef::new(SupplyOrder::IdWarehouse).big_integer().not_null())
                    .col(
                        ColumnDef::new(SupplyOrder::IdSupplyOrderState)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupplyOrder::IdCurrency).big_integer().not_null())
                    .col(ColumnDef::new(SupplyOrder::IdRefCurrency).big_integer().not_null())
                    .col(ColumnDef::new(SupplyOrder::Reference).string_len(64).not_null())
                    .col(ColumnDef::new(SupplyOrder::DateAdd).timestamp().not_null())
                    .col(ColumnDef::new(SupplyOrder::DateUpd).timestamp().not_null())
                    .col(
                        ColumnDef::new(SupplyOrder::DateDeliveryExpected)
                            .timestamp()
                            .null(),
                    )
                    .col(money(SupplyOrder::TotalTe))
                    .col(money(SupplyOrder::TotalWithDiscountTe))
                    .col(money(SupplyOrder::TotalTax))
                    .col(money(SupplyOrder::TotalTi))
                    .col(money(SupplyOrder::DiscountRate))
                    .col(money(SupplyOrder::DiscountValueTe))
                    .col(
                        ColumnDef::new(SupplyOrder::IsTemplate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supply_order_warehouse")
                            .from(SupplyOrder::Table, SupplyOrder::IdWarehouse)
                            .to(Warehouse::Table, Warehouse::IdWarehouse)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SupplyOrderDetail::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupplyOrderDetail::IdSupplyOrderDetail)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SupplyOrderDetail::IdSupplyOrder)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupplyOrderDetail::IdCurrency).big_integer().not_null())
                    .col(ColumnDef::new(SupplyOrderDetail::IdProduct).big_integer().not_null())
                    .col(
                        ColumnDef::new(SupplyOrderDetail::IdProductAttribute)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SupplyOrderDetail::Reference).string_len(64).not_null())
                    .col(
                        ColumnDef::new(SupplyOrderDetail::SupplierReference)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SupplyOrderDetail::Name).string_len(128).not_null())
                    .col(ColumnDef::new(SupplyOrderDetail::Ean13).string_len(13).null())
                    .col(ColumnDef::new(SupplyOrderDetail::Upc).string_len(12).null())
                    .col(
                        ColumnDef::new(SupplyOrderDetail::ExchangeRate)
                            .decimal_len(16, 6)
                            .not_null()
                            .default(1),
                    )
                    .col(money(SupplyOrderDetail::UnitPriceTe))
                    .col(
                        ColumnDef::new(SupplyOrderDetail::QuantityExpected)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplyOrderDetail::QuantityReceived)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(money(SupplyOrderDetail::PriceTe))
                    .col(money(SupplyOrderDetail::DiscountRate))
                    .col(money(SupplyOrderDetail::DiscountValueTe))
                    .col(money(SupplyOrderDetail::PriceWithDiscountTe))
                    .col(money(SupplyOrderDetail::TaxRate))
                    .col(money(SupplyOrderDetail::TaxValue))
                    .col(money(SupplyOrderDetail::PriceTi))
                    .col(money(SupplyOrderDetail::TaxValueWithOrderDiscount))
                    .col(money(SupplyOrderDetail::PriceWithOrderDiscountTe))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supply_order_detail_order")
                            .from(SupplyOrderDetail::Table, SupplyOrderDetail::IdSupplyOrder)
                            .to(SupplyOrder::Table, SupplyOrder::IdSupplyOrder)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_supply_order_detail_order_tax")
                    .table(SupplyOrderDetail::Table)
                    .col(SupplyOrderDetail::IdSupplyOrder)
                    .col(SupplyOrderDetail::TaxRate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupplyOrderDetail::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SupplyOrder::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Warehouse::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Address::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currency::Table).to_owned())
            .await
    }
}

/// Monetary and rate columns share precision 16,6 (the sqlite backend caps
/// precision at 16) and default to zero.
fn money<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(16, 6)
        .not_null()
        .default(0)
        .to_owned()
}

#[derive(DeriveIden)]
enum Currency {
    Table,
    IdCurrency,
    Name,
    IsoCode,
    Sign,
    Blank,
    Format,
    Decimals,
    ConversionRate,
    Deleted,
    Active,
}

#[derive(DeriveIden)]
enum Address {
    Table,
    IdAddress,
    IdSupplier,
    IdWarehouse,
    Alias,
    Company,
    Lastname,
    Firstname,
    Address1,
    Address2,
    Postcode,
    City,
    State,
    Country,
    Phone,
    PhoneMobile,
    VatNumber,
    Deleted,
}

#[derive(DeriveIden)]
enum Warehouse {
    Table,
    IdWarehouse,
    IdCurrency,
    IdAddress,
    IdEmployee,
    Reference,
    Name,
    ManagementType,
    Deleted,
}

#[derive(DeriveIden)]
enum SupplyOrder {
    Table,
    IdSupplyOrder,
    IdSupplier,
    SupplierName,
    IdLang,
    IdWarehouse,
    IdSupplyOrderState,
    IdCurrency,
    IdRefCurrency,
    Reference,
    DateAdd,
    DateUpd,
    DateDeliveryExpected,
    TotalTe,
    TotalWithDiscountTe,
    TotalTax,
    TotalTi,
    DiscountRate,
    DiscountValueTe,
    IsTemplate,
}

#[derive(DeriveIden)]
enum SupplyOrderDetail {
    Table,
    IdSupplyOrderDetail,
    IdSupplyOrder,
    IdCurrency,
    IdProduct,
    IdProductAttribute,
    Reference,
    SupplierReference,
    Name,
    Ean13,
    Upc,
    ExchangeRate,
    UnitPriceTe,
    QuantityExpected,
    QuantityReceived,
    PriceTe,
    DiscountRate,
    DiscountValueTe,
    PriceWithDiscountTe,
    TaxRate,
    TaxValue,
    PriceTi,
    TaxValueWithOrderDiscount,
    PriceWithOrderDiscountTe,
}
