use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Shop scoped key/value settings; id_shop NULL holds the global value
        manager
            .create_table(
                Table::create()
                    .table(Configuration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Configuration::IdConfiguration)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Configuration::IdShop).big_integer().null())
                    .col(ColumnDef::new(Configuration::Name).string_len(254).not_null())
                    .col(ColumnDef::new(Configuration::Value).text().null())
                    .col(ColumnDef::new(Configuration::DateAdd).timestamp().not_null())
                    .col(ColumnDef::new(Configuration::DateUpd).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_configuration_name_shop")
                    .table(Configuration::Table)
                    .col(Configuration::Name)
                    .col(Configuration::IdShop)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Configuration::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Configuration {
    Table,
    IdConfiguration,
    IdShop,
    Name,
    Value,
    DateAdd,
    DateUpd,
}
