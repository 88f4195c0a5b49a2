use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Locations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Locations::Name).string().not_null())
                    .col(ColumnDef::new(Locations::Address).text().not_null())
                    .col(ColumnDef::new(Locations::City).string().not_null())
                    .col(ColumnDef::new(Locations::State).string().not_null())
                    .col(ColumnDef::new(Locations::ContactName).string())
                    .col(ColumnDef::new(Locations::ContactPhone).string())
                    .col(
                        ColumnDef::new(Locations::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Locations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Locations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Beats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Beats::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Beats::LocationId).uuid().not_null())
                    .col(ColumnDef::new(Beats::Name).string().not_null())
                    .col(ColumnDef::new(Beats::Description).text())
                    .col(
                        ColumnDef::new(Beats::NumberOfOperators)
                            .integer()
                            .not_null()
                            .check(Expr::col(Beats::NumberOfOperators).gte(1)),
                    )
                    .col(
                        ColumnDef::new(Beats::HeadcountOverride)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Beats::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Beats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Beats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Beats::Table, Beats::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Beats::Table)
                    .col(Beats::LocationId)
                    .col(Beats::Name)
                    .unique()
                    .name("idx_beats_location_id_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Beats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Locations {
    Table,
    Id,
    Name,
    Address,
    City,
    State,
    ContactName,
    ContactPhone,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Beats {
    Table,
    Id,
    LocationId,
    Name,
    Description,
    NumberOfOperators,
    HeadcountOverride,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
