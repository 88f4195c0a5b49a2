use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LedgerEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LedgerEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LedgerEntries::Kind).string_len(16).not_null())
                    .col(
                        ColumnDef::new(LedgerEntries::Amount)
                            .decimal_len(19, 4)
                            .not_null()
                            .check(Expr::col(LedgerEntries::Amount).gt(0)),
                    )
                    .col(ColumnDef::new(LedgerEntries::Category).string().not_null())
                    .col(
                        ColumnDef::new(LedgerEntries::PaymentMethod)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LedgerEntries::Description).text().not_null())
                    .col(ColumnDef::new(LedgerEntries::Reference).string())
                    .col(
                        ColumnDef::new(LedgerEntries::TransactionDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LedgerEntries::StaffId).uuid())
                    .col(ColumnDef::new(LedgerEntries::SalaryPeriod).string_len(7))
                    .col(
                        ColumnDef::new(LedgerEntries::IsClassified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LedgerEntries::EditHistory)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(LedgerEntries::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(LedgerEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(LedgerEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(LedgerEntries::Table)
                    .col(LedgerEntries::Kind)
                    .col(LedgerEntries::TransactionDate)
                    .name("idx_ledger_entries_kind_transaction_date")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LedgerEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LedgerEntries {
    Table,
    Id,
    Kind,
    Amount,
    Category,
    PaymentMethod,
    Description,
    Reference,
    TransactionDate,
    StaffId,
    SalaryPeriod,
    IsClassified,
    EditHistory,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
