use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::OperatorId).uuid().not_null())
                    .col(ColumnDef::new(Assignments::SupervisorId).uuid().not_null())
                    .col(ColumnDef::new(Assignments::BeatId).uuid().not_null())
                    .col(ColumnDef::new(Assignments::LocationId).uuid().not_null())
                    .col(
                        ColumnDef::new(Assignments::ShiftType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::AssignmentType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::StartDate).date().not_null())
                    .col(ColumnDef::new(Assignments::EndDate).date())
                    .col(ColumnDef::new(Assignments::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Assignments::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Assignments::ReviewedBy).uuid())
                    .col(ColumnDef::new(Assignments::RejectionReason).text())
                    .col(
                        ColumnDef::new(Assignments::CapacityOverride)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Assignments::TransferredTo).uuid())
                    .col(ColumnDef::new(Assignments::Notes).text())
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::OperatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::SupervisorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::BeatId)
                            .to(Beats::Table, Beats::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Assignments::Table)
                    .col(Assignments::BeatId)
                    .col(Assignments::Status)
                    .name("idx_assignments_beat_id_status")
                    .to_owned(),
            )
            .await?;

        // An operator holds at most one ACTIVE assignment.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_assignments_active_operator \
                 ON assignments (operator_id) WHERE status = 'ACTIVE'",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Assignments {
    Table,
    Id,
    OperatorId,
    SupervisorId,
    BeatId,
    LocationId,
    ShiftType,
    AssignmentType,
    StartDate,
    EndDate,
    Status,
    CreatedBy,
    ReviewedBy,
    RejectionReason,
    CapacityOverride,
    TransferredTo,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Beats {
    Table,
    Id,
}
