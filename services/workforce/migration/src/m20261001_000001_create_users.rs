use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Phone).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Role).string_len(32).not_null())
                    .col(ColumnDef::new(Users::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Users::PhotoUrl).string())
                    .col(ColumnDef::new(Users::CredentialHash).string())
                    .col(
                        ColumnDef::new(Users::MustChangeCredential)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
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
                    .table(Users::Table)
                    .col(Users::Role)
                    .col(Users::Status)
                    .name("idx_users_role_status")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StaffProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffProfiles::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StaffProfiles::EmployeeId)
                            .string_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StaffProfiles::Salary).decimal_len(19, 4))
                    .col(
                        ColumnDef::new(StaffProfiles::ApprovalStatus)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StaffProfiles::RejectionReason).text())
                    .col(ColumnDef::new(StaffProfiles::ReviewedBy).uuid())
                    .col(ColumnDef::new(StaffProfiles::ReviewedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(StaffProfiles::LocationId).uuid())
                    .col(ColumnDef::new(StaffProfiles::BeatId).uuid())
                    .col(ColumnDef::new(StaffProfiles::SupervisorId).uuid())
                    .col(ColumnDef::new(StaffProfiles::Address).text())
                    .col(ColumnDef::new(StaffProfiles::StateOfOrigin).string())
                    .col(ColumnDef::new(StaffProfiles::DateOfBirth).date())
                    .col(ColumnDef::new(StaffProfiles::NextOfKinName).string())
                    .col(ColumnDef::new(StaffProfiles::NextOfKinPhone).string())
                    .col(ColumnDef::new(StaffProfiles::GuarantorName).string())
                    .col(ColumnDef::new(StaffProfiles::GuarantorPhone).string())
                    .col(ColumnDef::new(StaffProfiles::RegisteredBy).uuid())
                    .col(
                        ColumnDef::new(StaffProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(StaffProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StaffProfiles::Table, StaffProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(StaffProfiles::Table)
                    .col(StaffProfiles::ApprovalStatus)
                    .name("idx_staff_profiles_approval_status")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Counters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Counters::Name)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Counters::Value)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Counters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    Phone,
    FirstName,
    LastName,
    Role,
    Status,
    PhotoUrl,
    CredentialHash,
    MustChangeCredential,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum StaffProfiles {
    Table,
    UserId,
    EmployeeId,
    Salary,
    ApprovalStatus,
    RejectionReason,
    ReviewedBy,
    ReviewedAt,
    LocationId,
    BeatId,
    SupervisorId,
    Address,
    StateOfOrigin,
    DateOfBirth,
    NextOfKinName,
    NextOfKinPhone,
    GuarantorName,
    GuarantorPhone,
    RegisteredBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Counters {
    Table,
    Name,
    Value,
}
