use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Documents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Documents::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Documents::Title).string().not_null())
                    .col(ColumnDef::new(Documents::DocumentType).string().not_null())
                    .col(ColumnDef::new(Documents::FileUrl).text().not_null())
                    .col(ColumnDef::new(Documents::ExpiresOn).date())
                    .col(ColumnDef::new(Documents::UploadedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Documents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Documents::Table, Documents::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Documents::Table)
                    .col(Documents::ExpiresOn)
                    .name("idx_documents_expires_on")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Meetings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Meetings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Meetings::Title).string().not_null())
                    .col(ColumnDef::new(Meetings::Agenda).text())
                    .col(
                        ColumnDef::new(Meetings::ScheduledFor)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Meetings::RoomUrl).text().not_null())
                    .col(ColumnDef::new(Meetings::OrganizerId).uuid().not_null())
                    .col(ColumnDef::new(Meetings::InvitedRoles).json_binary().not_null())
                    .col(
                        ColumnDef::new(Meetings::IsCancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Meetings::CreatedAt)
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
                    .table(Meetings::Table)
                    .col(Meetings::ScheduledFor)
                    .name("idx_meetings_scheduled_for")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Meetings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Documents {
    Table,
    Id,
    OwnerId,
    Title,
    DocumentType,
    FileUrl,
    ExpiresOn,
    UploadedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Meetings {
    Table,
    Id,
    Title,
    Agenda,
    ScheduledFor,
    RoomUrl,
    OrganizerId,
    InvitedRoles,
    IsCancelled,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
