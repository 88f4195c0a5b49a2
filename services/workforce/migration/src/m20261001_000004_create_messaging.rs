use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Messages::SenderId).uuid().not_null())
                    .col(ColumnDef::new(Messages::RecipientId).uuid().not_null())
                    .col(ColumnDef::new(Messages::Subject).string().not_null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(ColumnDef::new(Messages::ReadAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Messages::DeletedBySender)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Messages::DeletedByRecipient)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Messages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Messages::Table)
                    .col(Messages::RecipientId)
                    .col((Messages::CreatedAt, IndexOrder::Desc))
                    .name("idx_messages_recipient_id_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Messages::Table)
                    .col(Messages::SenderId)
                    .col((Messages::CreatedAt, IndexOrder::Desc))
                    .name("idx_messages_sender_id_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Broadcasts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Broadcasts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Broadcasts::SenderId).uuid().not_null())
                    .col(ColumnDef::new(Broadcasts::Subject).string().not_null())
                    .col(ColumnDef::new(Broadcasts::Body).text().not_null())
                    .col(
                        ColumnDef::new(Broadcasts::TargetRoles)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Broadcasts::CreatedAt)
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
                    .table(BroadcastReads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BroadcastReads::BroadcastId).uuid().not_null())
                    .col(ColumnDef::new(BroadcastReads::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(BroadcastReads::ReadAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(BroadcastReads::BroadcastId)
                            .col(BroadcastReads::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BroadcastReads::Table, BroadcastReads::BroadcastId)
                            .to(Broadcasts::Table, Broadcasts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BroadcastReads::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Broadcasts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Messages {
    Table,
    Id,
    SenderId,
    RecipientId,
    Subject,
    Body,
    ReadAt,
    DeletedBySender,
    DeletedByRecipient,
    CreatedAt,
}

#[derive(Iden)]
enum Broadcasts {
    Table,
    Id,
    SenderId,
    Subject,
    Body,
    TargetRoles,
    CreatedAt,
}

#[derive(Iden)]
enum BroadcastReads {
    Table,
    BroadcastId,
    UserId,
    ReadAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
