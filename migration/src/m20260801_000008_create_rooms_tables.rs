use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `rooms` table and its columns.
#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
    CreatedAt,
}

/// Identifiers for the `room_participants` join table.
#[derive(DeriveIden)]
enum RoomParticipants {
    Table,
    RoomId,
    UserId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rooms::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Rooms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoomParticipants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RoomParticipants::RoomId).uuid().not_null())
                    .col(ColumnDef::new(RoomParticipants::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(RoomParticipants::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RoomParticipants::RoomId)
                            .col(RoomParticipants::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_participants_room_id")
                            .from(RoomParticipants::Table, RoomParticipants::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_participants_user_id")
                            .from(RoomParticipants::Table, RoomParticipants::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomParticipants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rooms::Table).to_owned())
            .await
    }
}
