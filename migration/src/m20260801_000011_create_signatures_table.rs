use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `signatures` table and its columns.
#[derive(DeriveIden)]
enum Signatures {
    Table,
    Id,
    ContractId,
    UserId,
    MediaId,
    SignedAt,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Media {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Signatures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Signatures::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Signatures::ContractId).uuid().not_null())
                    .col(ColumnDef::new(Signatures::UserId).uuid().not_null())
                    .col(ColumnDef::new(Signatures::MediaId).uuid().not_null())
                    .col(
                        ColumnDef::new(Signatures::SignedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_signatures_contract_id")
                            .from(Signatures::Table, Signatures::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_signatures_user_id")
                            .from(Signatures::Table, Signatures::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_signatures_media_id")
                            .from(Signatures::Table, Signatures::MediaId)
                            .to(Media::Table, Media::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One signature per signer per contract.
        manager
            .create_index(
                Index::create()
                    .name("uq_signatures_contract_user")
                    .table(Signatures::Table)
                    .col(Signatures::ContractId)
                    .col(Signatures::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Signatures::Table).to_owned())
            .await
    }
}
