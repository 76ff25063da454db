use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `deals` table and its columns.
#[derive(DeriveIden)]
enum Deals {
    Table,
    Id,
    ContractId,
    ContentCreatorId,
    Status,
    Price,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ContentCreators {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Deals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Deals::ContractId).uuid().not_null())
                    .col(ColumnDef::new(Deals::ContentCreatorId).uuid().not_null())
                    .col(ColumnDef::new(Deals::Status).string().not_null())
                    .col(ColumnDef::new(Deals::Price).double().not_null())
                    .col(
                        ColumnDef::new(Deals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deals_contract_id")
                            .from(Deals::Table, Deals::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deals_content_creator_id")
                            .from(Deals::Table, Deals::ContentCreatorId)
                            .to(ContentCreators::Table, ContentCreators::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One deal request per creator per contract.
        manager
            .create_index(
                Index::create()
                    .name("uq_deals_contract_creator")
                    .table(Deals::Table)
                    .col(Deals::ContractId)
                    .col(Deals::ContentCreatorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deals::Table).to_owned())
            .await
    }
}
