use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `terms` table and its columns.
#[derive(DeriveIden)]
enum Terms {
    Table,
    Id,
    DealId,
    Title,
    Description,
    Status,
    CreatedAt,
}

/// Identifiers for the `term_confirmations` ledger.
#[derive(DeriveIden)]
enum TermConfirmations {
    Table,
    Id,
    TermId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Deals {
    Table,
    Id,
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
                    .table(Terms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Terms::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Terms::DealId).uuid().not_null())
                    .col(ColumnDef::new(Terms::Title).string().not_null())
                    .col(ColumnDef::new(Terms::Description).text().not_null())
                    .col(ColumnDef::new(Terms::Status).string().not_null())
                    .col(
                        ColumnDef::new(Terms::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_terms_deal_id")
                            .from(Terms::Table, Terms::DealId)
                            .to(Deals::Table, Deals::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TermConfirmations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TermConfirmations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TermConfirmations::TermId).uuid().not_null())
                    .col(ColumnDef::new(TermConfirmations::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(TermConfirmations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_term_confirmations_term_id")
                            .from(TermConfirmations::Table, TermConfirmations::TermId)
                            .to(Terms::Table, Terms::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_term_confirmations_user_id")
                            .from(TermConfirmations::Table, TermConfirmations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One confirmation per user per term — double confirms are no-ops.
        manager
            .create_index(
                Index::create()
                    .name("uq_term_confirmations_term_user")
                    .table(TermConfirmations::Table)
                    .col(TermConfirmations::TermId)
                    .col(TermConfirmations::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TermConfirmations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Terms::Table).to_owned())
            .await
    }
}
