use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `criteria` table and its columns.
#[derive(DeriveIden)]
enum Criteria {
    Table,
    Id,
    ContractId,
    Name,
    Description,
    CreatedAt,
}

/// Identifiers for the `sub_criteria` table and its columns.
#[derive(DeriveIden)]
enum SubCriteria {
    Table,
    Id,
    CriteriaId,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Criteria::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Criteria::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Criteria::ContractId).uuid().not_null())
                    .col(ColumnDef::new(Criteria::Name).string().not_null())
                    .col(ColumnDef::new(Criteria::Description).text())
                    .col(
                        ColumnDef::new(Criteria::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_criteria_contract_id")
                            .from(Criteria::Table, Criteria::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubCriteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubCriteria::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubCriteria::CriteriaId).uuid().not_null())
                    .col(ColumnDef::new(SubCriteria::Name).string().not_null())
                    .col(ColumnDef::new(SubCriteria::Description).text())
                    .col(
                        ColumnDef::new(SubCriteria::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_criteria_criteria_id")
                            .from(SubCriteria::Table, SubCriteria::CriteriaId)
                            .to(Criteria::Table, Criteria::Id)
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
            .drop_table(Table::drop().table(SubCriteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Criteria::Table).to_owned())
            .await
    }
}
