use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `companies` table and its columns.
#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    UserId,
    Name,
    Industry,
    Description,
    Website,
    Location,
    CreatedAt,
}

/// Identifiers for the `content_creators` table and its columns.
#[derive(DeriveIden)]
enum ContentCreators {
    Table,
    Id,
    UserId,
    Bio,
    Category,
    AudienceSize,
    Pricing,
    Location,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One company profile per user.
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Industry).string())
                    .col(ColumnDef::new(Companies::Description).text())
                    .col(ColumnDef::new(Companies::Website).string())
                    .col(ColumnDef::new(Companies::Location).string())
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_companies_user_id")
                            .from(Companies::Table, Companies::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One creator profile per user.
        manager
            .create_table(
                Table::create()
                    .table(ContentCreators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentCreators::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ContentCreators::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ContentCreators::Bio).text())
                    .col(ColumnDef::new(ContentCreators::Category).string())
                    .col(ColumnDef::new(ContentCreators::AudienceSize).big_integer())
                    .col(ColumnDef::new(ContentCreators::Pricing).double())
                    .col(ColumnDef::new(ContentCreators::Location).string())
                    .col(
                        ColumnDef::new(ContentCreators::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_creators_user_id")
                            .from(ContentCreators::Table, ContentCreators::UserId)
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
            .drop_table(Table::drop().table(ContentCreators::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}
