use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Contracts {
    Table,
    CompanyId,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Deals {
    Table,
    ContractId,
    ContentCreatorId,
}

#[derive(DeriveIden)]
enum Terms {
    Table,
    DealId,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    UserId,
    IsRead,
}

#[derive(DeriveIden)]
enum RefreshTokens {
    Table,
    UserId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Contract listing filters on status and pages on created_at.
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_status_created")
                    .table(Contracts::Table)
                    .col(Contracts::Status)
                    .col(Contracts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index on contracts.company_id for a company's own listings.
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_company_id")
                    .table(Contracts::Table)
                    .col(Contracts::CompanyId)
                    .to_owned(),
            )
            .await?;

        // Index on deals.contract_id for fetching deals per contract.
        manager
            .create_index(
                Index::create()
                    .name("idx_deals_contract_id")
                    .table(Deals::Table)
                    .col(Deals::ContractId)
                    .to_owned(),
            )
            .await?;

        // Index on deals.content_creator_id for a creator's sent deals.
        manager
            .create_index(
                Index::create()
                    .name("idx_deals_content_creator_id")
                    .table(Deals::Table)
                    .col(Deals::ContentCreatorId)
                    .to_owned(),
            )
            .await?;

        // Index on terms.deal_id for per-deal term listings.
        manager
            .create_index(
                Index::create()
                    .name("idx_terms_deal_id")
                    .table(Terms::Table)
                    .col(Terms::DealId)
                    .to_owned(),
            )
            .await?;

        // Unread-count queries filter on (user_id, is_read).
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_user_read")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        // Index on refresh_tokens.user_id for bulk revocation.
        manager
            .create_index(
                Index::create()
                    .name("idx_refresh_tokens_user_id")
                    .table(RefreshTokens::Table)
                    .col(RefreshTokens::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_contracts_status_created").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contracts_company_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_deals_contract_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_deals_content_creator_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_terms_deal_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_notifications_user_read").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_refresh_tokens_user_id").to_owned())
            .await?;

        Ok(())
    }
}
