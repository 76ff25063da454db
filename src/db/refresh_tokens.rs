use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::refresh_tokens;

/// Persist a new refresh-token hash for a user.
pub async fn insert_refresh_token(
    db: &DatabaseConnection,
    user_id: Uuid,
    token_hash: String,
    expires_at: chrono::DateTime<chrono::Utc>,
) -> Result<refresh_tokens::Model, DbErr> {
    let new_token = refresh_tokens::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        token_hash: Set(token_hash),
        expires_at: Set(expires_at),
        revoked: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    new_token.insert(db).await
}

/// Look up a live (unrevoked, unexpired) refresh token by its hash.
pub async fn find_live_by_hash(
    db: &DatabaseConnection,
    token_hash: &str,
) -> Result<Option<refresh_tokens::Model>, DbErr> {
    refresh_tokens::Entity::find()
        .filter(refresh_tokens::Column::TokenHash.eq(token_hash))
        .filter(refresh_tokens::Column::Revoked.eq(false))
        .filter(refresh_tokens::Column::ExpiresAt.gt(chrono::Utc::now()))
        .one(db)
        .await
}

/// Revoke one refresh token (rotation and logout paths).
pub async fn revoke(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    refresh_tokens::Entity::update_many()
        .col_expr(refresh_tokens::Column::Revoked, Expr::value(true))
        .filter(refresh_tokens::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}

/// Revoke every refresh token a user holds (password change, account delete).
pub async fn revoke_all_for_user(db: &DatabaseConnection, user_id: Uuid) -> Result<u64, DbErr> {
    let result = refresh_tokens::Entity::update_many()
        .col_expr(refresh_tokens::Column::Revoked, Expr::value(true))
        .filter(refresh_tokens::Column::UserId.eq(user_id))
        .filter(refresh_tokens::Column::Revoked.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
