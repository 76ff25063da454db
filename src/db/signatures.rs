use sea_orm::*;
use uuid::Uuid;

use crate::models::signatures::{self, CreateSignature};

/// Insert a signature row.
pub async fn insert_signature(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: CreateSignature,
) -> Result<signatures::Model, DbErr> {
    let new_signature = signatures::ActiveModel {
        id: Set(Uuid::new_v4()),
        contract_id: Set(input.contract_id),
        user_id: Set(user_id),
        media_id: Set(input.media_id),
        signed_at: Set(chrono::Utc::now()),
    };

    new_signature.insert(db).await
}

/// Check whether a user has already signed a contract.
pub async fn signature_exists(
    db: &DatabaseConnection,
    contract_id: Uuid,
    user_id: Uuid,
) -> Result<bool, DbErr> {
    let count = signatures::Entity::find()
        .filter(signatures::Column::ContractId.eq(contract_id))
        .filter(signatures::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// All signatures on a contract.
pub async fn get_signatures_by_contract(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<signatures::Model>, DbErr> {
    signatures::Entity::find()
        .filter(signatures::Column::ContractId.eq(contract_id))
        .order_by_asc(signatures::Column::SignedAt)
        .all(db)
        .await
}

/// Count signatures on a contract (QR verification summary).
pub async fn count_signatures_for_contract(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<u64, DbErr> {
    signatures::Entity::find()
        .filter(signatures::Column::ContractId.eq(contract_id))
        .count(db)
        .await
}
