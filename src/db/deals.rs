use sea_orm::*;
use uuid::Uuid;

use crate::models::deals::{self, Status};
use crate::models::notifications::{self, CreateNotification};
use crate::models::terms::{self, CreateTermInput};

/// Check whether a deal already exists for a (contract, creator) pair.
pub async fn deal_exists_for_contract_and_creator(
    db: &DatabaseConnection,
    contract_id: Uuid,
    content_creator_id: Uuid,
) -> Result<bool, DbErr> {
    let count = deals::Entity::find()
        .filter(deals::Column::ContractId.eq(contract_id))
        .filter(deals::Column::ContentCreatorId.eq(content_creator_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Insert a deal, its initial terms and the company-side notification row
/// in one transaction — a deal never lands without its terms.
pub async fn insert_deal_with_terms(
    db: &DatabaseConnection,
    contract_id: Uuid,
    content_creator_id: Uuid,
    price: f64,
    term_inputs: Vec<CreateTermInput>,
    notification: CreateNotification,
) -> Result<deals::Model, DbErr> {
    let txn = db.begin().await?;

    let deal_id = Uuid::new_v4();
    let new_deal = deals::ActiveModel {
        id: Set(deal_id),
        contract_id: Set(contract_id),
        content_creator_id: Set(content_creator_id),
        status: Set(Status::Pending),
        price: Set(price),
        created_at: Set(chrono::Utc::now()),
    };
    let deal = new_deal.insert(&txn).await?;

    for term in term_inputs {
        let new_term = terms::ActiveModel {
            id: Set(Uuid::new_v4()),
            deal_id: Set(deal_id),
            title: Set(term.title),
            description: Set(term.description),
            status: Set(terms::Status::Negotiating),
            created_at: Set(chrono::Utc::now()),
        };
        new_term.insert(&txn).await?;
    }

    let new_notification = notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(notification.user_id),
        kind: Set(notification.kind),
        body: Set(notification.body),
        deal_id: Set(Some(deal_id)),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
    };
    new_notification.insert(&txn).await?;

    txn.commit().await?;
    Ok(deal)
}

/// Fetch a single deal by ID.
pub async fn get_deal_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<deals::Model>, DbErr> {
    deals::Entity::find_by_id(id).one(db).await
}

/// Fetch all deals on a contract.
pub async fn get_deals_by_contract_id(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<deals::Model>, DbErr> {
    deals::Entity::find()
        .filter(deals::Column::ContractId.eq(contract_id))
        .order_by_desc(deals::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all deals sent by a creator.
pub async fn get_deals_by_creator_id(
    db: &DatabaseConnection,
    content_creator_id: Uuid,
) -> Result<Vec<deals::Model>, DbErr> {
    deals::Entity::find()
        .filter(deals::Column::ContentCreatorId.eq(content_creator_id))
        .order_by_desc(deals::Column::CreatedAt)
        .all(db)
        .await
}

/// Check whether a contract has at least one accepted deal.
pub async fn contract_has_accepted_deals(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<bool, DbErr> {
    let count = deals::Entity::find()
        .filter(deals::Column::ContractId.eq(contract_id))
        .filter(deals::Column::Status.eq(Status::Accepted))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Update the status of a deal, writing the counterpart notification in the
/// same transaction.
///
/// The expected source status is re-checked on the row inside the
/// transaction; `Ok(None)` means another writer got there first and nothing
/// was changed. First writer wins.
pub async fn update_deal_status(
    db: &DatabaseConnection,
    id: Uuid,
    from: Status,
    to: Status,
    notification: CreateNotification,
) -> Result<Option<deals::Model>, DbErr> {
    let txn = db.begin().await?;

    let deal = deals::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Deal not found".to_string()))?;

    if deal.status != from {
        return Ok(None);
    }

    let mut active: deals::ActiveModel = deal.into();
    active.status = Set(to);
    let updated = active.update(&txn).await?;

    let new_notification = notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(notification.user_id),
        kind: Set(notification.kind),
        body: Set(notification.body),
        deal_id: Set(Some(id)),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
    };
    new_notification.insert(&txn).await?;

    txn.commit().await?;
    Ok(Some(updated))
}
