use actix_web::HttpResponse;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::companies as company_db;
use crate::db::contracts as contract_db;
use crate::db::creators as creator_db;
use crate::db::deals as deal_db;
use crate::db::rooms as room_db;
use crate::models::{companies, contracts, creators, deals};

/// Resolve the company profile for a user, or 403 when the user is not a
/// company account.
pub async fn require_company(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<companies::Model, HttpResponse> {
    match company_db::get_company_by_user_id(db, user_id).await {
        Ok(Some(company)) => Ok(company),
        Ok(None) => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only company accounts can perform this action",
        }))),
        Err(e) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))),
    }
}

/// Resolve the creator profile for a user, or 403 when the user is not a
/// content-creator account.
pub async fn require_creator(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<creators::Model, HttpResponse> {
    match creator_db::get_creator_by_user_id(db, user_id).await {
        Ok(Some(creator)) => Ok(creator),
        Ok(None) => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only content-creator accounts can perform this action",
        }))),
        Err(e) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))),
    }
}

/// Fetch a contract and verify the user's company owns it.
pub async fn verify_contract_owner(
    db: &DatabaseConnection,
    contract_id: Uuid,
    user_id: Uuid,
) -> Result<(contracts::Model, companies::Model), HttpResponse> {
    let company = require_company(db, user_id).await?;

    let contract = contract_db::get_contract_by_id(db, contract_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Contract {contract_id} not found"),
            }))
        })?;

    if contract.company_id != company.id {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own this contract",
        })));
    }

    Ok((contract, company))
}

/// Fetch a deal and verify the user is a party to it: either the creator
/// who sent it, or the company that owns the underlying contract.
pub async fn verify_deal_party(
    db: &DatabaseConnection,
    deal_id: Uuid,
    user_id: Uuid,
) -> Result<deals::Model, HttpResponse> {
    let deal = deal_db::get_deal_by_id(db, deal_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Deal {deal_id} not found"),
            }))
        })?;

    let is_creator = match creator_db::get_creator_by_user_id(db, user_id).await {
        Ok(Some(creator)) => creator.id == deal.content_creator_id,
        _ => false,
    };

    let is_company_owner = match company_db::get_company_by_user_id(db, user_id).await {
        Ok(Some(company)) => {
            match contract_db::get_contract_by_id(db, deal.contract_id).await {
                Ok(Some(contract)) => contract.company_id == company.id,
                _ => false,
            }
        }
        _ => false,
    };

    if !is_creator && !is_company_owner {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You are not a party to this deal",
        })));
    }

    Ok(deal)
}

/// Verify the user participates in a chat room.
pub async fn verify_room_participant(
    db: &DatabaseConnection,
    room_id: Uuid,
    user_id: Uuid,
) -> Result<(), HttpResponse> {
    match room_db::is_participant(db, room_id, user_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You are not a participant of this room",
        }))),
        Err(e) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))),
    }
}
