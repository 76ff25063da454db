use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::{require_creator, verify_contract_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::CacheData;
use crate::chat::protocol::ServerMessage;
use crate::chat::server::ChatServer;
use crate::db::companies as company_db;
use crate::db::is_unique_violation;
use crate::db::contracts as contract_db;
use crate::db::creators as creator_db;
use crate::db::deals as deal_db;
use crate::db::rooms as room_db;
use crate::models::contracts::Status as ContractStatus;
use crate::models::deals::{CreateDealRequest, Status};
use crate::models::notifications::CreateNotification;

use super::notifications::invalidate_unread_count;

/// POST /api/deals/request — a creator sends a deal request on a contract.
///
/// The contract must exist and be active; one request per creator per
/// contract. The deal, its initial terms and the company-side notification
/// land in a single transaction, then the company gets a best-effort live
/// push.
pub async fn create_deal_request(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    chat_server: web::Data<Arc<ChatServer>>,
    body: web::Json<CreateDealRequest>,
) -> impl Responder {
    let creator = match require_creator(db.get_ref(), user.0.id).await {
        Ok(creator) => creator,
        Err(resp) => return resp,
    };

    let input = body.into_inner();

    // 1. Verify the contract exists and is open for deals.
    let contract = match contract_db::get_contract_by_id(db.get_ref(), input.contract_id).await {
        Ok(Some(contract)) => contract,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Contract {} not found", input.contract_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if contract.status != ContractStatus::Active {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Deals can only be requested on active contracts",
        }));
    }

    // 2. One request per (creator, contract).
    match deal_db::deal_exists_for_contract_and_creator(db.get_ref(), contract.id, creator.id).await
    {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "You have already sent a deal request for this contract",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    // 3. Resolve the company's user for the notification.
    let company = match company_db::get_company_by_id(db.get_ref(), contract.company_id).await {
        Ok(Some(company)) => company,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "The company behind this contract no longer exists",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let notification = CreateNotification {
        user_id: company.user_id,
        kind: "deal_request".to_string(),
        body: format!("New deal request on \"{}\"", contract.title),
        deal_id: None, // filled in by the transactional insert
    };

    // 4. Create deal + terms + notification atomically.
    let deal = match deal_db::insert_deal_with_terms(
        db.get_ref(),
        contract.id,
        creator.id,
        input.price,
        input.terms,
        notification,
    )
    .await
    {
        Ok(deal) => deal,
        // A racing duplicate slips past the fast-path check and trips the
        // unique index instead. Same answer either way.
        Err(e) if is_unique_violation(&e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "You have already sent a deal request for this contract",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create deal: {e}"),
            }));
        }
    };

    invalidate_unread_count(cache.get_ref(), company.user_id).await;

    // 5. Live nudge; the notification row is the source of truth.
    chat_server
        .notify_user(
            company.user_id,
            ServerMessage::Notification {
                kind: "deal_request".to_string(),
                body: format!("New deal request on \"{}\"", contract.title),
                deal_id: Some(deal.id),
            },
        )
        .await;

    HttpResponse::Created().json(deal)
}

/// Shared accept/reject/complete plumbing: ownership check, allowed source
/// status, transition, notification.
async fn transition_deal(
    db: &DatabaseConnection,
    cache: &CacheData,
    chat_server: &ChatServer,
    deal_id: Uuid,
    user_id: Uuid,
    from: Status,
    to: Status,
    kind: &str,
) -> HttpResponse {
    let deal = match deal_db::get_deal_by_id(db, deal_id).await {
        Ok(Some(deal)) => deal,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Deal {deal_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    // Only the company owning the underlying contract may act.
    let (contract, _company) = match verify_contract_owner(db, deal.contract_id, user_id).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    if deal.status != from || !from.may_become(&to) {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!(
                "Deal is already {:?}. Only {:?} deals can become {:?}.",
                deal.status, from, to
            ),
        }));
    }

    // Resolve the creator's user for the notification.
    let creator = match creator_db::get_creator_by_id(db, deal.content_creator_id).await {
        Ok(Some(creator)) => creator,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "The creator behind this deal no longer exists",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let body = format!("Your deal on \"{}\" is now {kind}", contract.title);
    let notification = CreateNotification {
        user_id: creator.user_id,
        kind: format!("deal_{kind}"),
        body: body.clone(),
        deal_id: Some(deal.id),
    };

    let updated = match deal_db::update_deal_status(
        db,
        deal_id,
        from.clone(),
        to.clone(),
        notification,
    )
    .await
    {
        Ok(Some(updated)) => updated,
        // Someone else moved the deal between our read and the transaction.
        // First writer wins.
        Ok(None) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("Deal is no longer {from:?}"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to update deal: {e}"),
            }));
        }
    };

    invalidate_unread_count(cache, creator.user_id).await;

    // An accepted deal opens a chat room for the two parties.
    if to == Status::Accepted {
        let a = user_id;
        let b = creator.user_id;
        let existing = room_db::find_room_between(db, a, b).await;
        if let Ok(None) = existing {
            if let Err(e) = room_db::insert_room_with_participants(db, a, b).await {
                tracing::warn!("Failed to open room for accepted deal {deal_id}: {e}");
            }
        }
    }

    chat_server
        .notify_user(
            creator.user_id,
            ServerMessage::Notification {
                kind: format!("deal_{kind}"),
                body,
                deal_id: Some(deal_id),
            },
        )
        .await;

    HttpResponse::Ok().json(updated)
}

/// PUT /api/deals/{id}/accept — company accepts a pending deal.
pub async fn accept_deal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    chat_server: web::Data<Arc<ChatServer>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition_deal(
        db.get_ref(),
        cache.get_ref(),
        chat_server.get_ref(),
        path.into_inner(),
        user.0.id,
        Status::Pending,
        Status::Accepted,
        "accepted",
    )
    .await
}

/// PUT /api/deals/{id}/reject — company rejects a pending deal.
pub async fn reject_deal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    chat_server: web::Data<Arc<ChatServer>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition_deal(
        db.get_ref(),
        cache.get_ref(),
        chat_server.get_ref(),
        path.into_inner(),
        user.0.id,
        Status::Pending,
        Status::Rejected,
        "rejected",
    )
    .await
}

/// PUT /api/deals/{id}/complete — company closes out an accepted deal.
pub async fn complete_deal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    chat_server: web::Data<Arc<ChatServer>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition_deal(
        db.get_ref(),
        cache.get_ref(),
        chat_server.get_ref(),
        path.into_inner(),
        user.0.id,
        Status::Accepted,
        Status::Completed,
        "completed",
    )
    .await
}

/// GET /api/deals/contract/{contract_id} — all deals on a contract
/// (contract owner only).
pub async fn get_deals_by_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    if let Err(resp) = verify_contract_owner(db.get_ref(), contract_id, user.0.id).await {
        return resp;
    }

    match deal_db::get_deals_by_contract_id(db.get_ref(), contract_id).await {
        Ok(deals) => HttpResponse::Ok().json(deals),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/deals/mine — the authenticated creator's sent deals.
pub async fn get_my_deals(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let creator = match require_creator(db.get_ref(), user.0.id).await {
        Ok(creator) => creator,
        Err(resp) => return resp,
    };

    match deal_db::get_deals_by_creator_id(db.get_ref(), creator.id).await {
        Ok(deals) => HttpResponse::Ok().json(deals),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
