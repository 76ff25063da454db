use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::verify_deal_party;
use crate::auth::middleware::AuthenticatedUser;
use crate::chat::protocol::ServerMessage;
use crate::chat::server::ChatServer;
use crate::db::companies as company_db;
use crate::db::contracts as contract_db;
use crate::db::creators as creator_db;
use crate::db::rooms as room_db;
use crate::db::terms as term_db;
use crate::models::deals;
use crate::models::terms::{CreateTerm, Status, UpdateTerm};

/// Resolve the chat room shared by the two parties of a deal, if one has
/// been opened yet.
async fn room_for_deal(db: &DatabaseConnection, deal: &deals::Model) -> Option<Uuid> {
    let creator = creator_db::get_creator_by_id(db, deal.content_creator_id)
        .await
        .ok()??;
    let contract = contract_db::get_contract_by_id(db, deal.contract_id)
        .await
        .ok()??;
    let company = company_db::get_company_by_id(db, contract.company_id)
        .await
        .ok()??;

    room_db::find_room_between(db, creator.user_id, company.user_id)
        .await
        .ok()?
        .map(|room| room.id)
}

/// POST /api/terms — add a term to a deal (either party).
pub async fn create_term(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    chat_server: web::Data<Arc<ChatServer>>,
    body: web::Json<CreateTerm>,
) -> impl Responder {
    let input = body.into_inner();

    let deal = match verify_deal_party(db.get_ref(), input.deal_id, user.0.id).await {
        Ok(deal) => deal,
        Err(resp) => return resp,
    };

    if input.title.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Term title is required",
        }));
    }

    let term = match term_db::insert_term(db.get_ref(), input).await {
        Ok(term) => term,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create term: {e}"),
            }));
        }
    };

    if let Some(room_id) = room_for_deal(db.get_ref(), &deal).await {
        chat_server
            .broadcast(
                room_id,
                ServerMessage::NewTerm {
                    term_id: term.id,
                    deal_id: term.deal_id,
                    title: term.title.clone(),
                },
                Some(user.0.id),
            )
            .await;
    }

    HttpResponse::Created().json(term)
}

/// GET /api/terms/deal/{deal_id} — all terms on a deal with confirmation
/// counts (parties only).
pub async fn get_terms_by_deal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let deal_id = path.into_inner();

    if let Err(resp) = verify_deal_party(db.get_ref(), deal_id, user.0.id).await {
        return resp;
    }

    match term_db::get_terms_by_deal_id(db.get_ref(), deal_id).await {
        Ok(terms) => HttpResponse::Ok().json(terms),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/terms/{id} — edit a term's text while it is still negotiating.
pub async fn update_term(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTerm>,
) -> impl Responder {
    let term_id = path.into_inner();

    let term = match term_db::get_term_by_id(db.get_ref(), term_id).await {
        Ok(Some(term)) => term,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Term {term_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if let Err(resp) = verify_deal_party(db.get_ref(), term.deal_id, user.0.id).await {
        return resp;
    }

    if term.status != Status::Negotiating {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Only negotiating terms can be edited",
        }));
    }

    match term_db::update_term(db.get_ref(), term_id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update term: {e}"),
        })),
    }
}

/// POST /api/terms/{id}/confirm — record the caller's confirmation.
///
/// Confirmations are persisted per (term, user), so repeating the call is a
/// no-op. Once both parties have confirmed the term flips to Accepted and
/// the room hears about it.
pub async fn confirm_term(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    chat_server: web::Data<Arc<ChatServer>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let term_id = path.into_inner();

    let term = match term_db::get_term_by_id(db.get_ref(), term_id).await {
        Ok(Some(term)) => term,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Term {term_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let deal = match verify_deal_party(db.get_ref(), term.deal_id, user.0.id).await {
        Ok(deal) => deal,
        Err(resp) => return resp,
    };

    let outcome = match term_db::confirm_term(db.get_ref(), term_id, user.0.id).await {
        Ok(outcome) => outcome,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to confirm term: {e}"),
            }));
        }
    };

    if outcome.just_accepted {
        if let Some(room_id) = room_for_deal(db.get_ref(), &deal).await {
            chat_server
                .broadcast(
                    room_id,
                    ServerMessage::TermConfirmed {
                        term_id,
                        confirmations: outcome.confirmations,
                    },
                    None,
                )
                .await;
        }
    }

    HttpResponse::Ok().json(serde_json::json!({
        "term": outcome.term,
        "confirmations": outcome.confirmations,
    }))
}
