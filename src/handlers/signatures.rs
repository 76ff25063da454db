use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::companies as company_db;
use crate::db::contracts as contract_db;
use crate::db::creators as creator_db;
use crate::db::deals as deal_db;
use crate::db::media as media_db;
use crate::db::signatures as signature_db;
use crate::models::deals::Status as DealStatus;
use crate::models::media::Kind;
use crate::models::signatures::CreateSignature;

/// A user may sign a contract when they are the owning company, or a
/// creator with an accepted deal on it.
async fn is_contract_party(
    db: &DatabaseConnection,
    contract_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sea_orm::DbErr> {
    let contract = match contract_db::get_contract_by_id(db, contract_id).await? {
        Some(c) => c,
        None => return Ok(false),
    };

    if let Some(company) = company_db::get_company_by_user_id(db, user_id).await? {
        if company.id == contract.company_id {
            return Ok(true);
        }
    }

    if let Some(creator) = creator_db::get_creator_by_user_id(db, user_id).await? {
        let deals = deal_db::get_deals_by_contract_id(db, contract_id).await?;
        return Ok(deals
            .iter()
            .any(|d| d.content_creator_id == creator.id && d.status == DealStatus::Accepted));
    }

    Ok(false)
}

/// POST /api/signatures — record a handwritten-signature image against a
/// contract. One signature per (contract, user).
pub async fn create_signature(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateSignature>,
) -> impl Responder {
    let input = body.into_inner();

    match contract_db::get_contract_by_id(db.get_ref(), input.contract_id).await {
        Ok(Some(_)) => {}
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
    }

    match is_contract_party(db.get_ref(), input.contract_id, user.0.id).await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Only the contract's company or a creator with an accepted deal can sign",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    // The signature image must already be uploaded.
    match media_db::get_media_by_id(db.get_ref(), input.media_id).await {
        Ok(Some(media)) if media.kind == Kind::Image => {}
        Ok(Some(_)) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Signatures must reference an image upload",
            }));
        }
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Media {} not found", input.media_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match signature_db::signature_exists(db.get_ref(), input.contract_id, user.0.id).await {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "You have already signed this contract",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    match signature_db::insert_signature(db.get_ref(), user.0.id, input).await {
        Ok(signature) => HttpResponse::Created().json(signature),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to record signature: {e}"),
        })),
    }
}

/// GET /api/signatures/contract/{contract_id} — all signatures on a
/// contract, in signing order.
pub async fn get_signatures_by_contract(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();
    match signature_db::get_signatures_by_contract(db.get_ref(), contract_id).await {
        Ok(signatures) => HttpResponse::Ok().json(signatures),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
