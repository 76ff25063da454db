use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::require_creator;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::creators as creator_db;
use crate::models::PaginationQuery;
use crate::models::creators::UpdateCreator;

/// GET /api/creators — discovery listing of creator profiles.
pub async fn get_creators(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    match creator_db::list_creators(db.get_ref(), query.page(), query.limit()).await {
        Ok(creators) => HttpResponse::Ok().json(creators),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch creators: {e}"),
        })),
    }
}

/// GET /api/creators/me — the authenticated user's creator profile.
pub async fn get_own_creator(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match require_creator(db.get_ref(), user.0.id).await {
        Ok(creator) => HttpResponse::Ok().json(creator),
        Err(resp) => resp,
    }
}

/// GET /api/creators/{id} — public creator profile.
pub async fn get_creator(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match creator_db::get_creator_by_id(db.get_ref(), id).await {
        Ok(Some(creator)) => HttpResponse::Ok().json(creator),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Creator {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/creators/me — update own creator profile.
pub async fn update_own_creator(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateCreator>,
) -> impl Responder {
    let creator = match require_creator(db.get_ref(), user.0.id).await {
        Ok(creator) => creator,
        Err(resp) => return resp,
    };

    match creator_db::update_creator(db.get_ref(), creator.id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update creator: {e}"),
        })),
    }
}
