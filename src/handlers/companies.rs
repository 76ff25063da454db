use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::require_company;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::companies as company_db;
use crate::models::companies::UpdateCompany;

/// GET /api/companies/me — the authenticated user's company profile.
pub async fn get_own_company(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match require_company(db.get_ref(), user.0.id).await {
        Ok(company) => HttpResponse::Ok().json(company),
        Err(resp) => resp,
    }
}

/// GET /api/companies/{id} — public company profile.
pub async fn get_company(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match company_db::get_company_by_id(db.get_ref(), id).await {
        Ok(Some(company)) => HttpResponse::Ok().json(company),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Company {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/companies/me — update own company profile.
pub async fn update_own_company(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateCompany>,
) -> impl Responder {
    let company = match require_company(db.get_ref(), user.0.id).await {
        Ok(company) => company,
        Err(resp) => return resp,
    };

    match company_db::update_company(db.get_ref(), company.id, body.into_inner()).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update company: {e}"),
        })),
    }
}
