use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{require_company, verify_contract_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheData, keys};
use crate::db::companies as company_db;
use crate::db::contracts as contract_db;
use crate::db::deals as deal_db;
use crate::db::signatures as signature_db;
use crate::models::contracts::{
    self, ContractListQuery, ContractVerification, CreateContract, Status, UpdateContract,
    UpdateContractStatus,
};
use crate::models::criteria::CriteriaWithSubs;

/// Contract detail with its criteria tree.
#[derive(Debug, serde::Serialize)]
pub struct ContractDetail {
    #[serde(flatten)]
    pub contract: contracts::Model,
    pub criteria: Vec<CriteriaWithSubs>,
}

async fn invalidate_listing(cache: &CacheData) {
    if let Err(e) = cache.delete(&keys::contract_list_first_page()).await {
        tracing::warn!("Failed to invalidate contract listing cache: {e}");
    }
}

/// POST /api/contracts — a company posts a sponsorship contract.
///
/// The contract and its criteria tree are inserted in one transaction; the
/// serial number (what the QR code encodes) is generated server-side.
pub async fn create_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<CreateContract>,
) -> impl Responder {
    let company = match require_company(db.get_ref(), user.0.id).await {
        Ok(company) => company,
        Err(resp) => return resp,
    };

    let input = body.into_inner();

    if input.title.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Title is required",
        }));
    }
    if input.budget <= 0.0 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Budget must be greater than zero",
        }));
    }
    if input.start_date >= input.end_date {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Start date must be before end date",
        }));
    }

    match contract_db::insert_contract_with_criteria(db.get_ref(), company.id, input).await {
        Ok(contract) => {
            invalidate_listing(cache.get_ref()).await;
            HttpResponse::Created().json(contract)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create contract: {e}"),
        })),
    }
}

/// GET /api/contracts — list active contracts (keyset-paginated).
/// The first page is served from Redis when fresh.
pub async fn get_contracts(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    query: web::Query<ContractListQuery>,
) -> impl Responder {
    let cache_key = keys::contract_list_first_page();

    if query.is_first_page() {
        match cache.get::<Vec<contracts::Model>>(&cache_key).await {
            Ok(Some(cached)) => return HttpResponse::Ok().json(cached),
            Ok(None) => {}
            Err(e) => tracing::warn!("Cache read failed, falling through: {e}"),
        }
    }

    match contract_db::list_active_contracts(
        db.get_ref(),
        query.limit(),
        query.cursor_created_at,
        query.cursor_id,
    )
    .await
    {
        Ok(list) => {
            if query.is_first_page() {
                let ttl = crate::cache::CacheConfig::from_env().contract_list_ttl;
                if let Err(e) = cache.set(&cache_key, &list, Some(ttl.as_secs())).await {
                    tracing::warn!("Cache write failed: {e}");
                }
            }
            HttpResponse::Ok().json(list)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch contracts: {e}"),
        })),
    }
}

/// GET /api/contracts/{id} — contract detail with criteria.
pub async fn get_contract(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let contract = match contract_db::get_contract_by_id(db.get_ref(), id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Contract {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match contract_db::get_criteria_for_contract(db.get_ref(), id).await {
        Ok(criteria) => HttpResponse::Ok().json(ContractDetail { contract, criteria }),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/contracts/company/{company_id} — contracts posted by a company.
pub async fn get_contracts_by_company(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let company_id = path.into_inner();
    match contract_db::get_contracts_by_company_id(db.get_ref(), company_id).await {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/contracts/{id} — owner edits contract fields.
pub async fn update_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateContract>,
) -> impl Responder {
    let contract_id = path.into_inner();

    if let Err(resp) = verify_contract_owner(db.get_ref(), contract_id, user.0.id).await {
        return resp;
    }

    match contract_db::update_contract(db.get_ref(), contract_id, body.into_inner()).await {
        Ok(updated) => {
            invalidate_listing(cache.get_ref()).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update contract: {e}"),
        })),
    }
}

/// PUT /api/contracts/{id}/status — owner moves an active contract to
/// completed or terminated.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateContractStatus>,
) -> impl Responder {
    let contract_id = path.into_inner();

    let (contract, _company) =
        match verify_contract_owner(db.get_ref(), contract_id, user.0.id).await {
            Ok(pair) => pair,
            Err(resp) => return resp,
        };

    if contract.status != Status::Active {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!(
                "Contract is already {:?}. Only active contracts can change status.",
                contract.status
            ),
        }));
    }

    if body.status == Status::Active {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Contracts cannot be moved back to active",
        }));
    }

    match contract_db::update_contract_status(db.get_ref(), contract_id, body.into_inner()).await {
        Ok(updated) => {
            invalidate_listing(cache.get_ref()).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update contract status: {e}"),
        })),
    }
}

/// DELETE /api/contracts/{id} — owner deletes a contract, but only while
/// no deal on it has been accepted.
pub async fn delete_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    if let Err(resp) = verify_contract_owner(db.get_ref(), contract_id, user.0.id).await {
        return resp;
    }

    match deal_db::contract_has_accepted_deals(db.get_ref(), contract_id).await {
        Ok(true) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Contracts with accepted deals cannot be deleted",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    match contract_db::delete_contract(db.get_ref(), contract_id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                invalidate_listing(cache.get_ref()).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Contract {contract_id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Contract {contract_id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete contract: {e}"),
        })),
    }
}

/// GET /api/contracts/verify/{serial} — public QR verification.
///
/// No authentication: anyone scanning a printed QR code can check that the
/// serial resolves to a real contract and see its signature state.
pub async fn verify_contract(
    db: web::Data<DatabaseConnection>,
    path: web::Path<String>,
) -> impl Responder {
    let serial = path.into_inner();

    let contract = match contract_db::get_contract_by_serial(db.get_ref(), &serial).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "No contract matches this serial number",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let company_name = match company_db::get_company_by_id(db.get_ref(), contract.company_id).await
    {
        Ok(Some(company)) => company.name,
        _ => String::new(),
    };

    let signature_count =
        match signature_db::count_signatures_for_contract(db.get_ref(), contract.id).await {
            Ok(n) => n,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

    HttpResponse::Ok().json(ContractVerification {
        serial_number: contract.serial_number,
        title: contract.title,
        status: contract.status,
        rank: contract.rank,
        company_name,
        start_date: contract.start_date,
        end_date: contract.end_date,
        signature_count,
    })
}
