use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::{AuthenticatedUser, JwtSecret};
use crate::auth::{jwt, password, tokens};
use crate::db::is_unique_violation;
use crate::db::refresh_tokens as token_db;
use crate::db::users as user_db;
use crate::models::refresh_tokens::RefreshRequest;
use crate::models::users::{LoginUser, RegisterUser, Role, UserResponse};

/// Response body for register, login and refresh.
#[derive(Debug, serde::Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

async fn issue_token_pair(
    db: &DatabaseConnection,
    secret: &str,
    user: crate::models::users::Model,
) -> Result<AuthResponse, HttpResponse> {
    let access_token = jwt::issue_access_token(user.id, user.role.clone(), secret).map_err(|e| {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to issue token: {e}"),
        }))
    })?;

    let refresh_token = tokens::generate_refresh_token();
    token_db::insert_refresh_token(
        db,
        user.id,
        tokens::hash_refresh_token(&refresh_token),
        tokens::refresh_expiry(),
    )
    .await
    .map_err(|e| {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))
    })?;

    Ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
    })
}

/// POST /api/auth/register — create a user plus its role profile.
///
/// Duplicate email or username is a 400 and writes nothing; the user and
/// profile rows are inserted in one transaction.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<RegisterUser>,
) -> impl Responder {
    let input = body.into_inner();

    if input.email.trim().is_empty() || !input.email.contains('@') {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "A valid email is required",
        }));
    }
    if input.username.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Username is required",
        }));
    }
    if input.password.len() < 8 {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Password must be at least 8 characters",
        }));
    }
    if input.role == Role::Company && input.company.is_none() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "A company profile is required for the company role",
        }));
    }

    match user_db::email_or_username_taken(db.get_ref(), &input.email, &input.username).await {
        Ok(true) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Email or username is already in use",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    let password_hash = match password::hash_password(&input.password) {
        Ok(h) => h,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e,
            }));
        }
    };

    let user = match user_db::insert_user_with_profile(db.get_ref(), input, password_hash).await {
        Ok(user) => user,
        // A racing registration can slip past the availability check and
        // trip the unique index instead. Same answer either way.
        Err(e) if is_unique_violation(&e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Email or username is already in use",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to register: {e}"),
            }));
        }
    };

    match issue_token_pair(db.get_ref(), &secret.0, user).await {
        Ok(resp) => HttpResponse::Created().json(resp),
        Err(resp) => resp,
    }
}

/// POST /api/auth/login — verify credentials, issue a token pair.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<LoginUser>,
) -> impl Responder {
    let input = body.into_inner();

    let user = match user_db::get_user_by_email(db.get_ref(), &input.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // Same message as a bad password — don't leak which emails exist.
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid email or password",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match password::verify_password(&input.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid email or password",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e,
            }));
        }
    }

    match issue_token_pair(db.get_ref(), &secret.0, user).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(resp) => resp,
    }
}

/// POST /api/auth/refresh — rotate a refresh token.
///
/// The presented token must hash to a live row; it is revoked and a fresh
/// pair is issued. Revoked, expired or unknown tokens are all 401.
pub async fn refresh(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<RefreshRequest>,
) -> impl Responder {
    let hash = tokens::hash_refresh_token(&body.refresh_token);

    let row = match token_db::find_live_by_hash(db.get_ref(), &hash).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid or expired refresh token",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let user = match user_db::get_user_by_id(db.get_ref(), row.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Unknown user",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    // Single use: revoke before issuing the replacement.
    if let Err(e) = token_db::revoke(db.get_ref(), row.id).await {
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }));
    }

    match issue_token_pair(db.get_ref(), &secret.0, user).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(resp) => resp,
    }
}

/// POST /api/auth/logout — revoke the presented refresh token.
pub async fn logout(
    db: web::Data<DatabaseConnection>,
    body: web::Json<RefreshRequest>,
) -> impl Responder {
    let hash = tokens::hash_refresh_token(&body.refresh_token);

    match token_db::find_live_by_hash(db.get_ref(), &hash).await {
        Ok(Some(row)) => match token_db::revoke(db.get_ref(), row.id).await {
            Ok(()) => HttpResponse::Ok().json(serde_json::json!({
                "message": "Logged out",
            })),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            })),
        },
        // Already dead tokens are fine to "log out" again.
        Ok(None) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Logged out",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/auth/me — return the currently authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}
