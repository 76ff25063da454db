///! Integration test for JWT auth validation.
///!
///! Mints access tokens locally with the same HS256 secret the server would
///! use, then validates them through `validate_token`. No running server or
///! database is needed.
///!
///! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use sponsorflow_backend::auth::jwt::{Claims, issue_access_token, validate_token};
use sponsorflow_backend::models::users::Role;

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_issued_token_round_trips() {
    let user_id = Uuid::new_v4();
    let token = issue_access_token(user_id, Role::Company, TEST_SECRET)
        .expect("Failed to issue test token");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.role, Role::Company);
}

#[test]
fn test_role_claim_survives_for_creators() {
    let user_id = Uuid::new_v4();
    let token = issue_access_token(user_id, Role::ContentCreator, TEST_SECRET).unwrap();

    let claims = validate_token(&token, TEST_SECRET).unwrap();
    assert_eq!(claims.role, Role::ContentCreator);
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: Some(now - 3600),
        role: Role::Company,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    // Expired tokens must hard-fail — there is no reissue path here, clients
    // go through POST /api/auth/refresh.
    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = issue_access_token(Uuid::new_v4(), Role::Company, TEST_SECRET).unwrap();

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_sub_must_be_a_uuid() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "not-a-uuid".to_string(),
        exp: now + 3600,
        iat: Some(now),
        role: Role::ContentCreator,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let claims = validate_token(&token, TEST_SECRET).expect("Signature itself is fine");
    assert!(claims.user_id().is_err());
}
