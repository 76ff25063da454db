use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::users::Role;

/// Default access-token lifetime in seconds (15 minutes). Short on purpose:
/// renewal goes through the refresh-token flow, never through re-validating
/// an expired token.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Access-token claims, signed with HS256 using the server secret.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// The user's marketplace role.
    pub role: Role,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }
}

/// Issue a signed access token for a user.
pub fn issue_access_token(user_id: Uuid, role: Role, secret: &str) -> Result<String, String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + ACCESS_TOKEN_TTL_SECS as usize,
        iat: Some(now),
        role,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Failed to encode token: {e}"))
}

/// Validate an access token and return the decoded claims.
///
/// Expired tokens fail here with `ExpiredSignature` — there is no
/// decode-without-verify fallback; clients must use the refresh endpoint.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|td| td.claims)
    .map_err(|e| format!("Token validation failed: {e:?}"))
}
