/**
 * Session Tokens
 *
 * Verifies the HS256 bearer tokens that identify callers. The `sub` claim
 * carries the caller's user id. Issuing tokens belongs to the identity
 * provider; `create_token` exists for operators and tests.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::config::AuthSettings;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Create a signed token for a user, valid for `token_ttl_hours`
pub fn create_token(user_id: Uuid, settings: &AuthSettings) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + settings.token_ttl_hours * 60 * 60,
        iat: now,
    };
    let key = EncodingKey::from_secret(settings.jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a token
pub fn verify_token(token: &str, settings: &AuthSettings) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(settings.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}
