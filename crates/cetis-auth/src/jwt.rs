//! Access token creation and verification (HS256).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use cetis_config::JwtConfig;
use cetis_core::AppError;

use crate::claims::{Claims, UserType};

/// Who a token is issued for.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub user_id: i32,
    pub email: &'a str,
    pub user_type: UserType,
    pub student_id: Option<i32>,
    pub teacher_id: Option<i32>,
}

/// Issues an access token valid for `jwt_config.token_expiry` seconds.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    subject: TokenSubject<'_>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.token_expiry as usize;

    let claims = Claims {
        sub: subject.user_id.to_string(),
        email: subject.email.to_string(),
        user_type: subject.user_type,
        student_id: subject.student_id,
        teacher_id: subject.teacher_id,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Validates signature and expiry and returns the claims.
///
/// # Errors
///
/// Returns 401 for any invalid, expired or malformed token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid or expired token")))
}
