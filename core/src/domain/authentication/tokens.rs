use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use tracing::error;

use crate::domain::{
    authentication::entities::{AuthError, JwtClaims},
    common::entities::app_errors::CoreError,
};

pub fn encode_access_token(claims: &JwtClaims, secret: &str) -> Result<String, CoreError> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!("Failed to sign access token: {}", e);
        CoreError::InternalServerError
    })
}

pub fn decode_access_token(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    jsonwebtoken::decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn claims(exp_offset: i64) -> JwtClaims {
        let now = Utc::now().timestamp();
        JwtClaims {
            sub: Uuid::new_v4(),
            sid: Uuid::new_v4(),
            iat: now,
            exp: now + exp_offset,
        }
    }

    #[test]
    fn token_signed_with_secret_is_accepted() {
        let claims = claims(3600);
        let token = encode_access_token(&claims, "secret").unwrap();
        assert_eq!(decode_access_token(&token, "secret").unwrap(), claims);
    }

    #[test]
    fn token_with_other_secret_is_rejected() {
        let token = encode_access_token(&claims(3600), "secret").unwrap();
        assert_eq!(
            decode_access_token(&token, "other"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let token = encode_access_token(&claims(-120), "secret").unwrap();
        assert_eq!(
            decode_access_token(&token, "secret"),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(
            decode_access_token("not.a.jwt", "secret"),
            Err(AuthError::InvalidToken)
        );
    }
}
