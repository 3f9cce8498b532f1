//! Access token issuance and verification.
//!
//! Verification runs with zero leeway: a token whose `exp` is one second in
//! the past is expired. Expiry is reported separately from every other decode
//! failure so clients can tell "log in again" apart from "this token is bad".

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use uuid::Uuid;

use schoolhub_config::JwtConfig;
use schoolhub_core::AppError;

use crate::claims::Claims;

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

/// Signs an access token for the given account.
///
/// The token expires `jwt_config.token_expiry` seconds from now.
pub fn create_access_token(
    account_id: Uuid,
    username: &str,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.token_expiry;

    let claims = Claims {
        sub: account_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        exp: exp.max(0) as usize,
        iat: now.max(0) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies the signature and expiry of an access token and returns its claims.
///
/// # Errors
///
/// - `TokenExpired` when the signature is valid but `exp` has passed
/// - `Unauthorized` for every other failure (bad signature, malformed token,
///   missing claims)
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::token_expired(),
        _ => AppError::unauthorized("Invalid token"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::ErrorKind as AppErrorKind;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 3600,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = get_test_jwt_config();
        let account_id = Uuid::new_v4();

        let token = create_access_token(account_id, "t1", "teacher", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.username, "t1");
        assert_eq!(claims.role, "teacher");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_token_malformed_is_unauthorized() {
        let config = get_test_jwt_config();
        let err = verify_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
    }

    #[test]
    fn test_verify_token_wrong_secret_is_unauthorized() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "s1", "student", &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            token_expiry: 3600,
        };

        let err = verify_token(&token, &wrong_config).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
    }

    #[test]
    fn test_verify_token_expired() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "a1".to_string(),
            role: "admin".to_string(),
            exp: now - 10,
            iat: now - 100,
        };
        let token = sign(&claims, &config.secret);

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::TokenExpired);
    }

    #[test]
    fn test_negative_expiry_config_yields_expired_token() {
        let config = JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: -60,
        };
        let token = create_access_token(Uuid::new_v4(), "p1", "parent", &config).unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::TokenExpired);
    }

    #[test]
    fn test_expired_token_with_bad_signature_is_unauthorized() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "a1".to_string(),
            role: "admin".to_string(),
            exp: now - 10,
            iat: now - 100,
        };
        let token = sign(&claims, "some-other-secret-entirely-32-chars!");

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
    }
}
