//! Token verification
//!
//! Tokens are issued by the platform's identity service; this crate only
//! checks signatures and expiry and reads the caller's identity and role.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Parse the subject as a user id
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    const SECRET: &str = "test-secret";

    fn token(sub: &str, expires_in: Duration, secret: &str) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            username: "lifter".to_string(),
            role: "member".to_string(),
            exp: (now + expires_in).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let user_id = Uuid::new_v4();
        let claims =
            AuthService::verify_token(&token(&user_id.to_string(), Duration::hours(1), SECRET), SECRET)
                .unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, "member");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let expired = token(&Uuid::new_v4().to_string(), Duration::hours(-2), SECRET);
        assert!(matches!(
            AuthService::verify_token(&expired, SECRET),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let forged = token(&Uuid::new_v4().to_string(), Duration::hours(1), "other-secret");
        assert!(AuthService::verify_token(&forged, SECRET).is_err());
    }

    #[test]
    fn test_non_uuid_subject() {
        let claims = AuthService::verify_token(&token("not-a-uuid", Duration::hours(1), SECRET), SECRET)
            .unwrap();
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken)));
    }
}
