use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::env;
use thiserror::Error;

use crate::models::claims::TokenClaims;

pub const JWT_SECRET_ENV: &str = "SUPABASE_JWT_SECRET";

#[derive(Debug, Error, PartialEq)]
pub enum JwtError {
    #[error("Token invalid or expired")]
    InvalidToken,

    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("Invalid claims: {0}")]
    InvalidClaims(String),
}

/// Validate a Supabase access token with the secret from the environment
pub fn validate_token(token: &str) -> Result<TokenClaims, JwtError> {
    let secret = env::var(JWT_SECRET_ENV).map_err(|_| JwtError::MissingSecret)?;
    validate_token_with_secret(token, &secret)
}

/// Validate a token against an explicit HS256 secret
pub fn validate_token_with_secret(token: &str, secret: &str) -> Result<TokenClaims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&["authenticated"]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| JwtError::InvalidToken)?;

    let claims = token_data.claims;
    if !claims.is_authenticated() {
        return Err(JwtError::InvalidClaims(format!(
            "role '{}' is not a signed-in user",
            claims.role
        )));
    }

    Ok(claims)
}

/// Extract bearer token from an Authorization header value
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    auth_header
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    fn sign(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(role: &str, exp_offset: i64) -> TokenClaims {
        let now = chrono::Utc::now().timestamp();
        TokenClaims {
            sub: "0f5b3c1a-8e21-4d8f-b0a2-6c1e9f7d3a10".to_string(),
            email: Some("ravi@example.in".to_string()),
            role: role.to_string(),
            exp: now + exp_offset,
            iat: Some(now),
            aud: Some("authenticated".to_string()),
        }
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token("Bearer abc123token"),
            Some("abc123token".to_string())
        );
        assert_eq!(extract_bearer_token("Token abc123"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
    }

    #[test]
    fn test_valid_token_roundtrip() {
        let token = sign(&claims("authenticated", 600), SECRET);
        let decoded = validate_token_with_secret(&token, SECRET).unwrap();
        assert_eq!(decoded.email.as_deref(), Some("ravi@example.in"));
        assert!(decoded.user_id().is_some());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(&claims("authenticated", 600), SECRET);
        assert_eq!(
            validate_token_with_secret(&token, "another-secret-of-sufficient-length-xx"),
            Err(JwtError::InvalidToken)
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = sign(&claims("authenticated", -3600), SECRET);
        assert_eq!(
            validate_token_with_secret(&token, SECRET),
            Err(JwtError::InvalidToken)
        );
    }

    #[test]
    fn test_anon_token_rejected() {
        let token = sign(&claims("anon", 600), SECRET);
        assert!(matches!(
            validate_token_with_secret(&token, SECRET),
            Err(JwtError::InvalidClaims(_))
        ));
    }

    #[test]
    fn test_empty_secret() {
        assert_eq!(
            validate_token_with_secret("whatever", ""),
            Err(JwtError::MissingSecret)
        );
    }
}
