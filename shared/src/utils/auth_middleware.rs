// Authentication extractors for axum handlers
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    models::claims::TokenClaims,
    utils::{
        jwt::{extract_bearer_token, validate_token, JwtError},
        token_extraction::extract_auth_header,
    },
};

// Context for an authenticated Supabase user
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub claims: TokenClaims,
}

// Signed-in user when a token is sent, anonymous otherwise
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message,
        })),
    )
        .into_response()
}

fn auth_user_from_token(token: &str) -> Result<AuthUser, JwtError> {
    let claims = validate_token(token)?;
    let user_id = claims
        .user_id()
        .ok_or_else(|| JwtError::InvalidClaims("sub is not a user id".to_string()))?;
    Ok(AuthUser { user_id, claims })
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = extract_auth_header(&parts.headers)
            .ok_or_else(|| unauthorized("Authorization header required"))?;

        let token = extract_bearer_token(&auth_header)
            .ok_or_else(|| unauthorized("Invalid authorization format"))?;

        auth_user_from_token(&token).map_err(|e| match e {
            JwtError::MissingSecret => {
                tracing::error!("SUPABASE_JWT_SECRET not set, cannot verify tokens");
                unauthorized("Authentication is not configured")
            }
            _ => unauthorized("Invalid or expired token"),
        })
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(auth_header) = extract_auth_header(&parts.headers) else {
            return Ok(MaybeAuthUser(None));
        };

        let token = extract_bearer_token(&auth_header)
            .ok_or_else(|| unauthorized("Invalid authorization format"))?;

        match auth_user_from_token(&token) {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            // Without a secret tokens cannot be checked; treat the caller as a guest
            Err(JwtError::MissingSecret) => {
                tracing::warn!("SUPABASE_JWT_SECRET not set, ignoring bearer token");
                Ok(MaybeAuthUser(None))
            }
            Err(_) => Err(unauthorized("Invalid or expired token")),
        }
    }
}
