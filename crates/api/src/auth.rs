//! Bearer-token authentication extractors.
//!
//! Tokens carry the user id and role as HS256 JWT claims. Token
//! issuance (registration/login) happens out of band; this module only
//! verifies and extracts.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use common::UserId;
use domain::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// JWT claims carried in every bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub id: Uuid,
    /// Account role.
    pub role: Role,
    /// Expiry, seconds since the epoch.
    pub exp: usize,
}

/// Shared key material for signing and verifying bearer tokens.
#[derive(Clone)]
pub struct AuthKeys {
    secret: Arc<String>,
}

impl AuthKeys {
    /// Creates key material from the configured secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::new(secret.into()),
        }
    }

    /// Mints a token for the given user. Used by tests and operator
    /// tooling; the API itself never issues tokens.
    pub fn mint(&self, user: UserId, role: Role) -> String {
        let claims = Claims {
            id: user.as_uuid(),
            role,
            exp: (chrono::Utc::now() + chrono::Duration::hours(24)).timestamp() as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .expect("HS256 signing cannot fail with a valid secret")
    }

    fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
    }
}

/// Authenticated caller, extracted from the `Authorization` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: UserId,
    pub role: Role,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = AuthKeys::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

        let claims = keys.verify(token)?;
        Ok(AuthUser {
            id: UserId::from_uuid(claims.id),
            role: claims.role,
        })
    }
}

/// Authenticated caller with the admin role.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

impl<S> FromRequestParts<S> for AdminUser
where
    AuthKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            return Err(ApiError::Forbidden("Admin access denied".to_string()));
        }
        Ok(AdminUser(user))
    }
}
