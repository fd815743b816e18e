use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::config::CredentialPair;
use crate::errors::ServiceError;
use crate::AppState;

/// Session token claims. The role is whatever the matched credential pair
/// carries; the core only cares that a session exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    jwt_secret: String,
    token_ttl: Duration,
    credentials: Vec<CredentialPair>,
}

impl AuthConfig {
    pub fn new(jwt_secret: String, token_ttl: Duration, credentials: Vec<CredentialPair>) -> Self {
        Self {
            jwt_secret,
            token_ttl,
            credentials,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub expires_in: u64,
}

/// Shared-credential session gate: a fixed set of username/password pairs
/// from configuration, each mapped to a role carried in the session token.
#[derive(Clone)]
pub struct AuthService {
    config: Arc<AuthConfig>,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Checks a login pair and issues a session token
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ServiceError> {
        let matched = self
            .config
            .credentials
            .iter()
            .find(|pair| pair.username == username && pair.password == password)
            .ok_or_else(|| {
                warn!(username, "Rejected login attempt");
                ServiceError::Auth("Invalid username or password".to_string())
            })?;

        let now = Utc::now().timestamp() as usize;
        let ttl = self.config.token_ttl.as_secs();
        let claims = Claims {
            sub: matched.username.clone(),
            role: matched.role.clone(),
            iat: now,
            exp: now + ttl as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::Auth(format!("Failed to issue token: {}", e)))?;

        info!(username, role = %claims.role, "Session opened");

        Ok(LoginResponse {
            token,
            role: claims.role,
            expires_in: ttl,
        })
    }

    /// Validates a session token and returns its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| ServiceError::Unauthorized(format!("Invalid session token: {}", e)))
    }
}

/// Extractor asserting a logged-in session. Handlers take it as an
/// argument; there is no ambient session state.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ServiceError::Unauthorized("Missing Authorization header".into()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ServiceError::Unauthorized("Expected a Bearer token".into()))?;

        let claims = app_state.auth_service.verify_token(token)?;

        Ok(AuthenticatedUser {
            username: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig::new(
            "test_secret_key_for_testing_purposes_only_32chars".into(),
            Duration::from_secs(3600),
            vec![CredentialPair {
                username: "admin".into(),
                password: "admin".into(),
                role: "admin".into(),
            }],
        ))
    }

    #[test]
    fn login_with_configured_pair_yields_verifiable_token() {
        let auth = service();
        let response = auth.login("admin", "admin").expect("login");
        assert_eq!(response.role, "admin");

        let claims = auth.verify_token(&response.token).expect("verify");
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn login_with_wrong_pair_is_rejected() {
        let auth = service();
        assert!(matches!(
            auth.login("admin", "nope"),
            Err(ServiceError::Auth(_))
        ));
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let auth = service();
        assert!(matches!(
            auth.verify_token("not-a-token"),
            Err(ServiceError::Unauthorized(_))
        ));
    }
}
