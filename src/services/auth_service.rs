use std::sync::Arc;

use crate::dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::models::user::{NewUser, PublicUser};
use crate::services::user_store::{UserStore, UserStoreError};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::token::issue_session_token;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_secret: Arc<str>,
    jwt_ttl_hours: i64,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt_secret: Arc<str>, jwt_ttl_hours: i64) -> Self {
        Self {
            users,
            jwt_secret,
            jwt_ttl_hours,
        }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<AuthResponse> {
        let email = normalize_email(&payload.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(Error::Conflict("Email already registered.".to_string()));
        }

        let password_hash = hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

        let user = self
            .users
            .insert(NewUser {
                email,
                password_hash,
                first_name: payload.first_name.trim().to_string(),
                last_name: payload.last_name.trim().to_string(),
            })
            .await
            .map_err(|e| match e {
                UserStoreError::EmailTaken => Error::Conflict("Email already registered.".to_string()),
                UserStoreError::Other(e) => Error::Anyhow(e),
            })?;

        tracing::info!(user_id = %user.id, "user registered");
        self.respond(user.into())
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<AuthResponse> {
        let email = normalize_email(&payload.email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let matches = verify_password(&payload.password, &user.password_hash).map_err(|e| {
            tracing::error!(user_id = %user.id, "stored password hash is unreadable: {}", e);
            Error::Unauthorized(INVALID_CREDENTIALS.to_string())
        })?;
        if !matches {
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        tracing::info!(user_id = %user.id, "user logged in");
        self.respond(user.into())
    }

    /// Accepts any address and never says whether an account exists. No
    /// mail is sent yet; the request is only logged.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        let email = normalize_email(email);
        let known = self.users.find_by_email(&email).await?.is_some();
        tracing::info!(known, "password reset requested");
        Ok(())
    }

    fn respond(&self, user: PublicUser) -> Result<AuthResponse> {
        let token = issue_session_token(user.id, &self.jwt_secret, self.jwt_ttl_hours)
            .map_err(|e| Error::Internal(format!("Failed to issue token: {}", e)))?;
        Ok(AuthResponse { user, token })
    }
}
